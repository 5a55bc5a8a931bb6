//! Blocking HTTP fetcher.

use std::time::Duration;

use tracing::{debug, warn};
use ureq::Agent;

use crate::{CachePolicy, Fetch, FetchError};

/// Default HTTP timeout in seconds.
const DEFAULT_TIMEOUT: u64 = 30;

/// HTTP fetcher reusing one agent for connection pooling.
pub struct HttpFetcher {
    agent: Agent,
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new(Duration::from_secs(DEFAULT_TIMEOUT))
    }
}

impl HttpFetcher {
    /// Create a fetcher with a global request timeout.
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();
        Self { agent }
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, url: &str, policy: CachePolicy) -> Result<String, FetchError> {
        debug!(url, ?policy, "fetching");

        let mut request = self.agent.get(url);
        if policy == CachePolicy::NoCache {
            request = request
                .header("Cache-Control", "no-cache")
                .header("Pragma", "no-cache");
        }

        let response = request.call().map_err(|source| FetchError::HttpRequest {
            url: url.to_owned(),
            source,
        })?;

        let status = response.status().as_u16();
        let mut body_reader = response.into_body();

        if status >= 400 {
            let error_body = body_reader
                .read_to_string()
                .unwrap_or_else(|_| "(unable to read error body)".to_owned());
            warn!(url, status, "fetch returned error status");
            return Err(FetchError::HttpResponse {
                url: url.to_owned(),
                status,
                body: error_body,
            });
        }

        body_reader
            .read_to_string()
            .map_err(|source| FetchError::HttpRequest {
                url: url.to_owned(),
                source,
            })
    }
}
