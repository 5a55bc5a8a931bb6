//! Configuration management for docsnip.
//!
//! Parses `docsnip.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `site.base_url`
//! - `platforms.runner_readme_url`
//! - `platforms.options_url`

mod expand;

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override site origin used for absolute request URLs.
    pub base_url: Option<String>,
    /// Override HTTP timeout in seconds.
    pub timeout_secs: Option<u64>,
    /// Override the runner readme URL.
    pub runner_readme_url: Option<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "docsnip.toml";

/// Placeholder substituted with the project name in [`PlatformsConfig::options_url`].
pub const PROJECT_PLACEHOLDER: &str = "{project}";

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site-wide settings.
    pub site: SiteConfig,
    /// Tab markup and selection cookie.
    pub tabs: TabsConfig,
    /// Snippet loading.
    pub snippets: SnippetsConfig,
    /// Search widget.
    pub search: SearchConfig,
    /// Tested-versions table.
    pub platforms: PlatformsConfig,
    /// HTTP client settings.
    pub http: HttpConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Site configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Path segment that precedes the documentation version in page URLs.
    pub doc_base: String,
    /// Site origin (e.g. `https://docs.example.com`), used when the CLI
    /// needs absolute URLs for site-relative endpoints.
    pub base_url: Option<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            doc_base: "documentation".to_owned(),
            base_url: None,
        }
    }
}

/// Tab markup and selection cookie configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct TabsConfig {
    /// Cookie holding the comma-joined selected labels.
    pub cookie_name: String,
    /// Class carried by every tab button.
    pub button_class: String,
    /// Class marking the active tab button.
    pub active_class: String,
    /// Class carried by language content panels.
    pub panel_class: String,
    /// Attribute naming a panel's language.
    pub lang_attribute: String,
}

impl Default for TabsConfig {
    fn default() -> Self {
        Self {
            cookie_name: "selectedTabs".to_owned(),
            button_class: "b-btn--tab".to_owned(),
            active_class: "b-btn--tab--is-active".to_owned(),
            panel_class: "c-tabgroup__main".to_owned(),
            lang_attribute: "data-lang".to_owned(),
        }
    }
}

/// Snippet loading configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SnippetsConfig {
    /// Fragment id extracted when a button does not name one.
    pub default_tag: String,
    /// Container receiving grabbed examples.
    pub container_id: String,
    /// Suffix appended to example names to form the snippet filename.
    pub example_suffix: String,
}

impl Default for SnippetsConfig {
    fn default() -> Self {
        Self {
            default_tag: "primary".to_owned(),
            container_id: "grabbed-example".to_owned(),
            example_suffix: "-example.html".to_owned(),
        }
    }
}

/// Search widget configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Path prefix of the JSON search endpoint.
    pub api_path: String,
    /// Path prefix of the full results page.
    pub results_path: String,
    /// Quiet period after the last keystroke before a query is issued.
    pub debounce_ms: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            api_path: "/api/search/".to_owned(),
            results_path: "/SearchResults/".to_owned(),
            debounce_ms: 300,
        }
    }
}

impl SearchConfig {
    /// Debounce period as a [`Duration`].
    #[must_use]
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

/// Tested-versions table configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PlatformsConfig {
    /// Markdown readme listing the hosted runner images.
    pub runner_readme_url: String,
    /// CI options URL template; `{project}` is replaced by the repository name.
    pub options_url: String,
}

impl Default for PlatformsConfig {
    fn default() -> Self {
        Self {
            runner_readme_url:
                "https://raw.githubusercontent.com/actions/runner-images/main/README.md"
                    .to_owned(),
            options_url: "https://raw.githubusercontent.com/51Degrees/{project}/main/ci/options.json"
                .to_owned(),
        }
    }
}

impl PlatformsConfig {
    /// Options URL for `project`.
    #[must_use]
    pub fn options_url_for(&self, project: &str) -> String {
        self.options_url.replace(PROJECT_PLACEHOLDER, project)
    }
}

/// HTTP client configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Global request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { timeout_secs: 30 }
    }
}

impl HttpConfig {
    /// Request timeout as a [`Duration`].
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`site.base_url`").
        field: String,
        /// Error message (e.g., "${`DOCS_ORIGIN`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `docsnip.toml` in current directory and parents,
    /// falling back to defaults when none is found.
    ///
    /// CLI settings are applied after loading and validated together with the
    /// file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the merged configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(base_url) = &settings.base_url {
            self.site.base_url = Some(base_url.clone());
        }
        if let Some(timeout_secs) = settings.timeout_secs {
            self.http.timeout_secs = timeout_secs;
        }
        if let Some(url) = &settings.runner_readme_url {
            self.platforms.runner_readme_url.clone_from(url);
        }
    }

    /// Site origin, required by commands that call site-relative endpoints.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if `site.base_url` is not set.
    pub fn require_base_url(&self) -> Result<&str, ConfigError> {
        self.site
            .base_url
            .as_deref()
            .map(|url| url.trim_end_matches('/'))
            .ok_or_else(|| {
                ConfigError::Validation(
                    "site.base_url is required (set it in docsnip.toml or pass --base-url)"
                        .to_owned(),
                )
            })
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let cwd = std::env::current_dir().ok()?;
        Self::discover_config_from(cwd)
    }

    fn discover_config_from(mut current: PathBuf) -> Option<PathBuf> {
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;
        config.config_path = Some(path.to_path_buf());
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_site()?;
        self.validate_tabs()?;
        self.validate_search()?;
        self.validate_platforms()?;

        if self.http.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "http.timeout_secs must be greater than 0".to_owned(),
            ));
        }

        Ok(())
    }

    fn validate_site(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.site.doc_base, "site.doc_base")?;
        if self.site.doc_base.contains('/') {
            return Err(ConfigError::Validation(
                "site.doc_base must be a single path segment".to_owned(),
            ));
        }
        if let Some(ref base_url) = self.site.base_url {
            require_http_url(base_url, "site.base_url")?;
        }
        Ok(())
    }

    fn validate_tabs(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.tabs.cookie_name, "tabs.cookie_name")?;
        require_non_empty(&self.tabs.button_class, "tabs.button_class")?;
        require_non_empty(&self.tabs.active_class, "tabs.active_class")?;
        require_non_empty(&self.tabs.panel_class, "tabs.panel_class")?;
        require_non_empty(&self.tabs.lang_attribute, "tabs.lang_attribute")?;
        if self
            .tabs
            .cookie_name
            .contains(|c: char| c == '=' || c == ';' || c.is_whitespace())
        {
            return Err(ConfigError::Validation(
                "tabs.cookie_name cannot contain '=', ';' or whitespace".to_owned(),
            ));
        }
        Ok(())
    }

    fn validate_search(&self) -> Result<(), ConfigError> {
        if self.search.debounce_ms == 0 {
            return Err(ConfigError::Validation(
                "search.debounce_ms must be greater than 0".to_owned(),
            ));
        }
        for (value, field) in [
            (&self.search.api_path, "search.api_path"),
            (&self.search.results_path, "search.results_path"),
        ] {
            if !value.starts_with('/') {
                return Err(ConfigError::Validation(format!(
                    "{field} must start with '/'"
                )));
            }
        }
        Ok(())
    }

    fn validate_platforms(&self) -> Result<(), ConfigError> {
        require_http_url(
            &self.platforms.runner_readme_url,
            "platforms.runner_readme_url",
        )?;
        require_http_url(&self.platforms.options_url, "platforms.options_url")?;
        if !self.platforms.options_url.contains(PROJECT_PLACEHOLDER) {
            return Err(ConfigError::Validation(format!(
                "platforms.options_url must contain {PROJECT_PLACEHOLDER}"
            )));
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref url) = self.site.base_url {
            self.site.base_url = Some(expand::expand_env(url, "site.base_url")?);
        }
        self.platforms.runner_readme_url = expand::expand_env(
            &self.platforms.runner_readme_url,
            "platforms.runner_readme_url",
        )?;
        self.platforms.options_url =
            expand::expand_env(&self.platforms.options_url, "platforms.options_url")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.site.doc_base, "documentation");
        assert_eq!(config.tabs.cookie_name, "selectedTabs");
        assert_eq!(config.tabs.active_class, "b-btn--tab--is-active");
        assert_eq!(config.snippets.default_tag, "primary");
        assert_eq!(config.snippets.container_id, "grabbed-example");
        assert_eq!(config.search.debounce(), Duration::from_millis(300));
        assert_eq!(config.http.timeout(), Duration::from_secs(30));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.search.api_path, "/api/search/");
        assert_eq!(config.search.results_path, "/SearchResults/");
    }

    #[test]
    fn test_parse_tabs_config() {
        let toml = r#"
[tabs]
cookie_name = "langTabs"
active_class = "is-active"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.tabs.cookie_name, "langTabs");
        assert_eq!(config.tabs.active_class, "is-active");
        assert_eq!(config.tabs.button_class, "b-btn--tab");
    }

    #[test]
    fn test_options_url_for_project() {
        let config = Config::default();
        assert_eq!(
            config.platforms.options_url_for("device-detection-cxx"),
            "https://raw.githubusercontent.com/51Degrees/device-detection-cxx/main/ci/options.json"
        );
    }

    #[test]
    fn test_validate_rejects_zero_debounce() {
        let config: Config = toml::from_str("[search]\ndebounce_ms = 0\n").unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(msg)) if msg.contains("debounce_ms")
        ));
    }

    #[test]
    fn test_validate_rejects_options_url_without_placeholder() {
        let toml = r#"
[platforms]
options_url = "https://example.com/options.json"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(msg)) if msg.contains("{project}")
        ));
    }

    #[test]
    fn test_validate_rejects_cookie_name_with_separator() {
        let config: Config = toml::from_str("[tabs]\ncookie_name = \"a;b\"\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_multi_segment_doc_base() {
        let config: Config = toml::from_str("[site]\ndoc_base = \"docs/v\"\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_require_base_url_missing() {
        let config = Config::default();
        assert!(config.require_base_url().is_err());
    }

    #[test]
    fn test_require_base_url_trims_trailing_slash() {
        let mut config = Config::default();
        config.site.base_url = Some("https://docs.example.com/".to_owned());
        assert_eq!(
            config.require_base_url().unwrap(),
            "https://docs.example.com"
        );
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut config = Config::default();
        config.apply_cli_settings(&CliSettings {
            base_url: Some("https://docs.example.com".to_owned()),
            timeout_secs: Some(5),
            runner_readme_url: Some("https://mirror.example.com/README.md".to_owned()),
        });
        assert_eq!(
            config.site.base_url.as_deref(),
            Some("https://docs.example.com")
        );
        assert_eq!(config.http.timeout_secs, 5);
        assert_eq!(
            config.platforms.runner_readme_url,
            "https://mirror.example.com/README.md"
        );
    }

    #[test]
    fn test_load_explicit_missing_file() {
        let result = Config::load(Some(Path::new("/nonexistent/docsnip.toml")), None);
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_load_from_file_sets_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(
            &path,
            "[site]\nbase_url = \"https://docs.example.com\"\n[http]\ntimeout_secs = 10\n",
        )
        .unwrap();

        let config = Config::load(Some(&path), None).unwrap();
        assert_eq!(config.config_path.as_deref(), Some(path.as_path()));
        assert_eq!(config.http.timeout_secs, 10);
    }

    #[test]
    fn test_load_invalid_cli_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "").unwrap();

        let settings = CliSettings {
            base_url: Some("docs.example.com".to_owned()),
            ..CliSettings::default()
        };
        let result = Config::load(Some(&path), Some(&settings));
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_discover_config_in_parent() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILENAME), "").unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        let found = Config::discover_config_from(nested).unwrap();
        assert_eq!(found, dir.path().join(CONFIG_FILENAME));
    }
}
