//! `docsnip tested-versions` command implementation.

use clap::Args;
use docsnip_config::Config;
use docsnip_platforms::{ConfigKey, TestedVersions};

use super::http_fetcher;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the tested-versions command.
#[derive(Args)]
pub(crate) struct TestedVersionsArgs {
    /// Project whose CI options are tabulated (e.g. device-detection-cxx).
    project: String,

    /// Configuration column as `Title=Field`, repeatable (default: Arch and Config).
    #[arg(long = "key", value_name = "TITLE=FIELD", value_parser = parse_key)]
    keys: Vec<(String, String)>,
}

impl TestedVersionsArgs {
    /// Execute the tested-versions command.
    ///
    /// # Errors
    ///
    /// Returns an error if the project's CI options cannot be fetched.
    pub(crate) fn execute(self, config: &Config) -> Result<(), CliError> {
        let output = Output::new();
        let builder = TestedVersions::new(
            http_fetcher(config),
            config.platforms.runner_readme_url.clone(),
            config.platforms.options_url.clone(),
        );

        output.info(&format!(
            "Fetching CI options from {}",
            config.platforms.options_url_for(&self.project)
        ));
        let table = builder.build(&self.project, &self.config_keys())?;
        output.result(&table);
        Ok(())
    }

    fn config_keys(&self) -> Vec<ConfigKey> {
        if self.keys.is_empty() {
            return vec![
                ConfigKey::field("Architecture", "Arch"),
                ConfigKey::field("Configuration", "Config"),
            ];
        }
        self.keys
            .iter()
            .map(|(title, field)| ConfigKey::field(title.clone(), field.clone()))
            .collect()
    }
}

/// Parse a `Title=Field` column definition.
fn parse_key(value: &str) -> Result<(String, String), String> {
    match value.split_once('=') {
        Some((title, field)) if !title.is_empty() && !field.is_empty() => {
            Ok((title.to_owned(), field.to_owned()))
        }
        _ => Err(format!("invalid key \"{value}\", expected TITLE=FIELD")),
    }
}
