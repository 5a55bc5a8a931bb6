//! docsnip CLI - documentation page behaviors from the terminal.
//!
//! Provides commands for:
//! - `snippet`: Load an example snippet the way a grab tab would
//! - `search`: Query the site search endpoint
//! - `tested-versions`: Render the tested platforms table of a project
//! - `restore`: Show which tabs a selection cookie re-activates

mod commands;
mod error;
mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use docsnip_config::{CliSettings, Config};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use commands::{RestoreArgs, SearchArgs, SnippetArgs, TestedVersionsArgs};
use error::CliError;
use output::Output;

/// docsnip - documentation snippets, tabs and search.
#[derive(Parser)]
#[command(name = "docsnip", version, about)]
struct Cli {
    /// Path to configuration file (default: auto-discover docsnip.toml).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Site origin for absolute request URLs (overrides config).
    #[arg(long, global = true, env = "DOCSNIP_BASE_URL")]
    base_url: Option<String>,

    /// HTTP timeout in seconds (overrides config).
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Runner-images readme URL for tested-versions (overrides config).
    #[arg(long, global = true, env = "DOCSNIP_RUNNER_README_URL")]
    runner_readme_url: Option<String>,

    /// Enable verbose output (info-level logs).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load an example snippet into a headless page and print it.
    Snippet(SnippetArgs),
    /// Search the documentation site.
    Search(SearchArgs),
    /// Print the tested platforms table of a project.
    TestedVersions(TestedVersionsArgs),
    /// Show which tab labels a selection cookie restores.
    Restore(RestoreArgs),
}

impl Cli {
    fn cli_settings(&self) -> CliSettings {
        CliSettings {
            base_url: self.base_url.clone(),
            timeout_secs: self.timeout,
            runner_readme_url: self.runner_readme_url.clone(),
        }
    }

    fn load_config(&self) -> Result<Config, CliError> {
        Ok(Config::load(
            self.config.as_deref(),
            Some(&self.cli_settings()),
        )?)
    }

    fn run(self) -> Result<(), CliError> {
        let config = self.load_config()?;
        debug!(path = ?config.config_path, "loaded configuration");
        match self.command {
            Commands::Snippet(args) => args.execute(&config),
            Commands::Search(args) => args.execute(&config),
            Commands::TestedVersions(args) => args.execute(&config),
            Commands::Restore(args) => args.execute(&config),
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = cli.run() {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
