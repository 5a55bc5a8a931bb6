//! `docsnip snippet` command implementation.

use clap::{ArgGroup, Args};
use docsnip_config::Config;
use docsnip_fetch::Fetch;
use docsnip_snippets::{LoadedSnippet, SnippetLoader};
use docsnip_tabs::{Element, MemoryPage, SnippetTarget, TabClasses};

use super::{http_fetcher, snippet_settings};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the snippet command.
#[derive(Args)]
#[command(group(ArgGroup::new("source").required(true).args(["name", "file"])))]
pub(crate) struct SnippetArgs {
    /// URL of the documentation page the snippet is shown on.
    #[arg(long)]
    page_url: String,

    /// Project the snippet belongs to (e.g. device-detection-cxx).
    #[arg(long)]
    project: String,

    /// Example name; loads `{name}-example.html` with the default tag.
    #[arg(long)]
    name: Option<String>,

    /// Snippet file relative to the project's version directory.
    #[arg(long)]
    file: Option<String>,

    /// Element id to extract (default: configured default tag).
    #[arg(long, requires = "file")]
    tag: Option<String>,
}

impl SnippetArgs {
    /// Execute the snippet command.
    ///
    /// # Errors
    ///
    /// Returns an error if the page URL carries no version or the snippet
    /// page cannot be fetched.
    pub(crate) fn execute(self, config: &Config) -> Result<(), CliError> {
        let output = Output::new();
        let loader = SnippetLoader::new(http_fetcher(config), snippet_settings(config));
        let target = self.target(&loader);

        output.info(&format!("Loading {} from {}", target.file, target.project));
        match load(&loader, &self.page_url, &target)? {
            Some(loaded) => {
                output.success(&format!("Loaded {}", loaded.url));
                output.result(&loaded.html);
            }
            None => output.warning(&format!(
                "No element with id \"{}\" in {}",
                target.tag, target.file
            )),
        }
        Ok(())
    }

    fn target<F: Fetch>(&self, loader: &SnippetLoader<F>) -> SnippetTarget {
        let settings = loader.settings();
        match (&self.name, &self.file) {
            (Some(name), _) => loader.example_target(&self.project, name),
            (None, file) => SnippetTarget {
                project: self.project.clone(),
                file: file.clone().unwrap_or_default(),
                tag: self
                    .tag
                    .clone()
                    .unwrap_or_else(|| settings.default_tag.clone()),
                container: settings.container_id.clone(),
            },
        }
    }
}

/// Load `target` into a headless page holding only its container.
fn load<F: Fetch>(
    loader: &SnippetLoader<F>,
    page_url: &str,
    target: &SnippetTarget,
) -> Result<Option<LoadedSnippet>, CliError> {
    let mut page = MemoryPage::new(TabClasses::default());
    let body = page.body();
    page.add_element(body, Element::new().id(target.container.clone()));
    Ok(loader.load(&mut page, page_url, target)?)
}
