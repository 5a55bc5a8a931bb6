//! `docsnip restore` command implementation.

use clap::Args;
use docsnip_config::Config;
use docsnip_tabs::{CookieAccess, MemoryCookies, MemoryPage, TabController, TabDom, TabSettings};

use super::tab_settings;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the restore command.
#[derive(Args)]
pub(crate) struct RestoreArgs {
    /// Cookie header as sent by the browser (e.g. "selectedTabs=Java,Linux").
    #[arg(long)]
    cookie: String,

    /// Tab group on the page as comma-separated button labels, repeatable.
    #[arg(long = "label", value_name = "LABEL[,LABEL...]", required = true)]
    groups: Vec<String>,
}

/// Page state after restoring.
#[derive(Debug, PartialEq, Eq)]
struct Restored {
    /// Labels clicked, in click order.
    clicked: Vec<String>,
    /// Labels of the active buttons, in page order.
    active: Vec<String>,
    /// Cookie header after the clicks.
    cookie: String,
}

impl RestoreArgs {
    /// Execute the restore command.
    ///
    /// # Errors
    ///
    /// Returns an error if a tab group has no labels.
    pub(crate) fn execute(self, config: &Config) -> Result<(), CliError> {
        let output = Output::new();
        let restored = self.run(tab_settings(config))?;

        if restored.clicked.is_empty() {
            output.warning("No remembered tab matches the page");
        }
        for label in &restored.clicked {
            output.info(&format!("Clicked {label}"));
        }
        output.success(&format!("Active: {}", restored.active.join(", ")));
        output.result(&restored.cookie);
        Ok(())
    }

    /// Build a page from the groups and restore the cookie against it.
    fn run(&self, settings: TabSettings) -> Result<Restored, CliError> {
        let mut page = MemoryPage::new(settings.classes.clone());
        for group in &self.groups {
            let labels: Vec<&str> = group
                .split(',')
                .map(str::trim)
                .filter(|label| !label.is_empty())
                .collect();
            if labels.is_empty() {
                return Err(CliError::Validation(format!(
                    "tab group \"{group}\" has no labels"
                )));
            }
            let container = page.add_container();
            for label in labels {
                page.add_button(container, label);
            }
        }

        let mut cookies = MemoryCookies::from_header(&self.cookie);
        let clicked = remembered_buttons(&page, &settings, &cookies);
        let controller = TabController::new(settings);
        let clicks = controller.restore(&mut page, &mut cookies);
        debug_assert_eq!(clicks.len(), clicked.len());

        Ok(Restored {
            clicked,
            active: page.active_labels(),
            cookie: cookies.cookie_header(),
        })
    }
}

/// Labels of the buttons restore will click, in click order.
fn remembered_buttons(
    page: &MemoryPage,
    settings: &TabSettings,
    cookies: &MemoryCookies,
) -> Vec<String> {
    let buttons = page.elements_with_class(&settings.classes.button);
    let mut clicked = Vec::new();
    for label in settings.cookie.read(cookies).labels() {
        for &button in &buttons {
            if page.label(button) == *label {
                clicked.push(label.clone());
            }
        }
    }
    clicked
}
