//! Runner-images readme parsing.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use tracing::warn;

/// Heading of the section holding the image table.
const IMAGES_HEADING: &str = " Available Images";

/// Heading of the section holding the link references.
const LINKS_HEADING: &str = " Label scheme";

/// Markdown link reference definition: `[name]: url`.
static LINK_REF_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\[.*\]:").unwrap());

/// A hosted runner image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Runner {
    /// Display title, e.g. `Ubuntu 22.04`.
    pub title: String,
    /// Link to the image's readme, if the reference resolves.
    pub link: Option<String>,
}

/// Runner images listed in the runner-images readme.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunnerCatalog {
    rows: Vec<String>,
    links: HashMap<String, String>,
}

impl RunnerCatalog {
    /// Parse the readme. Missing sections leave the catalog empty.
    #[must_use]
    pub fn parse(markdown: &str) -> Self {
        let rows = match section(markdown, IMAGES_HEADING) {
            Some(images) => image_rows(images),
            None => {
                warn!("runner readme has no{IMAGES_HEADING} section");
                Vec::new()
            }
        };
        let links = match section(markdown, LINKS_HEADING) {
            Some(links) => link_references(links),
            None => {
                warn!("runner readme has no{LINKS_HEADING} section");
                HashMap::new()
            }
        };
        Self { rows, links }
    }

    /// Number of image rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Runner whose label column lists `` `image` ``.
    #[must_use]
    pub fn runner(&self, image: &str) -> Option<Runner> {
        let label = format!("`{image}`");
        self.rows.iter().find_map(|row| {
            let columns: Vec<&str> = row.split('|').collect();
            let (title, labels, reference) = (columns.get(1)?, columns.get(2)?, columns.get(3)?);
            labels.contains(&label).then(|| Runner {
                title: title.trim().to_owned(),
                link: self.links.get(reference.trim()).cloned(),
            })
        })
    }
}

/// Text following the `#` that starts a section with `heading`.
fn section<'a>(markdown: &'a str, heading: &str) -> Option<&'a str> {
    markdown.split('#').find(|s| s.starts_with(heading))
}

/// Table lines of a section, without the header and separator lines.
fn image_rows(section: &str) -> Vec<String> {
    section
        .lines()
        .filter(|line| line.starts_with('|'))
        .skip(2)
        .map(str::to_owned)
        .collect()
}

/// Link references of a section, keyed by bracketed name.
fn link_references(section: &str) -> HashMap<String, String> {
    section
        .lines()
        .filter(|line| LINK_REF_RE.is_match(line))
        .filter_map(|line| {
            let mut parts = line.split(": ");
            let name = parts.next()?;
            let url = parts.next()?;
            Some((name.to_owned(), url.trim().to_owned()))
        })
        .collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) const README: &str = "\
# GitHub Actions Runner Images

Intro text.

## Available Images

| Image | YAML Label | Included Software |
| --------------------|---------------------|--------------------|
| Ubuntu 24.04 | `ubuntu-latest` or `ubuntu-24.04` | [ubuntu-24.04] |
| Ubuntu 22.04 | `ubuntu-22.04` | [ubuntu-22.04] |
| Windows Server 2022 | `windows-latest` or `windows-2022` | [windows-2022] |

### Label scheme

Some text.

[ubuntu-24.04]: https://github.com/actions/runner-images/blob/main/images/ubuntu/Ubuntu2404-Readme.md
[ubuntu-22.04]: https://github.com/actions/runner-images/blob/main/images/ubuntu/Ubuntu2204-Readme.md

## Software and image support
";

    #[test]
    fn test_parse_rows_skip_header() {
        let catalog = RunnerCatalog::parse(README);
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn test_runner_lookup() {
        let catalog = RunnerCatalog::parse(README);
        assert_eq!(
            catalog.runner("ubuntu-latest"),
            Some(Runner {
                title: "Ubuntu 24.04".to_owned(),
                link: Some(
                    "https://github.com/actions/runner-images/blob/main/images/ubuntu/Ubuntu2404-Readme.md"
                        .to_owned()
                ),
            })
        );
    }

    #[test]
    fn test_runner_label_must_match_exactly() {
        let catalog = RunnerCatalog::parse(README);
        assert_eq!(catalog.runner("ubuntu"), None);
        assert_eq!(catalog.runner("ubuntu-22.04").unwrap().title, "Ubuntu 22.04");
    }

    #[test]
    fn test_runner_without_link_reference() {
        let catalog = RunnerCatalog::parse(README);
        let runner = catalog.runner("windows-2022").unwrap();
        assert_eq!(runner.title, "Windows Server 2022");
        assert_eq!(runner.link, None);
    }

    #[test]
    fn test_parse_without_sections() {
        let catalog = RunnerCatalog::parse("# Nothing here\n");
        assert!(catalog.is_empty());
        assert_eq!(catalog.runner("ubuntu-latest"), None);
    }
}
