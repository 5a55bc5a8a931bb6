//! HTML table rendering.

use std::fmt::Write;

use crate::UNKNOWN;
use crate::options::{ConfigKey, Platform};
use crate::runners::RunnerCatalog;

/// Wrap `content` in a table cell.
fn cell(content: &str) -> String {
    format!(r#"<td class="c-table__cell">{content}</td>"#)
}

/// Platform title linked to its runner readme.
///
/// Unknown images render as their bare label; runners without a resolvable
/// reference render as plain titles.
fn platform_html(catalog: &RunnerCatalog, image: &str) -> String {
    match catalog.runner(image) {
        Some(runner) => match runner.link {
            Some(link) => format!(r#"<a href="{}">{}</a>"#, escape(&link), escape(&runner.title)),
            None => escape(&runner.title),
        },
        None => escape(image),
    }
}

fn escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Render the tested platforms table.
#[must_use]
pub fn render_table(platforms: &[Platform], keys: &[ConfigKey], catalog: &RunnerCatalog) -> String {
    let mut table = String::from(r#"<div class="g-table g-table--overflow"><table class="c-table">"#);
    table.push_str("<tbody>");
    let _ = write!(
        table,
        r#"<tr class="c-table__row--heading">{}{}</tr>"#,
        cell("Platform"),
        cell("Tested Configurations")
    );

    for platform in platforms {
        table.push_str("<tr>");
        table.push_str(&cell(&platform_html(catalog, &platform.image)));

        let mut list = String::from("<ul>");
        for config in &platform.configs {
            list.push_str("<li>");
            for key in keys {
                let value = key.value(config);
                let _ = write!(
                    list,
                    "{}: {} ",
                    escape(key.title()),
                    escape(value.as_deref().unwrap_or(UNKNOWN))
                );
            }
            list.push_str("</li>");
        }
        list.push_str("</ul>");

        table.push_str(&cell(&list));
        table.push_str("</tr>");
    }

    table.push_str("</tbody>");
    table.push_str("</table></div>");
    table
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::options::group_by_platform;
    use crate::runners::tests::README;

    #[test]
    fn test_render_table() {
        let keys = vec![ConfigKey::field("Arch", "Arch")];
        let options = vec![
            json!({"Image": "ubuntu-22.04", "Arch": "x64"}),
            json!({"Image": "macos-13", "Arch": "x64"}),
            json!({"Image": "ubuntu-22.04"}),
        ];
        let platforms = group_by_platform(&options, &keys);
        let catalog = RunnerCatalog::parse(README);

        let html = render_table(&platforms, &keys, &catalog);

        assert_eq!(
            html,
            concat!(
                r#"<div class="g-table g-table--overflow"><table class="c-table"><tbody>"#,
                r#"<tr class="c-table__row--heading"><td class="c-table__cell">Platform</td><td class="c-table__cell">Tested Configurations</td></tr>"#,
                r#"<tr><td class="c-table__cell"><a href="https://github.com/actions/runner-images/blob/main/images/ubuntu/Ubuntu2204-Readme.md">Ubuntu 22.04</a></td>"#,
                r#"<td class="c-table__cell"><ul><li>Arch: x64 </li><li>Arch: unknown </li></ul></td></tr>"#,
                r#"<tr><td class="c-table__cell">macos-13</td><td class="c-table__cell"><ul><li>Arch: x64 </li></ul></td></tr>"#,
                "</tbody></table></div>"
            )
        );
    }

    #[test]
    fn test_render_empty_table() {
        let html = render_table(&[], &[], &RunnerCatalog::default());
        assert!(html.ends_with("Tested Configurations</td></tr></tbody></table></div>"));
    }
}
