//! Search results and their rendering.

use std::fmt::Write;

use serde::Deserialize;

/// One search result as returned by the endpoint.
///
/// `html_title` and `html_text` are server-rendered HTML (with match
/// highlighting) and are inserted as-is.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    pub url: String,
    pub html_title: String,
    pub html_text: String,
}

/// Render results as the dropdown list.
#[must_use]
pub fn render_results(hits: &[SearchHit]) -> String {
    let mut html = String::from(r#"<ul class="c-search__list">"#);
    for hit in hits {
        let _ = write!(
            html,
            r#"<li class="c-search__item"><a href="{}"><h5>{}</h5><p>{}</p></a></li>"#,
            escape_attr(&hit.url),
            hit.html_title,
            hit.html_text
        );
    }
    html.push_str("</ul>");
    html
}

fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
