//! Link rewriting and the "original page" footer.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use url::Url;

/// `href` attribute of an anchor: prefix, quote, value.
static ANCHOR_HREF_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)(<a\b[^>]*?\shref\s*=\s*)(?:"([^"]*)"|'([^']*)')"#).unwrap()
});

/// Point anchors authored for this site at the borrowed project instead.
///
/// Each anchor's `href` is resolved against `page_url`, as the browser does
/// once the snippet sits in the page. When the resolved URL contains
/// `/{doc_base}/`, the first occurrence is replaced with `/{project}/` and
/// the anchor gets the absolute result. Other anchors and attributes are
/// left untouched.
#[must_use]
pub fn rewrite_links(html: &str, page_url: &Url, doc_base: &str, project: &str) -> String {
    let local = format!("/{doc_base}/");
    let target = format!("/{project}/");

    ANCHOR_HREF_RE
        .replace_all(html, |caps: &Captures<'_>| {
            let prefix = &caps[1];
            let (quote, href) = match (caps.get(2), caps.get(3)) {
                (Some(value), _) => ('"', value.as_str()),
                (None, Some(value)) => ('\'', value.as_str()),
                (None, None) => return caps[0].to_owned(),
            };
            let Ok(resolved) = page_url.join(&href.replace("&amp;", "&")) else {
                return caps[0].to_owned();
            };
            if !resolved.as_str().contains(&local) {
                return caps[0].to_owned();
            }
            let href = resolved.as_str().replacen(&local, &target, 1);
            format!("{prefix}{quote}{}{quote}", escape_attr(&href))
        })
        .into_owned()
}

/// Footer linking to the page a snippet was taken from.
#[must_use]
pub fn original_link(url: &str) -> String {
    format!(
        r#"<div id="grabbed-example-link" style="text-align:right;"><a href="{}" class="b-link--dotted">Go to original page...</a></div>"#,
        escape_attr(url)
    )
}

/// Escape a value for use inside a quoted attribute.
fn escape_attr(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
