//! Fragment extraction by element id.

use regex::{Regex, RegexBuilder};

/// Elements that never have a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Extract the element whose `id` is `id`, including its own tags.
///
/// Nested elements with the same tag name are balanced. An element that is
/// never closed extends to the end of the document. Returns `None` when no
/// element carries the id.
#[must_use]
pub fn extract_fragment(html: &str, id: &str) -> Option<String> {
    let escaped = regex::escape(id);
    let opening = RegexBuilder::new(&format!(
        r#"<([a-z][a-z0-9-]*)\b[^>]*?\sid\s*=\s*(?:"{escaped}"|'{escaped}'|{escaped})(?:\s[^>]*)?/?>"#
    ))
    .case_insensitive(true)
    .build()
    .ok()?;

    let found = opening.captures(html)?;
    let whole = found.get(0)?;
    let tag = found.get(1)?.as_str().to_ascii_lowercase();

    if whole.as_str().ends_with("/>") || VOID_ELEMENTS.contains(&tag.as_str()) {
        return Some(whole.as_str().to_owned());
    }

    let end = closing_position(html, &tag, whole.end()).unwrap_or(html.len());
    Some(html[whole.start()..end].to_owned())
}

/// Byte offset just past the tag closing the element opened before `from`.
fn closing_position(html: &str, tag: &str, from: usize) -> Option<usize> {
    let same_tag: Regex = RegexBuilder::new(&format!(r"<(/?){tag}\b[^>]*?(/?)>"))
        .case_insensitive(true)
        .build()
        .ok()?;

    let mut depth = 1usize;
    for caps in same_tag.captures_iter(&html[from..]) {
        let is_closing = caps.get(1).is_some_and(|m| !m.is_empty());
        let self_closing = caps.get(2).is_some_and(|m| !m.is_empty());
        if is_closing {
            depth -= 1;
            if depth == 0 {
                return caps.get(0).map(|m| from + m.end());
            }
        } else if !self_closing {
            depth += 1;
        }
    }
    None
}
