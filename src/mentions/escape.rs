//! HTML escaping for rendering display text

use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

/// Characters that need escaping in HTML text and attribute values.
static HTML_SPECIAL: Lazy<Regex> = Lazy::new(|| Regex::new(r#"[&<>"'`]"#).unwrap());

/// Escape ampersands, angle brackets, both quote styles and backticks for
/// safe inclusion in HTML.
///
/// Text without special characters is returned as-is without allocating.
pub fn escape_html(text: &str) -> Cow<'_, str> {
    if !HTML_SPECIAL.is_match(text) {
        return Cow::Borrowed(text);
    }

    HTML_SPECIAL.replace_all(text, |captures: &regex::Captures<'_>| {
        match &captures[0] {
            "&" => "&amp;",
            "<" => "&lt;",
            ">" => "&gt;",
            "\"" => "&quot;",
            "'" => "&#x27;",
            _ => "&#x60;",
        }
    })
}
