//! HTML and text helper functions

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// `#` to `######` followed by whitespace, anywhere in the text
    static ref HEADING_MARKER: Regex = Regex::new(r"#{1,6}\s+").expect("valid heading regex");
}

/// Escape HTML special characters
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Remove heading and emphasis markers from markdown source
pub fn strip_markdown_markers(markdown: &str) -> String {
    HEADING_MARKER
        .replace_all(markdown, "")
        .replace("**", "")
        .replace('*', "")
}

/// Plain-text excerpt of a markdown body.
///
/// The first `length` characters of the marker-stripped body, followed by
/// `...` only when something was cut off.
pub fn plain_excerpt(markdown: &str, length: usize) -> String {
    let plain = strip_markdown_markers(markdown);
    if plain.chars().count() > length {
        let mut excerpt: String = plain.chars().take(length).collect();
        excerpt.push_str("...");
        excerpt
    } else {
        plain
    }
}
