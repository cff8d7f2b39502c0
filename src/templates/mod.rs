//! Built-in default theme
//!
//! These templates are embedded directly in the binary. They are used when the
//! templates directory does not provide a file of the same name, and for the
//! index and archive pages, which are always generated from the built-in
//! layouts.

/// Post page layout (`post.html`)
pub const POST_TEMPLATE: &str = include_str!("default/post.html");

/// Generic page layout, used for any other template name
pub const LAYOUT_TEMPLATE: &str = include_str!("default/layout.html");

/// Home page layout; `{{posts}}` receives the preview blocks
pub const INDEX_TEMPLATE: &str = include_str!("default/index.html");

/// Archive page layout; `{{posts}}` receives the preview blocks
pub const ARCHIVE_TEMPLATE: &str = include_str!("default/archive.html");

/// Stylesheet written to `css/style.css` when the site provides none
pub const DEFAULT_STYLESHEET: &str = include_str!("default/style.css");

/// Get the built-in template for a file name
pub fn default_template(name: &str) -> &'static str {
    match name {
        "post.html" => POST_TEMPLATE,
        "index.html" => INDEX_TEMPLATE,
        "archive.html" => ARCHIVE_TEMPLATE,
        _ => LAYOUT_TEMPLATE,
    }
}
