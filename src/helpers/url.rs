//! URL helper functions

/// Build a site-internal URL under the base path
///
/// # Examples
/// ```ignore
/// url_for("/sub", "css/style.css") // -> "/sub/css/style.css"
/// url_for("", "/index.html")       // -> "/index.html"
/// ```
pub fn url_for(base_path: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_path.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// URL of a post page
pub fn post_url(base_path: &str, slug: &str) -> String {
    url_for(base_path, &format!("posts/{}.html", slug))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_for_root() {
        assert_eq!(url_for("", "index.html"), "/index.html");
        assert_eq!(url_for("", "/archive.html"), "/archive.html");
    }

    #[test]
    fn test_url_for_sub_path() {
        assert_eq!(url_for("/sub", "css/style.css"), "/sub/css/style.css");
        assert_eq!(url_for("/sub/", "/index.html"), "/sub/index.html");
    }

    #[test]
    fn test_post_url() {
        assert_eq!(post_url("", "hello-world"), "/posts/hello-world.html");
        assert_eq!(post_url("/sub", "a"), "/sub/posts/a.html");
    }
}
