//! Theme loader - loads page templates and copies static assets
//!
//! A theme is a templates directory (`post.html`, ...) plus a static
//! directory whose files are copied verbatim into the public directory.
//! Missing templates are never fatal: the built-in default is used instead.

use anyhow::{Context as _, Result};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::Template;
use crate::templates;

/// Theme loader - resolves templates and copies assets
pub struct ThemeLoader {
    /// Directory holding user templates
    templates_dir: PathBuf,
    /// Directory holding static assets (css, images, ...)
    static_dir: PathBuf,
}

impl ThemeLoader {
    pub fn new<P: AsRef<Path>, Q: AsRef<Path>>(templates_dir: P, static_dir: Q) -> Self {
        Self {
            templates_dir: templates_dir.as_ref().to_path_buf(),
            static_dir: static_dir.as_ref().to_path_buf(),
        }
    }

    /// Read a template's source by file name, falling back to the built-in
    /// default when it cannot be read
    pub fn load_source(&self, name: &str) -> String {
        let path = self.templates_dir.join(name);
        match fs::read_to_string(&path) {
            Ok(source) => {
                tracing::debug!("Loaded template {:?}", path);
                source
            }
            Err(e) => {
                tracing::warn!(
                    "Error loading template {}: {} (using built-in default)",
                    name,
                    e
                );
                templates::default_template(name).to_string()
            }
        }
    }

    /// Load and parse a template by file name
    pub fn load(&self, name: &str) -> Template {
        Template::parse(&self.load_source(name))
    }

    /// Copy every static file into the public directory, keeping relative
    /// paths. Files under `_`- or `.`-prefixed components are skipped.
    /// Returns the number of files copied.
    pub fn copy_static(&self, public_dir: &Path) -> Result<usize> {
        if !self.static_dir.exists() {
            tracing::debug!("No static directory at {:?}", self.static_dir);
            return Ok(0);
        }

        let mut copied = 0;
        for entry in WalkDir::new(&self.static_dir)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| match e {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::warn!("Skipping static entry {:?}: {}", e.path(), e);
                    None
                }
            })
        {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let relative = path.strip_prefix(&self.static_dir)?;
            let hidden = relative.components().any(|c| {
                c.as_os_str()
                    .to_str()
                    .map(|s| s.starts_with('_') || s.starts_with('.'))
                    .unwrap_or(false)
            });
            if hidden {
                continue;
            }

            let dest = public_dir.join(relative);
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create dir {:?}", parent))?;
            }
            fs::copy(path, &dest)
                .with_context(|| format!("Failed to copy {:?} -> {:?}", path, dest))?;
            tracing::debug!("Copied: {:?} -> {:?}", path, dest);
            copied += 1;
        }

        Ok(copied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::Context;
    use tempfile::TempDir;

    #[test]
    fn test_load_user_template() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("post.html"), "<h1>{{title}}</h1>").unwrap();

        let loader = ThemeLoader::new(dir.path(), dir.path().join("static"));
        let html = loader
            .load("post.html")
            .render(&Context::new().with("title", "Hi"));
        assert_eq!(html, "<h1>Hi</h1>");
    }

    #[test]
    fn test_missing_template_falls_back_to_default() {
        let dir = TempDir::new().unwrap();
        let loader = ThemeLoader::new(dir.path().join("nope"), dir.path().join("static"));

        let source = loader.load_source("post.html");
        assert_eq!(source, templates::default_template("post.html"));

        let context = Context::new()
            .with("title", "Fallback Title")
            .with("content", "<p>Body here</p>");
        let html = loader.load("post.html").render(&context);
        assert!(html.contains("Fallback Title"));
        assert!(html.contains("<p>Body here</p>"));
    }

    #[test]
    fn test_unknown_template_name_uses_generic_layout() {
        let dir = TempDir::new().unwrap();
        let loader = ThemeLoader::new(dir.path(), dir.path());
        let html = loader
            .load("about.html")
            .render(&Context::new().with("content", "<p>About</p>"));
        assert!(html.contains("<p>About</p>"));
        assert!(html.starts_with("<!DOCTYPE html>"));
    }

    #[test]
    fn test_copy_static() {
        let dir = TempDir::new().unwrap();
        let static_dir = dir.path().join("static");
        let public_dir = dir.path().join("public");
        fs::create_dir_all(static_dir.join("css")).unwrap();
        fs::create_dir_all(static_dir.join("_drafts")).unwrap();
        fs::write(static_dir.join("css/style.css"), "body{}").unwrap();
        fs::write(static_dir.join("favicon.ico"), "icon").unwrap();
        fs::write(static_dir.join("_drafts/skip.txt"), "x").unwrap();
        fs::write(static_dir.join(".hidden"), "x").unwrap();

        let loader = ThemeLoader::new(dir.path().join("templates"), &static_dir);
        let copied = loader.copy_static(&public_dir).unwrap();

        assert_eq!(copied, 2);
        assert_eq!(
            fs::read_to_string(public_dir.join("css/style.css")).unwrap(),
            "body{}"
        );
        assert!(public_dir.join("favicon.ico").exists());
        assert!(!public_dir.join("_drafts/skip.txt").exists());
        assert!(!public_dir.join(".hidden").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_copy_static_skips_unreadable_entries() {
        let dir = TempDir::new().unwrap();
        let static_dir = dir.path().join("static");
        let public_dir = dir.path().join("public");
        fs::create_dir_all(&static_dir).unwrap();
        fs::write(static_dir.join("robots.txt"), "ok").unwrap();
        std::os::unix::fs::symlink(dir.path().join("missing"), static_dir.join("broken.png"))
            .unwrap();

        let loader = ThemeLoader::new(dir.path().join("templates"), &static_dir);
        assert_eq!(loader.copy_static(&public_dir).unwrap(), 1);
        assert!(public_dir.join("robots.txt").is_file());
        assert!(!public_dir.join("broken.png").exists());
    }

    #[test]
    fn test_copy_static_without_directory() {
        let dir = TempDir::new().unwrap();
        let loader = ThemeLoader::new(dir.path(), dir.path().join("missing"));
        assert_eq!(loader.copy_static(&dir.path().join("public")).unwrap(), 0);
    }
}
