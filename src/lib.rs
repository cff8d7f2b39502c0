//! vibe-blog: a small static blog generator
//!
//! Markdown posts with YAML front matter are rendered through HTML templates
//! using a minimal `{{...}}` placeholder language, producing a site of post
//! pages, an index and an archive.

pub mod commands;
pub mod config;
pub mod content;
pub mod generator;
pub mod helpers;
pub mod templates;
pub mod theme;

use anyhow::Result;
use std::path::{Path, PathBuf};

/// The blog being built
#[derive(Debug, Clone)]
pub struct Blog {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Markdown sources
    pub posts_dir: PathBuf,
    /// Optional page templates
    pub templates_dir: PathBuf,
    /// Public (output) directory
    pub public_dir: PathBuf,
    /// Static assets copied verbatim
    pub static_dir: PathBuf,
    /// URL prefix for every site-internal link ("" or "/name")
    pub base_path: String,
}

impl Blog {
    /// Create a blog from a directory, reading `_config.yml` when present and
    /// picking the URL prefix from `BLOG_ENV`
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let env = std::env::var(config::ENV_VAR).ok();
        let base_path = config.base_path_for(env.as_deref());
        tracing::debug!("{}={:?}, base path {:?}", config::ENV_VAR, env, base_path);

        Ok(Self::with_config(base_dir, config, &base_path))
    }

    /// Create a blog with an explicit configuration and URL prefix
    pub fn with_config<P: AsRef<Path>>(
        base_dir: P,
        config: config::SiteConfig,
        base_path: &str,
    ) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();

        Self {
            posts_dir: base_dir.join(&config.posts_dir),
            templates_dir: base_dir.join(&config.templates_dir),
            public_dir: base_dir.join(&config.public_dir),
            static_dir: base_dir.join(&config.static_dir),
            base_path: config::normalize_base_path(base_path),
            config,
            base_dir,
        }
    }

    /// Build the whole site
    pub fn build(&self) -> Result<generator::BuildSummary> {
        commands::generate::run(self)
    }

    /// Remove the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }

    /// Create a new post source file
    pub fn new_post(&self, title: &str, tags: &[String]) -> Result<PathBuf> {
        commands::new::run(self, title, tags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_with_config_resolves_dirs() {
        let blog = Blog::with_config("/site", config::SiteConfig::default(), "sub/");
        assert_eq!(blog.posts_dir, PathBuf::from("/site/posts"));
        assert_eq!(blog.templates_dir, PathBuf::from("/site/templates"));
        assert_eq!(blog.public_dir, PathBuf::from("/site/public"));
        assert_eq!(blog.static_dir, PathBuf::from("/site/static"));
        assert_eq!(blog.base_path, "/sub");
    }

    #[test]
    fn test_new_reads_config_file() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("_config.yml"),
            "title: My Notes\npublic_dir: dist\n",
        )
        .unwrap();

        let blog = Blog::new(dir.path()).unwrap();
        assert_eq!(blog.config.title, "My Notes");
        assert_eq!(blog.public_dir, dir.path().join("dist"));
        assert_eq!(blog.posts_dir, dir.path().join("posts"));
    }

    #[test]
    fn test_new_rejects_broken_config() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("_config.yml"), "title: [oops\n").unwrap();
        assert!(Blog::new(dir.path()).is_err());
    }
}
