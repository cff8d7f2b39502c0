//! Site configuration (_config.yml)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Environment variable that switches the build to the deployed URL prefix
pub const ENV_VAR: &str = "BLOG_ENV";

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub tagline: String,
    pub copyright_year: String,

    // Directory
    pub posts_dir: String,
    pub templates_dir: String,
    pub public_dir: String,
    pub static_dir: String,

    // URL prefix used when BLOG_ENV=production
    pub base_path: String,

    // Listing
    pub index_limit: usize,
    pub excerpt_length: usize,

    #[serde(default)]
    pub highlight: HighlightConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Vignes.Vibe".to_string(),
            description: "Personal Blog".to_string(),
            tagline: "Thoughts, ideas, and insights from my journey".to_string(),
            copyright_year: "2025".to_string(),

            posts_dir: "posts".to_string(),
            templates_dir: "templates".to_string(),
            public_dir: "public".to_string(),
            static_dir: "static".to_string(),

            base_path: "/Vignes.Vibe".to_string(),

            index_limit: 5,
            excerpt_length: 200,

            highlight: HighlightConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
        let config: SiteConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Invalid configuration in {:?}", path))?;
        Ok(config)
    }

    /// URL prefix for the given value of `BLOG_ENV`
    pub fn base_path_for(&self, env: Option<&str>) -> String {
        match env {
            Some("production") => normalize_base_path(&self.base_path),
            _ => String::new(),
        }
    }
}

/// Give a prefix a leading slash and no trailing slash; "" and "/" become ""
pub fn normalize_base_path(path: &str) -> String {
    let trimmed = path.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub enable: bool,
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            enable: false,
            theme: "base16-ocean.dark".to_string(),
            line_number: false,
        }
    }
}
