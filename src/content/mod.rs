//! Content module - handles posts and content processing

mod frontmatter;
pub mod loader;
mod markdown;
mod post;

use std::path::PathBuf;
use thiserror::Error;

pub use frontmatter::FrontMatter;
pub use loader::ContentLoader;
pub use markdown::MarkdownRenderer;
pub use post::{newest_first, Post, UNTITLED};

/// Why a single post could not be loaded
#[derive(Error, Debug)]
pub enum ContentError {
    #[error("Failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid front matter in {path:?}: {source}")]
    FrontMatter {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Failed to render markdown in {path:?}: {message}")]
    Markdown { path: PathBuf, message: String },

    #[error("Cannot derive a slug from {0:?}")]
    EmptySlug(PathBuf),
}
