//! Content loader - loads posts from the posts directory

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::{newest_first, ContentError, FrontMatter, MarkdownRenderer, Post};
use crate::helpers::{parse_date_string, plain_excerpt};
use crate::Blog;

/// Suffix a file name must end with to be loaded as a post
pub const POST_EXTENSION: &str = ".md";

/// Loads posts from the posts directory
pub struct ContentLoader<'a> {
    blog: &'a Blog,
    renderer: MarkdownRenderer,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(blog: &'a Blog) -> Self {
        let renderer = MarkdownRenderer::from_config(&blog.config.highlight);
        Self { blog, renderer }
    }

    /// Load every post, newest first.
    ///
    /// Never fails: an unreadable directory yields no posts and a bad file is
    /// skipped, both with a logged reason.
    pub fn load_posts(&self) -> Vec<Post> {
        let posts_dir = &self.blog.posts_dir;

        let sources = match list_sources(posts_dir) {
            Ok(sources) => sources,
            Err(e) => {
                tracing::error!("Error loading posts from {:?}: {}", posts_dir, e);
                return Vec::new();
            }
        };

        let mut posts = Vec::with_capacity(sources.len());
        for path in sources {
            match self.load_post(&path) {
                Ok(post) => posts.push(post),
                Err(e) => tracing::warn!("Skipping post: {}", e),
            }
        }

        // Stable: equal dates keep file name order
        posts.sort_by(newest_first);

        tracing::debug!("Loaded {} posts from {:?}", posts.len(), posts_dir);
        posts
    }

    /// Load a single post from a file
    pub fn load_post(&self, path: &Path) -> Result<Post, ContentError> {
        let slug = slug_for(path).ok_or_else(|| ContentError::EmptySlug(path.to_path_buf()))?;

        let text = fs::read_to_string(path).map_err(|source| ContentError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let (front_matter, body) =
            FrontMatter::parse(&text).map_err(|source| ContentError::FrontMatter {
                path: path.to_path_buf(),
                source,
            })?;

        let content = self
            .renderer
            .render(body)
            .map_err(|e| ContentError::Markdown {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        let excerpt = plain_excerpt(body, self.blog.config.excerpt_length);

        let date = front_matter.date.as_deref().and_then(parse_date_string);
        if date.is_none() {
            tracing::warn!(
                "Post {:?} has no valid date ({:?}); it will be listed last",
                path,
                front_matter.date
            );
        }

        Ok(Post {
            slug,
            source: path.to_path_buf(),
            front_matter,
            date,
            content,
            excerpt,
        })
    }
}

/// Direct children of `dir` whose names end with `.md`, in file name order.
///
/// Only a failure to read `dir` itself is an error; an entry that cannot be
/// inspected (a dangling symlink, say) is skipped.
fn list_sources(dir: &Path) -> io::Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            "directory does not exist",
        ));
    }

    let mut sources = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => return Err(e.into()),
            Err(e) => {
                match e.path() {
                    Some(path) if is_post_name(path) => {
                        tracing::warn!("Skipping post {:?}: {}", path, e)
                    }
                    path => tracing::debug!("Ignoring unreadable entry {:?}: {}", path, e),
                }
                continue;
            }
        };

        let path = entry.path();
        if is_post_name(path) && path.is_file() {
            sources.push(path.to_path_buf());
        }
    }

    Ok(sources)
}

fn is_post_name(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.ends_with(POST_EXTENSION))
        .unwrap_or(false)
}

/// File name without the `.md` suffix; None when nothing is left
fn slug_for(path: &Path) -> Option<String> {
    let name = path.file_name()?.to_str()?;
    let slug = name.strip_suffix(POST_EXTENSION)?;
    if slug.is_empty() {
        None
    } else {
        Some(slug.to_string())
    }
}
