//! Generator module - writes the static site into the public directory

mod output;
mod pages;

use anyhow::Result;
use std::path::Path;

use crate::content::Post;
use crate::templates::DEFAULT_STYLESHEET;
use crate::theme::ThemeLoader;
use crate::Blog;

pub use output::OutputWriter;
pub use pages::{render_archive_page, render_index_page, render_post_page, PageContext};

/// Posts directory inside the public directory
pub const POSTS_OUT_DIR: &str = "posts";

/// Stylesheet location inside the public directory
pub const STYLESHEET_PATH: &str = "css/style.css";

/// What a build produced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildSummary {
    /// Post pages written
    pub posts: usize,
    /// Static files copied
    pub assets: usize,
}

/// Static site generator
pub struct Generator {
    context: PageContext,
    theme_loader: ThemeLoader,
    output: OutputWriter,
}

impl Generator {
    /// Create a new generator
    pub fn new(blog: &Blog) -> Self {
        Self {
            context: PageContext::from_blog(blog),
            theme_loader: ThemeLoader::new(&blog.templates_dir, &blog.static_dir),
            output: OutputWriter::new(&blog.public_dir),
        }
    }

    /// Generate the entire site from already loaded posts (newest first)
    pub fn generate(&self, posts: &[Post]) -> Result<BuildSummary> {
        self.output.ensure_dir("")?;
        self.output.ensure_dir(POSTS_OUT_DIR)?;

        // Static files first so they never replace a generated page
        let assets = self.copy_assets()?;

        self.generate_post_pages(posts)?;
        self.generate_index_page(posts)?;
        self.generate_archive_page(posts)?;

        tracing::info!("Generated {} posts", posts.len());

        Ok(BuildSummary {
            posts: posts.len(),
            assets,
        })
    }

    fn generate_post_pages(&self, posts: &[Post]) -> Result<()> {
        // Read once per build so template edits show up on the next rebuild
        let template = self.theme_loader.load("post.html");

        for post in posts {
            let html = render_post_page(&template, post, &self.context);
            let relative = Path::new(POSTS_OUT_DIR).join(format!("{}.html", post.slug));
            self.output.write(relative, &html)?;
        }

        Ok(())
    }

    fn generate_index_page(&self, posts: &[Post]) -> Result<()> {
        let html = render_index_page(posts, &self.context);
        self.output.write("index.html", &html)?;
        Ok(())
    }

    fn generate_archive_page(&self, posts: &[Post]) -> Result<()> {
        let html = render_archive_page(posts, &self.context);
        self.output.write("archive.html", &html)?;
        Ok(())
    }

    /// Copy the static directory, then supply the default stylesheet if the
    /// site did not ship one
    fn copy_assets(&self) -> Result<usize> {
        let copied = self.theme_loader.copy_static(self.output.root())?;

        if !self.output.exists(STYLESHEET_PATH) {
            self.output.write(STYLESHEET_PATH, DEFAULT_STYLESHEET)?;
        }

        Ok(copied)
    }
}
