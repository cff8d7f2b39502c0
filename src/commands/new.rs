//! Create a new post

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::PathBuf;

use crate::content::FrontMatter;
use crate::Blog;

/// Write `<posts_dir>/<slug>.md` with front matter for `title`, dated today.
/// Refuses to overwrite an existing post.
pub fn run(blog: &Blog, title: &str, tags: &[String]) -> Result<PathBuf> {
    let slug = slug::slugify(title);
    if slug.is_empty() {
        bail!("Cannot derive a file name from title {:?}", title);
    }

    fs::create_dir_all(&blog.posts_dir)
        .with_context(|| format!("Failed to create dir {:?}", blog.posts_dir))?;

    let file_path = blog.posts_dir.join(format!("{}.md", slug));
    if file_path.exists() {
        bail!("File already exists: {:?}", file_path);
    }

    let today = chrono::Local::now().format("%Y-%m-%d").to_string();
    let content = scaffold(title, &today, tags)?;

    fs::write(&file_path, content).with_context(|| format!("Failed to write {:?}", file_path))?;
    tracing::info!("Created: {:?}", file_path);

    Ok(file_path)
}

fn scaffold(title: &str, date: &str, tags: &[String]) -> Result<String> {
    let front_matter = FrontMatter {
        title: Some(title.to_string()),
        date: Some(date.to_string()),
        tags: tags.to_vec(),
        ..Default::default()
    };
    let yaml = serde_yaml::to_string(&front_matter)?;
    Ok(format!("---\n{}---\n\n", yaml))
}
