//! List posts

use anyhow::Result;

use crate::content::{ContentLoader, Post};
use crate::Blog;

/// Print every post, newest first
pub fn run(blog: &Blog) -> Result<()> {
    let posts = ContentLoader::new(blog).load_posts();

    println!("Posts ({}):", posts.len());
    for post in &posts {
        println!("  {}", listing_line(post));
    }

    Ok(())
}

/// `date - title [slug]`; unparseable dates are shown as written
fn listing_line(post: &Post) -> String {
    let date = match &post.date {
        Some(date) => date.format("%Y-%m-%d").to_string(),
        None => post.raw_date().to_string(),
    };
    format!("{} - {} [{}]", date, post.title(), post.slug)
}
