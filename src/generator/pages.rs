//! Page assembly - turns posts into complete HTML documents
//!
//! Everything here is pure: the generator hands in loaded posts and parsed
//! templates and writes out whatever comes back.

use crate::content::Post;
use crate::helpers::{html_escape, post_url};
use crate::templates::{ARCHIVE_TEMPLATE, INDEX_TEMPLATE};
use crate::theme::{Context, Template};
use crate::Blog;

const INDEX_EMPTY: &str =
    "<p>No posts yet. Create your first post in the <code>posts</code> directory!</p>";
const ARCHIVE_EMPTY: &str = "<p>No posts yet.</p>";

/// Site-wide values available to every page
#[derive(Debug, Clone)]
pub struct PageContext {
    pub base_path: String,
    pub site_title: String,
    pub description: String,
    pub tagline: String,
    pub copyright_year: String,
    pub index_limit: usize,
}

impl PageContext {
    pub fn from_blog(blog: &Blog) -> Self {
        Self {
            base_path: blog.base_path.clone(),
            site_title: blog.config.title.clone(),
            description: blog.config.description.clone(),
            tagline: blog.config.tagline.clone(),
            copyright_year: blog.config.copyright_year.clone(),
            index_limit: blog.config.index_limit,
        }
    }

    /// Template data shared by all pages; configured text is escaped like
    /// front matter
    fn base_context(&self) -> Context {
        Context::new()
            .with("basePath", &self.base_path)
            .with("siteTitle", html_escape(&self.site_title))
            .with("copyrightYear", html_escape(&self.copyright_year))
    }

    fn listing_context(&self, posts_html: String) -> Context {
        self.base_context()
            .with("description", html_escape(&self.description))
            .with("tagline", html_escape(&self.tagline))
            .with("posts", posts_html)
    }
}

/// Render a post through the post template
pub fn render_post_page(template: &Template, post: &Post, ctx: &PageContext) -> String {
    let tags: Vec<String> = post.tags().iter().map(|t| html_escape(t)).collect();

    let context = ctx
        .base_context()
        .with("title", html_escape(post.title()))
        .with("date", html_escape(post.raw_date()))
        .with("formattedDate", html_escape(&post.formatted_date()))
        .with("tags", tags)
        .with("content", &post.content);

    template.render(&context)
}

/// Home page: the newest posts as previews with a read-more link
pub fn render_index_page(posts: &[Post], ctx: &PageContext) -> String {
    let previews: String = posts
        .iter()
        .take(ctx.index_limit)
        .map(|post| index_preview(post, &ctx.base_path))
        .collect();

    Template::parse(INDEX_TEMPLATE)
        .render(&ctx.listing_context(or_placeholder(previews, INDEX_EMPTY)))
}

/// Archive page: every post as a preview
pub fn render_archive_page(posts: &[Post], ctx: &PageContext) -> String {
    let previews: String = posts
        .iter()
        .map(|post| archive_preview(post, &ctx.base_path))
        .collect();

    Template::parse(ARCHIVE_TEMPLATE)
        .render(&ctx.listing_context(or_placeholder(previews, ARCHIVE_EMPTY)))
}

fn or_placeholder(previews: String, placeholder: &str) -> String {
    if previews.is_empty() {
        placeholder.to_string()
    } else {
        previews
    }
}

fn tag_spans(post: &Post) -> String {
    post.tags()
        .iter()
        .map(|tag| format!(r#"<span class="tag">{}</span>"#, html_escape(tag)))
        .collect()
}

fn index_preview(post: &Post, base_path: &str) -> String {
    let url = post_url(base_path, &post.slug);
    format!(
        r#"
      <article class="post-preview">
        <h2><a href="{url}">{title}</a></h2>
        <div class="post-meta">
          <time datetime="{date}">{formatted}</time>
          {tags}
        </div>
        <p class="excerpt">{excerpt}</p>
        <a href="{url}" class="read-more">Read more →</a>
      </article>
    "#,
        url = url,
        title = html_escape(post.title()),
        date = html_escape(post.raw_date()),
        formatted = html_escape(&post.formatted_date()),
        tags = tag_spans(post),
        excerpt = post.excerpt,
    )
}

fn archive_preview(post: &Post, base_path: &str) -> String {
    format!(
        r#"
      <article class="archive-post">
        <h3><a href="{url}">{title}</a></h3>
        <div class="post-meta">
          <time datetime="{date}">{formatted}</time>
          {tags}
        </div>
        <p class="excerpt">{excerpt}</p>
      </article>
    "#,
        url = post_url(base_path, &post.slug),
        title = html_escape(post.title()),
        date = html_escape(post.raw_date()),
        formatted = html_escape(&post.formatted_date()),
        tags = tag_spans(post),
        excerpt = post.excerpt,
    )
}
