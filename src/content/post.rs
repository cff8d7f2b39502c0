//! Post model

use chrono::{DateTime, FixedOffset};
use std::cmp::Ordering;
use std::path::PathBuf;

use super::FrontMatter;
use crate::helpers;

/// Title used when the front matter has none
pub const UNTITLED: &str = "Untitled";

/// A blog post
#[derive(Debug, Clone)]
pub struct Post {
    /// File name without the `.md` suffix; names the output file
    pub slug: String,

    /// Full source file path
    pub source: PathBuf,

    /// Parsed front matter
    pub front_matter: FrontMatter,

    /// Publication date, when the front matter has a parseable one
    pub date: Option<DateTime<FixedOffset>>,

    /// Rendered HTML content
    pub content: String,

    /// Plain-text excerpt of the markdown body
    pub excerpt: String,
}

impl Post {
    /// Post title, or "Untitled"
    pub fn title(&self) -> &str {
        self.front_matter.title.as_deref().unwrap_or(UNTITLED)
    }

    /// The date exactly as written in the front matter
    pub fn raw_date(&self) -> &str {
        self.front_matter.date.as_deref().unwrap_or("")
    }

    /// Long-form date for display
    pub fn formatted_date(&self) -> String {
        match &self.date {
            Some(date) => helpers::long_date(date),
            None => helpers::display_date(self.front_matter.date.as_deref()),
        }
    }

    pub fn tags(&self) -> &[String] {
        &self.front_matter.tags
    }
}

/// Newest first; posts without a date go last
pub fn newest_first(a: &Post, b: &Post) -> Ordering {
    match (&a.date, &b.date) {
        (Some(a), Some(b)) => b.cmp(a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
