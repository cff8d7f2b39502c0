//! Build the static site, optionally watching for changes

use anyhow::Result;
use notify::RecursiveMode;
use notify_debouncer_mini::{new_debouncer, DebouncedEvent};
use std::path::Path;
use std::sync::mpsc::channel;
use std::time::Duration;

use crate::content::ContentLoader;
use crate::generator::{BuildSummary, Generator};
use crate::Blog;

/// Quiet period before a batch of file events triggers a rebuild
const DEBOUNCE: Duration = Duration::from_millis(300);

/// Run one full build
pub fn run(blog: &Blog) -> Result<BuildSummary> {
    let start = std::time::Instant::now();

    let posts = ContentLoader::new(blog).load_posts();
    tracing::info!("Loaded {} posts", posts.len());

    let summary = Generator::new(blog).generate(&posts)?;

    let duration = start.elapsed();
    tracing::info!("Generated in {:.2}s", duration.as_secs_f64());

    Ok(summary)
}

/// Run one build for watch mode: a failure is logged and watching goes on
pub fn run_reporting(blog: &Blog) -> Option<BuildSummary> {
    match run(blog) {
        Ok(summary) => Some(summary),
        Err(e) => {
            tracing::error!("Build failed: {:#}", e);
            None
        }
    }
}

/// Watch posts and templates and rebuild on change. Runs until the watcher
/// shuts down.
pub async fn watch(blog: &Blog) -> Result<()> {
    let blog = blog.clone();
    tokio::task::spawn_blocking(move || watch_blocking(&blog)).await?
}

fn watch_blocking(blog: &Blog) -> Result<()> {
    let (tx, rx) = channel();

    let mut debouncer = new_debouncer(DEBOUNCE, tx)?;

    for dir in [&blog.posts_dir, &blog.templates_dir] {
        if dir.exists() {
            debouncer.watcher().watch(dir, RecursiveMode::Recursive)?;
            tracing::debug!("Watching: {:?}", dir);
        } else {
            tracing::warn!("Not watching {:?}: directory does not exist", dir);
        }
    }

    tracing::info!("Watching for changes. Press Ctrl+C to stop.");

    loop {
        match rx.recv() {
            Ok(Ok(events)) => {
                let changed = relevant_paths(blog, &events);
                if changed.is_empty() {
                    continue;
                }

                for path in &changed {
                    tracing::info!("File changed: {}", path.display());
                }

                tracing::info!("Rebuilding...");
                run_reporting(blog);

                // Changes made while building are covered by this build
                let skipped = rx.try_iter().count();
                if skipped > 0 {
                    tracing::debug!("Discarded {} queued event batches", skipped);
                }
            }
            Ok(Err(e)) => {
                tracing::error!("Watch error: {:?}", e);
            }
            Err(e) => {
                tracing::error!("Channel error: {:?}", e);
                break;
            }
        }
    }

    Ok(())
}

fn relevant_paths<'e>(blog: &Blog, events: &'e [DebouncedEvent]) -> Vec<&'e Path> {
    events
        .iter()
        .map(|e| e.path.as_path())
        .filter(|path| is_watched_file(blog, path))
        .collect()
}

/// `.md` files under the posts directory and `.html` files under the
/// templates directory, ignoring dotfiles
fn is_watched_file(blog: &Blog, path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    if name.starts_with('.') {
        return false;
    }

    (path.starts_with(&blog.posts_dir) && name.ends_with(".md"))
        || (path.starts_with(&blog.templates_dir) && name.ends_with(".html"))
}
