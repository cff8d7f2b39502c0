//! Output writer - persists generated files under the public directory

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Writes generated documents below a root directory
pub struct OutputWriter {
    root: PathBuf,
}

impl OutputWriter {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create a directory (relative to the root) and its parents; no-op if it
    /// already exists
    pub fn ensure_dir<P: AsRef<Path>>(&self, relative: P) -> Result<PathBuf> {
        let dir = self.root.join(relative);
        fs::create_dir_all(&dir).with_context(|| format!("Failed to create dir {:?}", dir))?;
        Ok(dir)
    }

    /// Write `contents` to a file relative to the root, replacing any previous
    /// file. Parent directories are created as needed.
    pub fn write<P: AsRef<Path>>(&self, relative: P, contents: &str) -> Result<PathBuf> {
        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create dir {:?}", parent))?;
        }
        fs::write(&path, contents).with_context(|| format!("Failed to write {:?}", path))?;
        tracing::debug!("Generated: {:?}", path);
        Ok(path)
    }

    /// Whether a file already exists relative to the root
    pub fn exists<P: AsRef<Path>>(&self, relative: P) -> bool {
        self.root.join(relative).exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_ensure_dir_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let writer = OutputWriter::new(dir.path().join("public"));

        let posts = writer.ensure_dir("posts").unwrap();
        assert!(posts.is_dir());
        writer.ensure_dir("posts").unwrap();
        assert!(posts.is_dir());
    }

    #[test]
    fn test_write_overwrites() {
        let dir = TempDir::new().unwrap();
        let writer = OutputWriter::new(dir.path());

        writer.write("a/b/index.html", "first version").unwrap();
        let path = writer.write("a/b/index.html", "second").unwrap();

        assert_eq!(fs::read_to_string(path).unwrap(), "second");
        assert!(writer.exists("a/b/index.html"));
    }

    #[test]
    fn test_write_failure_reports_path() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("blocker"), "file").unwrap();
        let writer = OutputWriter::new(dir.path().join("blocker"));

        let err = writer.write("index.html", "x").unwrap_err();
        assert!(format!("{:#}", err).contains("blocker"));
    }
}
