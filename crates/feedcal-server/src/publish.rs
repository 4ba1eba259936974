//! Publication of the rendered feed.
//!
//! A [`FeedSink`] receives the complete document text once per run. The file
//! sink replaces its target atomically: readers see either the previous feed
//! or the new one, never a partial write.

use std::fs::{self, Permissions};
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::error::{ServerError, ServerResult};

/// Destination of a rendered feed.
pub trait FeedSink: Send + Sync {
    /// Human-readable description of where the feed goes.
    fn target(&self) -> String;

    /// Publishes the full feed text, replacing any previous one.
    fn publish(&self, feed: &str) -> ServerResult<()>;
}

/// Publishes to a file through a temp file and rename.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    /// Creates a sink for the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the target path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn directory(&self) -> &Path {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        }
    }

    /// Mode for the new feed: the current target's, or world-readable for a
    /// first publish.
    fn permissions(&self) -> Option<Permissions> {
        match fs::metadata(&self.path) {
            Ok(meta) => Some(meta.permissions()),
            Err(_) => new_feed_permissions(),
        }
    }
}

#[cfg(unix)]
fn new_feed_permissions() -> Option<Permissions> {
    use std::os::unix::fs::PermissionsExt;

    Some(Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn new_feed_permissions() -> Option<Permissions> {
    None
}

impl FeedSink for FileSink {
    fn target(&self) -> String {
        self.path.display().to_string()
    }

    fn publish(&self, feed: &str) -> ServerResult<()> {
        let err = |e: std::io::Error| ServerError::publish(&self.path, e);

        // same directory as the target so the rename stays on one filesystem
        let mut tmp = NamedTempFile::new_in(self.directory()).map_err(err)?;
        tmp.write_all(feed.as_bytes()).map_err(err)?;
        // temp files are created owner-only
        if let Some(permissions) = self.permissions() {
            tmp.as_file().set_permissions(permissions).map_err(err)?;
        }
        tmp.as_file().sync_all().map_err(err)?;
        debug!(tmp = %tmp.path().display(), "Wrote feed to temp file");

        tmp.persist(&self.path).map_err(|e| err(e.error))?;
        info!(path = %self.path.display(), bytes = feed.len(), "Feed published");
        Ok(())
    }
}

/// Writes the feed to standard output.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutSink;

impl FeedSink for StdoutSink {
    fn target(&self) -> String {
        "stdout".to_string()
    }

    fn publish(&self, feed: &str) -> ServerResult<()> {
        let mut out = std::io::stdout().lock();
        out.write_all(feed.as_bytes())?;
        out.flush()?;
        Ok(())
    }
}
