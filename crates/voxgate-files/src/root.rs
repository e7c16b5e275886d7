use std::path::{Component, Path, PathBuf};
use std::time::UNIX_EPOCH;

use crate::error::{FileError, Result};
use crate::serve::ServedFile;
use crate::types::DirectoryEntry;

/// A directory exposed read-only by the gateway
///
/// The path is absolute and lexically normalized once, at construction.
/// The directory does not have to exist yet; listing a missing directory is
/// a per-request error.
#[derive(Debug, Clone)]
pub struct FileRoot {
    path: PathBuf,
}

impl FileRoot {
    /// Anchor `dir` against the current directory and normalize it
    pub fn new(dir: &Path) -> std::io::Result<Self> {
        let absolute = std::path::absolute(dir)?;
        Ok(Self {
            path: normalize(&absolute),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Resolve a caller-supplied file name inside this root
    ///
    /// Purely lexical: nothing on disk is touched. Names that escape the
    /// root (`../x`, absolute paths) or resolve to the root itself are
    /// rejected.
    pub fn resolve(&self, name: &str) -> Result<PathBuf> {
        let candidate = normalize(&self.path.join(name));

        if candidate == self.path || !candidate.starts_with(&self.path) {
            tracing::warn!(root = %self.path.display(), name, "rejected path outside root");
            return Err(FileError::InvalidPath);
        }

        Ok(candidate)
    }

    /// List visible regular files, most recently modified first
    pub async fn list(&self) -> Result<Vec<DirectoryEntry>> {
        let listing_error = |source| FileError::Listing {
            dir: self.path.clone(),
            source,
        };

        let mut reader = tokio::fs::read_dir(&self.path).await.map_err(listing_error)?;
        let mut entries = Vec::new();

        while let Some(entry) = reader.next_entry().await.map_err(listing_error)? {
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') {
                continue;
            }

            if !entry.file_type().await.map_err(listing_error)?.is_file() {
                continue;
            }

            let metadata = entry.metadata().await.map_err(listing_error)?;
            let modified = metadata.modified().map_err(listing_error)?;
            let mtime_ms = modified
                .duration_since(UNIX_EPOCH)
                .map_or(0.0, |elapsed| elapsed.as_secs_f64() * 1000.0);

            entries.push(DirectoryEntry {
                name,
                size: metadata.len(),
                mtime_ms,
            });
        }

        entries.sort_by(|a, b| b.mtime_ms.total_cmp(&a.mtime_ms));

        tracing::debug!(root = %self.path.display(), count = entries.len(), "listed directory");

        Ok(entries)
    }

    /// Open a file for streaming after the containment check passes
    pub async fn open(&self, name: &str) -> Result<ServedFile> {
        let path = self.resolve(name)?;
        ServedFile::open(path).await
    }
}

/// Resolve `.` and `..` components without consulting the filesystem
///
/// `..` at the filesystem root stays at the root.
fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();

    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => normalized.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            Component::Normal(part) => normalized.push(part),
        }
    }

    normalized
}
