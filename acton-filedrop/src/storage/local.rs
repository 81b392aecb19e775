//! Local filesystem storage implementation

use super::path::resolve_within;
use super::traits::FileStorage;
use super::types::{StorageError, StorageResult};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

/// Local filesystem storage backend
///
/// Every upload lives directly in one flat directory under its stored name.
/// There are no subdirectories and no metadata sidecars; size and timestamps
/// come from the filesystem.
///
/// ```text
/// ./uploads/
/// ├── 1712345678901-report.pdf
/// └── 1712345680022-scan.png
/// ```
#[derive(Debug, Clone)]
pub struct LocalFileStorage {
    /// Canonical, absolute storage root
    root: PathBuf,
}

impl LocalFileStorage {
    /// Ensures the storage directory exists and opens it
    ///
    /// A missing directory is created with a single non-recursive
    /// `create_dir`, so its parent must already exist. The root is then
    /// canonicalized once so later containment checks compare absolute paths.
    /// Calling this again on the same path is harmless.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The path exists but is not a directory
    /// - The directory cannot be created (missing parent, permissions)
    /// - The path cannot be canonicalized
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use acton_filedrop::storage::LocalFileStorage;
    ///
    /// let storage = LocalFileStorage::bootstrap("./uploads")?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn bootstrap(root: impl AsRef<Path>) -> StorageResult<Self> {
        let root = root.as_ref();

        if root.exists() {
            if !root.is_dir() {
                return Err(StorageError::InvalidPath(format!(
                    "{} is not a directory",
                    root.display()
                )));
            }
        } else {
            std::fs::create_dir(root)?;
            debug!(path = %root.display(), "created storage directory");
        }

        Ok(Self {
            root: root.canonicalize()?,
        })
    }

    /// The canonical storage root
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

async fn write_contents(file: &mut fs::File, data: &[u8]) -> std::io::Result<()> {
    file.write_all(data).await?;
    file.flush().await
}

#[async_trait]
impl FileStorage for LocalFileStorage {
    async fn write(&self, name: &str, data: &[u8]) -> StorageResult<()> {
        let path = resolve_within(&self.root, name)?;

        // An open failure leaves any existing file untouched
        let mut file = fs::File::create(&path).await?;

        if let Err(e) = write_contents(&mut file, data).await {
            drop(file);
            // Do not leave a truncated file visible in listings
            if let Err(cleanup) = fs::remove_file(&path).await {
                if cleanup.kind() != ErrorKind::NotFound {
                    warn!(path = %path.display(), error = %cleanup, "failed to remove partial upload");
                }
            }
            return Err(e.into());
        }

        debug!(file = name, size = data.len(), "file written");
        Ok(())
    }

    async fn list(&self) -> StorageResult<Vec<String>> {
        let mut entries = fs::read_dir(&self.root).await?;
        let mut names = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }

        Ok(names)
    }

    async fn remove(&self, name: &str) -> StorageResult<()> {
        let path = resolve_within(&self.root, name)?;

        match fs::remove_file(&path).await {
            Ok(()) => {
                debug!(file = name, "file removed");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Err(StorageError::NotFound(name.to_string())),
            Err(e) => Err(e.into()),
        }
    }
}
