//! File storage trait definitions

use super::types::StorageResult;
use async_trait::async_trait;

/// Abstraction over the flat directory holding uploaded files
///
/// Handlers only see this trait, so they can be exercised against a
/// `MockFileStorage` in tests. Names passed in are stored names, never raw
/// client paths; implementations are still responsible for rejecting names
/// that would resolve outside their root.
///
/// Operations are single-attempt and uncoordinated: a write racing a remove
/// of the same name resolves to whichever filesystem call lands last.
///
/// # Examples
///
/// ```rust,no_run
/// use acton_filedrop::storage::{FileStorage, LocalFileStorage};
///
/// # async fn example() -> anyhow::Result<()> {
/// let storage = LocalFileStorage::bootstrap("./uploads")?;
///
/// storage.write("1700000000000-report.pdf", b"%PDF-1.7").await?;
/// assert!(storage.list().await?.contains(&"1700000000000-report.pdf".to_string()));
///
/// storage.remove("1700000000000-report.pdf").await?;
/// # Ok(())
/// # }
/// ```
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FileStorage: Send + Sync {
    /// Writes `data` under `name`, replacing any existing file of that name
    ///
    /// On failure no partial file is left behind.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::InvalidPath` if `name` does not resolve to an
    /// entry directly usable inside the root, or `StorageError::Io` when the
    /// write itself fails.
    async fn write(&self, name: &str, data: &[u8]) -> StorageResult<()>;

    /// Names of all entries in the storage root, unordered
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the directory cannot be read.
    async fn list(&self) -> StorageResult<Vec<String>>;

    /// Removes the file called `name`
    ///
    /// Unlike a cache eviction this is not idempotent: removing a missing
    /// file is an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::InvalidPath` when `name` resolves outside the
    /// root (nothing is touched in that case), `StorageError::NotFound` when
    /// there is no such file, and `StorageError::Io` for other failures.
    async fn remove(&self, name: &str) -> StorageResult<()>;
}
