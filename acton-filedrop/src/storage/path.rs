//! Resolution of client-supplied names against the storage root
//!
//! Names are normalized lexically, without touching the filesystem, and the
//! result is checked segment by segment with [`Path::starts_with`]. A textual
//! prefix test would let `../uploads-evil/x` through for a root named
//! `uploads`; a segment test does not.

use super::types::{StorageError, StorageResult};
use std::path::{Component, Path, PathBuf};

/// Joins `name` onto `root` and verifies the result stays strictly inside it
///
/// `root` is expected to be absolute and canonical. The returned path names
/// an entry below `root`, never `root` itself.
///
/// # Errors
///
/// Returns `StorageError::InvalidPath` when `name` is absolute, carries a
/// drive prefix, climbs above `root` through `..`, or normalizes to `root`.
///
/// # Examples
///
/// ```rust
/// use acton_filedrop::storage::resolve_within;
/// use std::path::Path;
///
/// let root = Path::new("/srv/uploads");
/// assert_eq!(
///     resolve_within(root, "1700000000000-a.pdf").unwrap(),
///     Path::new("/srv/uploads/1700000000000-a.pdf")
/// );
/// assert!(resolve_within(root, "../secret.txt").is_err());
/// assert!(resolve_within(root, "../uploads-evil/x.pdf").is_err());
/// ```
pub fn resolve_within(root: &Path, name: &str) -> StorageResult<PathBuf> {
    let mut segments: Vec<&std::ffi::OsStr> = Vec::new();

    for component in Path::new(name).components() {
        match component {
            Component::Normal(segment) => segments.push(segment),
            Component::CurDir => {}
            Component::ParentDir => {
                if segments.pop().is_none() {
                    return Err(StorageError::InvalidPath(name.to_string()));
                }
            }
            Component::RootDir | Component::Prefix(_) => {
                return Err(StorageError::InvalidPath(name.to_string()));
            }
        }
    }

    if segments.is_empty() {
        return Err(StorageError::InvalidPath(name.to_string()));
    }

    let resolved: PathBuf = segments.iter().fold(root.to_path_buf(), |acc, s| acc.join(s));

    if resolved.starts_with(root) && resolved != root {
        Ok(resolved)
    } else {
        Err(StorageError::InvalidPath(name.to_string()))
    }
}
