//! File storage for uploaded files
//!
//! - [`FileStorage`]: the `write` / `list` / `remove` interface handlers use
//! - [`LocalFileStorage`]: one flat directory on local disk
//! - [`UploadPolicy`]: extension allow-list and stored-name assignment
//! - [`resolve_within`]: containment check for client-supplied names

pub mod local;
pub mod path;
pub mod policy;
pub mod traits;
pub mod types;

pub use local::LocalFileStorage;
pub use path::resolve_within;
pub use policy::{sanitize_filename, UploadPolicy, DEFAULT_ALLOWED_EXTENSIONS};
#[cfg(test)]
pub use traits::MockFileStorage;
pub use traits::FileStorage;
pub use types::{StorageError, StorageResult, StoredName, UploadedFile};
