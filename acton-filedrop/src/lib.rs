//! acton-filedrop: a small upload service on axum
//!
//! Accepts single-file uploads into one flat directory, lists and deletes
//! them by name, and serves them back read-only next to a public asset tree.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use acton_filedrop::{config::FiledropConfig, observability, server};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     observability::init()?;
//!     let config = FiledropConfig::load(None)?;
//!     server::serve(config).await
//! }
//! ```
//!
//! # Endpoints
//!
//! - `POST /upload`: multipart form with one `file` part, 302 to `/`
//! - `GET /files`: JSON array of stored names
//! - `DELETE /delete`: JSON `{"file": "<stored name>"}`
//! - `GET /uploads/<name>`: stored file bytes
//! - everything else: the public asset tree

#![allow(clippy::missing_errors_doc)]

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod observability;
pub mod server;
pub mod state;
pub mod storage;

pub mod prelude {
    //! Convenience re-exports for common types and traits

    pub use crate::config::FiledropConfig;
    pub use crate::error::{DeleteError, UploadError};
    pub use crate::extractors::FileField;
    pub use crate::state::AppState;
    pub use crate::storage::{
        FileStorage, LocalFileStorage, StorageError, StoredName, UploadPolicy, UploadedFile,
    };
}
