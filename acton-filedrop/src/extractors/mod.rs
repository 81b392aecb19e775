//! Request extractors
//!
//! - [`FileField`]: the single `file` part of an upload form

pub mod file_field;

pub use file_field::{FileField, FILE_FIELD};
