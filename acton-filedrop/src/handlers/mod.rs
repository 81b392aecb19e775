//! HTTP handlers

pub mod files;

pub use files::{delete_file, list_files, upload, DeleteRequest};
