//! HTTP-facing error types
//!
//! Upload failures answer in plain text, delete failures as `{"error": ...}`.
//! Server-side detail is logged where the error is produced and never
//! reaches the response body.

use crate::storage::StorageError;
use axum::{
    extract::multipart::{MultipartError, MultipartRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Reasons an upload is refused
#[derive(Debug, Error)]
pub enum UploadError {
    /// Extension is not on the allow-list
    #[error("Unsupported file type")]
    UnsupportedFileType,

    /// Nothing usable remains of the client's filename
    #[error("Invalid file name")]
    InvalidFileName,

    /// File part under a field other than `file`, or a second file part
    #[error("Unexpected field")]
    UnexpectedField,

    /// Malformed multipart body or body over the configured limit
    #[error("{message}")]
    Multipart {
        /// Status reported by the multipart parser
        status: StatusCode,
        /// Parser message, safe to show to the client
        message: String,
    },

    /// Write to storage failed
    #[error("Upload failed")]
    Storage(#[source] StorageError),
}

impl UploadError {
    /// HTTP status for this error
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::UnsupportedFileType | Self::InvalidFileName | Self::UnexpectedField => {
                StatusCode::BAD_REQUEST
            }
            Self::Multipart { status, .. } => *status,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<MultipartError> for UploadError {
    fn from(e: MultipartError) -> Self {
        Self::Multipart {
            status: e.status(),
            message: e.body_text(),
        }
    }
}

impl From<MultipartRejection> for UploadError {
    fn from(e: MultipartRejection) -> Self {
        Self::Multipart {
            status: e.status(),
            message: e.body_text(),
        }
    }
}

impl IntoResponse for UploadError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}

/// Reasons a delete request is refused or fails
#[derive(Debug, Error)]
pub enum DeleteError {
    /// Request carried no usable `file` value
    #[error("No file specified")]
    NoFileSpecified,

    /// Name resolves outside the storage directory
    #[error("Invalid file path")]
    InvalidFilePath,

    /// Filesystem refused the removal
    #[error("Delete failed")]
    DeleteFailed(#[source] StorageError),
}

impl DeleteError {
    /// HTTP status for this error
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::NoFileSpecified | Self::InvalidFilePath => StatusCode::BAD_REQUEST,
            Self::DeleteFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StorageError> for DeleteError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::InvalidPath(_) => Self::InvalidFilePath,
            other => Self::DeleteFailed(other),
        }
    }
}

impl IntoResponse for DeleteError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}
