//! Single-file multipart extractor for the upload endpoint
//!
//! Reads the one file part named [`FILE_FIELD`] and checks its extension
//! against the [`UploadPolicy`] before the part's body is read, so a refused
//! file never reaches memory or disk.
//!
//! Field rules:
//! - text parts are ignored
//! - a file part under any other name, or a second file part, is refused
//! - a file part with an empty filename (an empty `<input type="file">`)
//!   counts as no file
//! - a body with no file part, or one that is not multipart at all, yields
//!   `FileField(None)`
//! - a `multipart/form-data` body that cannot be framed (e.g. no boundary)
//!   is refused with the parser's status
//!
//! ```rust,no_run
//! use acton_filedrop::extractors::FileField;
//! use axum::response::IntoResponse;
//!
//! async fn handler(FileField(file): FileField) -> impl IntoResponse {
//!     match file {
//!         Some(file) => format!("Received: {} ({} bytes)", file.filename, file.size()),
//!         None => "nothing uploaded".to_string(),
//!     }
//! }
//! ```

use crate::error::UploadError;
use crate::storage::{UploadPolicy, UploadedFile};
use axum::extract::{FromRef, FromRequest, Multipart, Request};
use axum::http::header::CONTENT_TYPE;
use std::sync::Arc;
use tracing::debug;

/// Multipart field name carrying the upload
pub const FILE_FIELD: &str = "file";

/// The upload carried by the request, already cleared by the allow-list
#[derive(Debug)]
pub struct FileField(pub Option<UploadedFile>);

impl<S> FromRequest<S> for FileField
where
    S: Send + Sync,
    Arc<UploadPolicy>: FromRef<S>,
{
    type Rejection = UploadError;

    #[allow(clippy::manual_async_fn)]
    fn from_request(
        req: Request,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        async move {
            let policy = Arc::<UploadPolicy>::from_ref(state);

            if !is_multipart_form(&req) {
                debug!("upload request is not multipart, nothing to store");
                return Ok(Self(None));
            }

            let mut multipart = Multipart::from_request(req, state).await?;

            let mut accepted: Option<UploadedFile> = None;

            while let Some(field) = multipart.next_field().await? {
                let Some(filename) = field
                    .file_name()
                    .filter(|name| !name.is_empty())
                    .map(str::to_owned)
                else {
                    continue;
                };

                if field.name() != Some(FILE_FIELD) || accepted.is_some() {
                    debug!(field = ?field.name(), filename = %filename, "unexpected file part");
                    return Err(UploadError::UnexpectedField);
                }

                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();

                let mut file = UploadedFile::new(filename, content_type, Vec::new());
                if !policy.allows(&file) {
                    debug!(filename = %file.filename, "extension not on allow-list");
                    return Err(UploadError::UnsupportedFileType);
                }

                file.data = field.bytes().await?.to_vec();
                accepted = Some(file);
            }

            Ok(Self(accepted))
        }
    }
}

fn is_multipart_form(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .is_some_and(|essence| essence.trim().eq_ignore_ascii_case("multipart/form-data"))
}
