//! Upload, listing and deletion endpoints

use crate::error::{DeleteError, UploadError};
use crate::extractors::FileField;
use crate::state::AppState;
use crate::storage::StorageError;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header::LOCATION, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use axum_htmx::{HxRedirect, HxRequest};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, error, info, warn};

/// Where a successful upload sends the browser
const HOME: &str = "/";

/// `POST /upload`
///
/// Stores the `file` part under `<millis>-<original name>` and redirects to
/// `/`. A request without a file part is answered the same way, nothing is
/// written. htmx requests get `HX-Redirect` in place of the 302.
pub async fn upload(
    State(state): State<AppState>,
    HxRequest(is_htmx): HxRequest,
    FileField(file): FileField,
) -> Result<Response, UploadError> {
    let Some(file) = file else {
        debug!("upload request carried no file");
        return Ok(redirect_home(is_htmx));
    };

    let stored_name = state.policy().stored_name(&file).map_err(|e| {
        debug!(error = %e, "unusable upload filename");
        UploadError::InvalidFileName
    })?;

    state
        .storage()
        .write(stored_name.as_str(), &file.data)
        .await
        .map_err(|e| {
            error!(stored_name = %stored_name, error = %e, "failed to store upload");
            UploadError::Storage(e)
        })?;

    info!(
        stored_name = %stored_name,
        original = %file.filename,
        size = file.size(),
        "upload stored"
    );

    Ok(redirect_home(is_htmx))
}

fn redirect_home(is_htmx: bool) -> Response {
    if is_htmx {
        (HxRedirect(HOME.to_string()), ()).into_response()
    } else {
        (StatusCode::FOUND, [(LOCATION, HOME)]).into_response()
    }
}

/// `GET /files`
///
/// Names in the storage directory, unordered. A failed read answers `[]`,
/// so clients cannot tell it from an empty directory; the failure is logged.
pub async fn list_files(State(state): State<AppState>) -> Json<Vec<String>> {
    match state.storage().list().await {
        Ok(names) => Json(names),
        Err(e) => {
            warn!(error = %e, "failed to read storage directory, answering empty listing");
            Json(Vec::new())
        }
    }
}

/// Body of `DELETE /delete`
#[derive(Debug, Deserialize)]
pub struct DeleteRequest {
    /// Stored name to remove
    #[serde(default)]
    pub file: Option<String>,
}

/// `DELETE /delete`
///
/// Removes one stored file. Missing or unparsable bodies count as "no file
/// specified".
pub async fn delete_file(
    State(state): State<AppState>,
    body: Result<Json<DeleteRequest>, JsonRejection>,
) -> Result<Json<Value>, DeleteError> {
    let name = match body {
        Ok(Json(DeleteRequest { file: Some(name) })) if !name.is_empty() => name,
        Ok(_) => return Err(DeleteError::NoFileSpecified),
        Err(rejection) => {
            debug!(%rejection, "unreadable delete request");
            return Err(DeleteError::NoFileSpecified);
        }
    };

    if let Err(e) = state.storage().remove(&name).await {
        match &e {
            StorageError::InvalidPath(_) => {
                warn!(file = %name, "delete outside storage directory refused");
            }
            other => error!(file = %name, error = %other, "delete failed"),
        }
        return Err(e.into());
    }

    info!(file = %name, "file deleted");
    Ok(Json(json!({ "success": true })))
}
