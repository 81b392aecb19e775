//! Router assembly and server startup
//!
//! Route table:
//!
//! | Method & path     | Handler                           |
//! |-------------------|-----------------------------------|
//! | `POST /upload`    | [`handlers::upload`]              |
//! | `GET /files`      | [`handlers::list_files`]          |
//! | `DELETE /delete`  | [`handlers::delete_file`]         |
//! | `GET /uploads/*`  | storage directory, read-only      |
//! | anything else     | public asset tree                 |

use crate::config::FiledropConfig;
use crate::handlers;
use crate::state::AppState;
use crate::storage::LocalFileStorage;
use anyhow::Context;
use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};
use std::path::Path;
use std::sync::Arc;
use tower_http::{services::ServeDir, trace::TraceLayer};

/// URL prefix under which stored files are served
pub const UPLOADS_PREFIX: &str = "/uploads";

/// The three JSON/form endpoints, without static serving
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/upload", post(handlers::upload))
        .route("/files", get(handlers::list_files))
        .route("/delete", delete(handlers::delete_file))
}

/// Full application router
///
/// `storage_root` is exposed read-only under [`UPLOADS_PREFIX`]; `ServeDir`
/// never renders directory listings, so `/uploads/` itself is a 404.
/// `public_dir` answers every path no route claims.
pub fn router(
    state: AppState,
    storage_root: &Path,
    public_dir: &Path,
    max_upload_bytes: Option<u64>,
) -> Router {
    api_routes()
        .layer(body_limit(max_upload_bytes))
        .nest_service(UPLOADS_PREFIX, ServeDir::new(storage_root))
        .fallback_service(ServeDir::new(public_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn body_limit(max_upload_bytes: Option<u64>) -> DefaultBodyLimit {
    max_upload_bytes.map_or_else(DefaultBodyLimit::disable, |max| {
        DefaultBodyLimit::max(usize::try_from(max).unwrap_or(usize::MAX))
    })
}

/// Prepare storage, bind the listener and serve until the process stops
///
/// # Errors
///
/// Returns an error if:
/// - The storage directory cannot be created or opened
/// - The listen address cannot be bound
/// - The server fails while running
pub async fn serve(config: FiledropConfig) -> anyhow::Result<()> {
    let storage = LocalFileStorage::bootstrap(&config.storage_dir).with_context(|| {
        format!(
            "cannot prepare storage directory {}",
            config.storage_dir.display()
        )
    })?;
    let storage_root = storage.root().to_path_buf();

    let state = AppState::new(Arc::new(storage), config.upload_policy());
    let app = router(
        state,
        &storage_root,
        &config.public_dir,
        config.max_upload_bytes,
    );

    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("cannot bind {addr}"))?;

    tracing::info!(
        addr = %listener.local_addr()?,
        storage_dir = %storage_root.display(),
        public_dir = %config.public_dir.display(),
        "Server running"
    );

    axum::serve(listener, app).await?;

    Ok(())
}
