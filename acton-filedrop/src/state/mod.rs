//! Application state shared by the handlers

use crate::storage::{FileStorage, UploadPolicy};
use axum::extract::FromRef;
use std::sync::Arc;

/// Application state for acton-filedrop
///
/// Holds the storage backend and the upload policy. Both are read-only once
/// the server starts; the only mutable state is the storage directory itself.
///
/// # Example
///
/// ```rust,no_run
/// use acton_filedrop::state::AppState;
/// use acton_filedrop::storage::{LocalFileStorage, UploadPolicy};
/// use std::sync::Arc;
///
/// # fn example() -> anyhow::Result<()> {
/// let storage = LocalFileStorage::bootstrap("./uploads")?;
/// let state = AppState::new(Arc::new(storage), UploadPolicy::default());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct AppState {
    storage: Arc<dyn FileStorage>,
    policy: Arc<UploadPolicy>,
}

impl AppState {
    /// Create application state from a storage backend and upload policy
    #[must_use]
    pub fn new(storage: Arc<dyn FileStorage>, policy: UploadPolicy) -> Self {
        Self {
            storage,
            policy: Arc::new(policy),
        }
    }

    /// Get the storage backend
    #[must_use]
    pub fn storage(&self) -> &dyn FileStorage {
        self.storage.as_ref()
    }

    /// Get the upload policy
    #[must_use]
    pub fn policy(&self) -> &UploadPolicy {
        &self.policy
    }
}

impl FromRef<AppState> for Arc<UploadPolicy> {
    fn from_ref(state: &AppState) -> Self {
        Arc::clone(&state.policy)
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}
