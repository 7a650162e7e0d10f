use crate::store::StoreError;

/// Failure of a library operation.
///
/// Dedup outcomes are not errors; see [`crate::AdmitDecision`].
#[derive(Debug, thiserror::Error)]
pub enum LibraryError {
    #[error("persistence failure: {0}")]
    Store(#[from] StoreError),

    #[error("failed to fingerprint template: {0}")]
    Fingerprint(#[from] serde_json::Error),
}
