//! Profile persistence error types.
//!
//! Loading a profile never fails (a missing or corrupt file yields a fresh
//! profile), so these only surface from saving.

use thiserror::Error;

/// Errors that can occur when persisting a learner profile.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The user id cannot be used as part of a file name.
    #[error("invalid user id: {0:?}")]
    InvalidUserId(String),

    /// The profile could not be serialized.
    #[error("failed to serialize profile: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Writing the profile file failed.
    #[error("failed to write profile {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
