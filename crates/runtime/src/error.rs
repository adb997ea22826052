//! Error types for the hostbridge runtime.

use thiserror::Error;

/// Result type alias for runtime operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while bridging native objects to the remote runtime.
#[derive(Debug, Error)]
pub enum Error {
    /// An instance reached the bridge without being registered first.
    ///
    /// This is a lifetime-tracking bug upstream, not a recoverable
    /// condition: the forwarding attempt is aborted and the error surfaced.
    #[error("no identifier registered for {type_name} instance")]
    NotRegistered {
        /// Diagnostic type name of the unknown instance.
        type_name: String,
    },

    /// Transport-level failure delivering a message.
    #[error("transport error: {0}")]
    Transport(String),

    /// Reply channel closed before a reply was delivered.
    #[error("reply channel closed before a reply was delivered")]
    ChannelClosed,

    /// Malformed or unexpected payload from the remote runtime.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Builds a [`Error::NotRegistered`] for the given instance type.
    pub fn not_registered(type_name: &str) -> Self {
        Error::NotRegistered {
            type_name: type_name.to_string(),
        }
    }

    /// Returns true if this is an identity error for an untracked instance.
    pub fn is_not_registered(&self) -> bool {
        matches!(self, Error::NotRegistered { .. })
    }
}
