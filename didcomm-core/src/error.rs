// didcomm-core/src/error.rs
// Typed error surface shared by the core and the FFI layer

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DidcommError>;

/// Errors produced by the core message operations
#[derive(Debug, Error)]
pub enum DidcommError {
    /// JSON serialization or deserialization failed
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The envelope parsed but violates the plaintext message rules
    #[error("invalid message: {0}")]
    InvalidMessage(String),
}
