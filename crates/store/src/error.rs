use thiserror::Error;

/// Failures talking to the content store.
///
/// These are logged, never shown to dashboard users.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The request never got a response (connect, TLS, reset...).
    #[error("transport error: {0}")]
    Transport(String),

    /// The store answered with a non-success status.
    #[error("store responded {status}: {body}")]
    Remote { status: u16, body: String },

    /// A response or document could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// A document body was rejected before sending.
    #[error("invalid document: {0}")]
    InvalidDocument(String),

    #[error("document not found: {0}")]
    NotFound(String),
}
