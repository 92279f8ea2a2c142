//! Errors raised while encoding or decoding pad/form messages.

#[derive(Debug, thiserror::Error)]
pub enum IpcError {
    #[error("Failed to encode or decode message: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid message: {0}")]
    InvalidFormat(String),
}
