//! Error types for payload decoding.

use thiserror::Error;

/// Errors that can occur when decoding a webhook payload.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The payload is not valid JSON or does not match the schema.
    #[error("failed to decode message: {0}")]
    Json(#[from] serde_json::Error),

    /// The payload parsed but is semantically incomplete.
    #[error("invalid webhook message: {0}")]
    Invalid(#[from] ValidationError),
}

/// A structurally valid payload that is missing required content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// `check_id` is zero.
    #[error("missing check id")]
    MissingCheckId,

    /// `check_name` is empty.
    #[error("missing check name")]
    MissingCheckName,
}
