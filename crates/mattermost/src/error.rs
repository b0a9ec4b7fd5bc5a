//! Error types for the Mattermost client.

use thiserror::Error;

/// Errors that can occur when talking to the Mattermost API.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport-level failure.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("Mattermost API error (status {status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body, useful for the server's app-error id.
        body: String,
    },
}

impl ClientError {
    /// Whether this error signals that the resource to be created
    /// already exists.
    ///
    /// Mattermost reports a duplicate channel as a 400 with the
    /// `store.sql_channel.save_channel.exists.app_error` id; other
    /// deployments surface 409.
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Api { status, .. } if *status == 400 || *status == 409)
    }
}
