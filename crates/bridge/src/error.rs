//! Error taxonomy for the bridge.
//!
//! Authentication and decode failures are surfaced to the webhook
//! sender as rejected requests; resolution and delivery failures are
//! logged and absorbed so the monitoring provider never re-delivers
//! an event the bridge cannot currently route.

use mattermost::ClientError;
use thiserror::Error;

/// Errors loading the bridge configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is not set.
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),

    /// A variable is set but cannot be parsed.
    #[error("invalid value for {variable}: {value}")]
    InvalidVar {
        /// Variable name.
        variable: &'static str,
        /// Offending value.
        value: String,
    },

    /// The hooks file cannot be read.
    #[error("failed to read hooks file {path}: {source}")]
    HooksFile {
        /// File path.
        path: String,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The hook configuration JSON cannot be parsed.
    #[error("failed to parse hook configurations: {0}")]
    InvalidHooks(#[from] serde_json::Error),
}

/// Errors resolving a hook configuration to a channel id.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The hook configuration is missing a required field. Detected
    /// before any network lookup.
    #[error("invalid hook configuration: missing {0}")]
    InvalidConfig(&'static str),

    /// The configured team does not exist.
    #[error("team {0} not found")]
    TeamNotFound(String),

    /// A channel reported as existing by the conflict path could not
    /// be fetched afterwards.
    #[error("channel {0} reported as existing but could not be fetched")]
    ChannelVanished(String),

    /// Directory lookup or creation failed.
    #[error(transparent)]
    Client(#[from] ClientError),
}

/// Errors delivering a rendered notification.
#[derive(Debug, Error)]
pub enum DeliverError {
    /// The destination channel could not be resolved.
    #[error("failed to resolve channel: {0}")]
    Resolve(#[from] ResolveError),

    /// The message post failed.
    #[error("failed to post message: {0}")]
    Post(#[source] ClientError),
}
