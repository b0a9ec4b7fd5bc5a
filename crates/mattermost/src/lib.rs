//! Minimal Mattermost REST API client.
//!
//! Covers exactly the surface the Pingdom bridge consumes:
//!
//! - bot-identity lookup (`/users/me`)
//! - team lookup by name
//! - channel lookup by team and name
//! - public channel creation
//! - posting a message with slack-compatible attachments
//!
//! The [`Api`] trait abstracts these operations so the bridge can be
//! exercised against in-memory fakes; [`Client`] is the `reqwest`
//! implementation used in production.

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)] // All API methods fail the same way: ClientError.

pub mod client;
pub mod error;
pub mod models;

pub use client::Client;
pub use error::ClientError;
pub use models::{
    AttachmentField, Channel, MessageAttachment, NewChannel, NewPost, Post, Team, User,
};

use async_trait::async_trait;

/// The Mattermost operations the bridge consumes.
///
/// Implemented by [`Client`] against a live server and by in-memory
/// fakes in tests.
#[async_trait]
pub trait Api: Send + Sync {
    /// Fetch the identity bound to the access token (the bot user).
    async fn me(&self) -> Result<User, ClientError>;

    /// Look up a team by name. `Ok(None)` when the team does not exist.
    async fn team_by_name(&self, name: &str) -> Result<Option<Team>, ClientError>;

    /// Look up a channel by team id and channel name. `Ok(None)` when
    /// the channel does not exist.
    async fn channel_by_name(
        &self,
        team_id: &str,
        name: &str,
    ) -> Result<Option<Channel>, ClientError>;

    /// Create a channel. A conflicting existing channel surfaces as a
    /// [`ClientError::Api`] for which [`ClientError::is_conflict`]
    /// returns true.
    async fn create_channel(&self, channel: &NewChannel) -> Result<Channel, ClientError>;

    /// Post a message as the token's bot identity.
    async fn create_post(&self, post: &NewPost) -> Result<Post, ClientError>;
}
