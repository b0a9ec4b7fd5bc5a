//! `reqwest`-backed implementation of the [`Api`] trait.

use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::ClientError;
use crate::models::{Channel, NewChannel, NewPost, Post, Team, User};
use crate::Api;

/// Mattermost REST API client authenticated with a bot access token.
pub struct Client {
    base_url: String,
    token: String,
    http: reqwest::Client,
}

impl Client {
    /// Create a client for the given server URL and access token.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] when the underlying HTTP client
    /// cannot be constructed.
    pub fn new(base_url: &str, token: &str) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
            http,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v4{path}", self.base_url)
    }

    /// Turn a response into a typed value, or an [`ClientError::Api`]
    /// carrying the status and raw body.
    async fn parse<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json::<T>().await?)
    }

    /// GET an endpoint where 404 means "does not exist".
    async fn get_optional<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<Option<T>, ClientError> {
        let response = self
            .http
            .get(self.url(path))
            .bearer_auth(&self.token)
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Ok(Some(Self::parse(response).await?))
    }
}

#[async_trait]
impl Api for Client {
    async fn me(&self) -> Result<User, ClientError> {
        let response = self
            .http
            .get(self.url("/users/me"))
            .bearer_auth(&self.token)
            .send()
            .await?;
        Self::parse(response).await
    }

    async fn team_by_name(&self, name: &str) -> Result<Option<Team>, ClientError> {
        self.get_optional(&format!("/teams/name/{name}")).await
    }

    async fn channel_by_name(
        &self,
        team_id: &str,
        name: &str,
    ) -> Result<Option<Channel>, ClientError> {
        self.get_optional(&format!("/teams/{team_id}/channels/name/{name}"))
            .await
    }

    async fn create_channel(&self, channel: &NewChannel) -> Result<Channel, ClientError> {
        debug!(team_id = %channel.team_id, name = %channel.name, "Creating channel");
        let response = self
            .http
            .post(self.url("/channels"))
            .bearer_auth(&self.token)
            .json(channel)
            .send()
            .await?;
        Self::parse(response).await
    }

    async fn create_post(&self, post: &NewPost) -> Result<Post, ClientError> {
        debug!(channel_id = %post.channel_id, "Posting message");
        let response = self
            .http
            .post(self.url("/posts"))
            .bearer_auth(&self.token)
            .json(post)
            .send()
            .await?;
        Self::parse(response).await
    }
}
