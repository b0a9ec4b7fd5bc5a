//! Hook-to-channel resolution and the channel binding cache.

use std::collections::HashMap;
use std::sync::Arc;

use mattermost::{Api, NewChannel};
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::config::HookConfig;
use crate::error::ResolveError;

/// Resolves hook configurations to destination channel ids.
///
/// Bindings are created lazily on first successful resolution, cached
/// in process memory for the lifetime of the service, and never
/// invalidated. This is the only component that creates channels and
/// the sole writer of the binding cache.
pub struct Resolver {
    api: Arc<dyn Api>,
    bindings: RwLock<HashMap<String, String>>,
}

impl Resolver {
    /// Create a resolver with an empty binding cache.
    #[must_use]
    pub fn new(api: Arc<dyn Api>) -> Self {
        Self {
            api,
            bindings: RwLock::new(HashMap::new()),
        }
    }

    /// Return the destination channel id for a hook, resolving and
    /// caching it on first use.
    ///
    /// # Errors
    ///
    /// Returns a [`ResolveError`] for invalid configurations, missing
    /// teams, and directory failures.
    pub async fn channel_for(&self, hook: &HookConfig) -> Result<String, ResolveError> {
        if let Some(id) = self.bindings.read().await.get(&hook.id) {
            return Ok(id.clone());
        }

        let resolved = self.resolve(hook).await?;

        // A concurrent resolution may have won the race while the
        // lock was released; keep whichever binding landed first so
        // both callers agree on the channel id.
        let mut bindings = self.bindings.write().await;
        let id = bindings
            .entry(hook.id.clone())
            .or_insert(resolved)
            .clone();
        Ok(id)
    }

    /// Resolve each hook once, logging failures without aborting.
    ///
    /// Run at startup so bindings are typically established before
    /// the first webhook arrives.
    pub async fn warm(&self, hooks: &[HookConfig]) {
        for hook in hooks {
            match self.channel_for(hook).await {
                Ok(channel_id) => {
                    info!(hook = %hook.id, channel_id = %channel_id, "Hook channel resolved");
                }
                Err(e) => {
                    warn!(hook = %hook.id, error = %e, "Failed to resolve hook channel");
                }
            }
        }
    }

    async fn resolve(&self, hook: &HookConfig) -> Result<String, ResolveError> {
        if let Some(field) = hook.missing_field() {
            return Err(ResolveError::InvalidConfig(field));
        }

        let team = self
            .api
            .team_by_name(&hook.team)
            .await?
            .ok_or_else(|| ResolveError::TeamNotFound(hook.team.clone()))?;

        if let Some(channel) = self.api.channel_by_name(&team.id, &hook.channel).await? {
            return Ok(channel.id);
        }

        info!(team = %hook.team, channel = %hook.channel, "Creating alert channel");
        match self
            .api
            .create_channel(&NewChannel::open(&team.id, &hook.channel))
            .await
        {
            Ok(channel) => Ok(channel.id),
            // A concurrent resolution created the channel between the
            // lookup and the create; fetch what it made.
            Err(e) if e.is_conflict() => self
                .api
                .channel_by_name(&team.id, &hook.channel)
                .await?
                .map(|channel| channel.id)
                .ok_or_else(|| ResolveError::ChannelVanished(hook.channel.clone())),
            Err(e) => Err(e.into()),
        }
    }
}
