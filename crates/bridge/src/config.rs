//! Configuration for the bridge service.

use std::env;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// One provider-credential-to-destination binding.
///
/// Immutable after load; `id` is unique across the configured set
/// (a configuration invariant, not runtime-checked).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookConfig {
    /// Stable identifier for this hook, keys the channel binding.
    pub id: String,
    /// Shared secret the provider sends as the `token` query
    /// parameter.
    pub secret: String,
    /// Destination team name.
    pub team: String,
    /// Destination channel name.
    pub channel: String,
    /// A disabled hook never authenticates.
    #[serde(default)]
    pub disabled: bool,
}

impl HookConfig {
    /// Name of the first missing required field, if any.
    #[must_use]
    pub fn missing_field(&self) -> Option<&'static str> {
        if self.team.is_empty() {
            Some("team")
        } else if self.channel.is_empty() {
            Some("channel")
        } else if self.secret.is_empty() {
            Some("secret")
        } else {
            None
        }
    }
}

/// Bridge service configuration, read from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port.
    pub port: u16,
    /// Mattermost server URL.
    pub mattermost_url: String,
    /// Mattermost bot access token.
    pub mattermost_token: String,
    /// Configured hooks.
    pub hooks: Vec<HookConfig>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Hooks are a JSON array, passed inline in `BRIDGE_HOOKS` or via
    /// a file named by `BRIDGE_HOOKS_FILE`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for missing or unparseable variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = match env::var("BRIDGE_PORT") {
            Ok(value) => value.parse().map_err(|_| ConfigError::InvalidVar {
                variable: "BRIDGE_PORT",
                value,
            })?,
            Err(_) => 8080,
        };

        let mattermost_url =
            env::var("MATTERMOST_URL").map_err(|_| ConfigError::MissingVar("MATTERMOST_URL"))?;
        let mattermost_token = env::var("MATTERMOST_TOKEN")
            .map_err(|_| ConfigError::MissingVar("MATTERMOST_TOKEN"))?;

        let hooks_json = if let Ok(inline) = env::var("BRIDGE_HOOKS") {
            inline
        } else if let Ok(path) = env::var("BRIDGE_HOOKS_FILE") {
            std::fs::read_to_string(&path)
                .map_err(|source| ConfigError::HooksFile { path, source })?
        } else {
            return Err(ConfigError::MissingVar("BRIDGE_HOOKS"));
        };
        let hooks: Vec<HookConfig> = serde_json::from_str(&hooks_json)?;

        Ok(Self {
            port,
            mattermost_url,
            mattermost_token,
            hooks,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hooks_parse_with_default_disabled() {
        let hooks: Vec<HookConfig> = serde_json::from_str(
            r#"[
                {"id": "h1", "secret": "s1", "team": "ops", "channel": "alerts"},
                {"id": "h2", "secret": "s2", "team": "ops", "channel": "noise", "disabled": true}
            ]"#,
        )
        .unwrap();
        assert_eq!(hooks.len(), 2);
        assert!(!hooks[0].disabled);
        assert!(hooks[1].disabled);
    }

    #[test]
    fn test_missing_field_reports_first_gap() {
        let mut hook = HookConfig {
            id: "h1".to_string(),
            secret: "s1".to_string(),
            team: "ops".to_string(),
            channel: "alerts".to_string(),
            disabled: false,
        };
        assert_eq!(hook.missing_field(), None);

        hook.channel.clear();
        assert_eq!(hook.missing_field(), Some("channel"));

        hook.team.clear();
        assert_eq!(hook.missing_field(), Some("team"));

        hook.team = "ops".to_string();
        hook.channel = "alerts".to_string();
        hook.secret.clear();
        assert_eq!(hook.missing_field(), Some("secret"));
    }
}
