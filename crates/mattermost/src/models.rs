//! Wire types for the Mattermost API surface the bridge uses.

use serde::{Deserialize, Serialize};

/// A Mattermost user, as returned by `/users/me`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// User id.
    pub id: String,
    /// Login name.
    #[serde(default)]
    pub username: String,
}

/// A Mattermost team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    /// Team id.
    pub id: String,
    /// URL-safe team name.
    #[serde(default)]
    pub name: String,
}

/// A Mattermost channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    /// Channel id.
    pub id: String,
    /// URL-safe channel name.
    #[serde(default)]
    pub name: String,
    /// Owning team id.
    #[serde(default)]
    pub team_id: String,
}

/// Request body for channel creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewChannel {
    /// Owning team id.
    pub team_id: String,
    /// URL-safe channel name.
    pub name: String,
    /// Display name shown in the UI.
    pub display_name: String,
    /// Channel type; `"O"` for public.
    #[serde(rename = "type")]
    pub channel_type: String,
}

impl NewChannel {
    /// A public channel whose display name matches its name.
    #[must_use]
    pub fn open(team_id: &str, name: &str) -> Self {
        Self {
            team_id: team_id.to_string(),
            name: name.to_string(),
            display_name: name.to_string(),
            channel_type: "O".to_string(),
        }
    }
}

/// A created post, as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Post id.
    pub id: String,
    /// Destination channel id.
    #[serde(default)]
    pub channel_id: String,
}

/// Request body for posting a message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPost {
    /// Destination channel id.
    pub channel_id: String,
    /// Plain message text; empty when the content lives in the
    /// attachments.
    #[serde(default)]
    pub message: String,
    /// Post properties carrying the attachments.
    #[serde(default)]
    pub props: PostProps,
}

impl NewPost {
    /// A post that consists only of attachments.
    #[must_use]
    pub fn with_attachments(channel_id: &str, attachments: Vec<MessageAttachment>) -> Self {
        Self {
            channel_id: channel_id.to_string(),
            message: String::new(),
            props: PostProps { attachments },
        }
    }
}

/// Post properties.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostProps {
    /// Slack-compatible attachments.
    #[serde(default)]
    pub attachments: Vec<MessageAttachment>,
}

/// A slack-compatible message attachment.
///
/// Built fresh per event by the renderer and never mutated after
/// construction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageAttachment {
    /// Attachment accent color, `#RRGGBB`.
    #[serde(default)]
    pub color: String,
    /// Attachment title.
    #[serde(default)]
    pub title: String,
    /// Lead-in text shown above the fields.
    #[serde(default)]
    pub text: String,
    /// Ordered display fields.
    #[serde(default)]
    pub fields: Vec<AttachmentField>,
}

/// One `(title, value, short)` display field of an attachment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentField {
    /// Field heading.
    pub title: String,
    /// Field body, markdown.
    pub value: String,
    /// Whether the field may share a row with its neighbor.
    pub short: bool,
}

impl AttachmentField {
    /// Convenience constructor mirroring the field tuple order.
    #[must_use]
    pub fn new(title: &str, value: impl Into<String>, short: bool) -> Self {
        Self {
            title: title.to_string(),
            value: value.into(),
            short,
        }
    }
}
