//! Check-event rendering into a message attachment.
//!
//! Pure transform: the same event always renders to the same
//! attachment, and malformed or missing check params are rendered in
//! their raw textual form rather than rejected.

use std::fmt::Write as _;

use mattermost::{AttachmentField, MessageAttachment};
use pingdom::{CheckEvent, CheckType, ProbeInfo};

use crate::config::HookConfig;

/// Accent color for DOWN/FAILING states.
pub const COLOR_FIRING: &str = "#FF0000";
/// Accent color for UP/SUCCESS states.
pub const COLOR_RESOLVED: &str = "#008000";
/// Accent color for any other state.
pub const COLOR_EXPIRED: &str = "#808080";

/// Lead-in text of every rendered attachment.
const ATTACHMENT_TEXT: &str = "Pingdom alert had been received.";

/// The three-way state classification driving color and status glyphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StateClass {
    Firing,
    Resolved,
    Neutral,
}

fn classify(state: &str) -> StateClass {
    match state {
        "DOWN" | "FAILING" => StateClass::Firing,
        "UP" | "SUCCESS" => StateClass::Resolved,
        _ => StateClass::Neutral,
    }
}

/// Render a check event into a message attachment.
///
/// The hook context travels with the event through the pipeline but
/// contributes no rendered content; only the event shapes the output.
#[must_use]
pub fn render(_hook: &HookConfig, event: &CheckEvent) -> MessageAttachment {
    let mut fields = vec![
        AttachmentField::new(&status_label(&event.current_state), summary_value(event), true),
        AttachmentField::new("Details", details_value(event), true),
    ];

    if !event.tags.is_empty() {
        fields.push(AttachmentField::new("Tags", tags_value(&event.tags), false));
    }

    fields.push(AttachmentField::new("Probe Details", "", false));
    // Probes are labeled by their position in the payload, never by
    // their shape.
    fields.push(AttachmentField::new(
        "First Probe",
        probe_value(&event.first_probe),
        true,
    ));
    fields.push(AttachmentField::new(
        "Second Probe",
        probe_value(&event.second_probe),
        true,
    ));

    MessageAttachment {
        color: color(&event.current_state).to_string(),
        title: format!("{}: {}", event.check_type, event.check_name),
        text: ATTACHMENT_TEXT.to_string(),
        fields,
    }
}

/// Map a current state to the attachment accent color.
#[must_use]
pub fn color(state: &str) -> &'static str {
    match classify(state) {
        StateClass::Firing => COLOR_FIRING,
        StateClass::Resolved => COLOR_RESOLVED,
        StateClass::Neutral => COLOR_EXPIRED,
    }
}

/// The upper-cased state wrapped in classification glyphs.
fn status_label(state: &str) -> String {
    let upper = state.to_uppercase();
    match classify(state) {
        StateClass::Firing => format!(":fire: :boom: {upper} :boom: :fire:"),
        StateClass::Resolved => {
            format!(":white_check_mark: :four_leaf_clover: {upper} :four_leaf_clover: :white_check_mark:")
        }
        StateClass::Neutral => format!(":thinking_face: {upper} :thinking_face:"),
    }
}

/// Descriptions, importance, check type, and the state-change instant.
fn summary_value(event: &CheckEvent) -> String {
    let importance_arrow = if event.importance_level == "HIGH" {
        ":arrow_upper_right:"
    } else {
        ":arrow_lower_right:"
    };

    let mut msg = String::new();
    let _ = writeln!(msg, "**Description**: {}", event.description);
    let _ = writeln!(msg, "**Long Description**: {}", event.long_description);
    let _ = writeln!(
        msg,
        "**Importance**: {importance_arrow} {} {importance_arrow}",
        event.importance_level
    );
    let _ = writeln!(msg, "**Check Type**: {}", event.check_type);
    msg.push_str(" \n");
    let _ = writeln!(
        msg,
        "**State changed time:** {}",
        event
            .state_changed_timestamp
            .format("%a, %d %b %Y %H:%M:%S UTC")
    );
    let _ = writeln!(msg, "**Previous state:** {}", event.previous_state);
    msg
}

/// Check-type-specific key/value lines from the params mapping.
fn details_value(event: &CheckEvent) -> String {
    let p = |key: &str| event.param(key);
    match &event.check_type {
        CheckType::Http | CheckType::HttpCustom => format!(
            "**Hostname**: {}\n**Port**: {}\n**URL**: `{}`\n**IPv6**: {}\n**Encryption**: {}\n",
            p("hostname"),
            p("port"),
            p("url"),
            p("ipv6"),
            p("encryption"),
        ),
        CheckType::Dns => format!(
            "**Hostname**: {}\n**Expected IP**: `{}`\n**Nameserver**: `{}`\n**IPv6**: {}\n",
            p("hostname"),
            p("expected_ip"),
            p("nameserver"),
            p("ipv6"),
        ),
        CheckType::PortTcp | CheckType::Udp => format!(
            "**Hostname**: {}\n**Port**: {}\n**IPv6**: {}\n",
            p("hostname"),
            p("port"),
            p("ipv6"),
        ),
        CheckType::Imap | CheckType::Pop3 | CheckType::Smtp => format!(
            "**Hostname**: {}\n**Port**: {}\n**IPv6**: {}\n**Encryption**: {}\n",
            p("hostname"),
            p("port"),
            p("ipv6"),
            p("encryption"),
        ),
        CheckType::Ping => format!("**Hostname**: {}\n**IPv6**: {}\n", p("hostname"), p("ipv6")),
        CheckType::Transaction => format!(
            "**Port**: {}\n**URL**: `{}`\n**Encryption**: {}\n",
            p("port"),
            p("url"),
            p("encryption"),
        ),
        CheckType::Other(_) => {
            ":warning: *Unknown check type, no additional fields had been collected.* :warning: \n"
                .to_string()
        }
    }
}

/// Tags rendered in inline-code style, comma-joined.
fn tags_value(tags: &[String]) -> String {
    let wrapped: Vec<String> = tags.iter().map(|tag| format!("`{tag}`")).collect();
    format!("{}\n", wrapped.join(", "))
}

/// Location and addresses of one probe.
fn probe_value(probe: &dyn ProbeInfo) -> String {
    format!(
        ":earth_americas: {}\n:house: {}\n:european_castle: {}\n",
        probe.location(),
        probe.ip(),
        probe.ipv6(),
    )
}
