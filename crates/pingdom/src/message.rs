//! The canonical check-notification event.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{DecodeError, ValidationError};
use crate::probe::{Probe, VersionedProbe};

/// Pingdom check types.
///
/// Unrecognized values are preserved verbatim in [`CheckType::Other`]
/// so they can still be displayed, while display code can branch on
/// the known variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckType {
    Http,
    HttpCustom,
    Dns,
    PortTcp,
    Udp,
    Imap,
    Pop3,
    Smtp,
    Ping,
    Transaction,
    /// Any check type this crate does not know about.
    Other(String),
}

impl From<String> for CheckType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "HTTP" => Self::Http,
            "HTTP_CUSTOM" => Self::HttpCustom,
            "DNS" => Self::Dns,
            "PORT_TCP" => Self::PortTcp,
            "UDP" => Self::Udp,
            "IMAP" => Self::Imap,
            "POP3" => Self::Pop3,
            "SMTP" => Self::Smtp,
            "PING" => Self::Ping,
            "TRANSACTION" => Self::Transaction,
            _ => Self::Other(s),
        }
    }
}

impl fmt::Display for CheckType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Http => "HTTP",
            Self::HttpCustom => "HTTP_CUSTOM",
            Self::Dns => "DNS",
            Self::PortTcp => "PORT_TCP",
            Self::Udp => "UDP",
            Self::Imap => "IMAP",
            Self::Pop3 => "POP3",
            Self::Smtp => "SMTP",
            Self::Ping => "PING",
            Self::Transaction => "TRANSACTION",
            Self::Other(s) => s,
        };
        f.write_str(name)
    }
}

impl Default for CheckType {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl<'de> Deserialize<'de> for CheckType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Self::from(String::deserialize(deserializer)?))
    }
}

impl Serialize for CheckType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// A loosely-typed `check_params` value.
///
/// Pingdom mixes strings, numbers, and booleans in the params mapping
/// depending on the check type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Number(serde_json::Number),
    String(String),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::String(s) => f.write_str(s),
        }
    }
}

/// One check-state-change notification.
///
/// See <https://www.pingdom.com/resources/webhooks/> for the wire
/// schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckEvent {
    /// Pingdom check identifier. Never zero in a valid event.
    #[serde(default)]
    pub check_id: u64,
    /// Check display name. Never empty in a valid event.
    #[serde(default)]
    pub check_name: String,
    /// Check type, e.g. HTTP or DNS.
    #[serde(default)]
    pub check_type: CheckType,
    /// Check-type-specific parameters.
    #[serde(default)]
    pub check_params: HashMap<String, ParamValue>,
    /// Tags assigned to the check, possibly empty.
    #[serde(default)]
    pub tags: Vec<String>,
    /// State before the change, e.g. `"DOWN"`.
    #[serde(default)]
    pub previous_state: String,
    /// State after the change, e.g. `"UP"`.
    #[serde(default)]
    pub current_state: String,
    /// `"HIGH"` or `"LOW"`.
    #[serde(default)]
    pub importance_level: String,
    /// When the state changed, encoded as epoch seconds. This is the
    /// canonical instant used for display.
    #[serde(with = "chrono::serde::ts_seconds")]
    pub state_changed_timestamp: DateTime<Utc>,
    /// The same instant, redundantly encoded as a zone-less literal.
    /// Retained for cross-validation only.
    #[serde(with = "crate::time")]
    pub state_changed_utc_time: DateTime<Utc>,
    /// Short description of the state change.
    #[serde(default, rename = "short_description")]
    pub description: String,
    /// Long description of the state change.
    #[serde(default)]
    pub long_description: String,
    /// First reporting probe.
    #[serde(default)]
    pub first_probe: Probe,
    /// Second (confirming) reporting probe.
    #[serde(default)]
    pub second_probe: VersionedProbe,
}

impl CheckEvent {
    /// Decode a raw webhook body into a validated event.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::Json`] for malformed payloads and
    /// [`DecodeError::Invalid`] for payloads missing a check id or
    /// name.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, DecodeError> {
        let event: Self = serde_json::from_slice(bytes)?;
        event.validate()?;
        Ok(event)
    }

    /// Check semantic completeness of a parsed event.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when `check_id` is zero or
    /// `check_name` is empty.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.check_id == 0 {
            return Err(ValidationError::MissingCheckId);
        }
        if self.check_name.is_empty() {
            return Err(ValidationError::MissingCheckName);
        }
        Ok(())
    }

    /// Look up a check parameter, rendered as text.
    ///
    /// Absent keys yield a placeholder rather than failing, since
    /// Pingdom does not guarantee which params accompany which check
    /// type.
    #[must_use]
    pub fn param(&self, key: &str) -> String {
        self.check_params
            .get(key)
            .map_or_else(|| "n/a".to_string(), ToString::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::ProbeInfo;

    fn sample_payload() -> serde_json::Value {
        serde_json::json!({
            "check_id": 12345,
            "check_name": "example-site",
            "check_type": "HTTP",
            "check_params": {
                "hostname": "example.com",
                "port": 443,
                "url": "/health",
                "ipv6": false,
                "encryption": true
            },
            "tags": ["prod", "api"],
            "previous_state": "DOWN",
            "current_state": "UP",
            "importance_level": "HIGH",
            "state_changed_timestamp": 1_451_610_061,
            "state_changed_utc_time": "2016-01-01T01:01:01",
            "short_description": "up",
            "long_description": "The check is up again",
            "first_probe": {
                "ip": "203.0.113.10",
                "ipv6": "2001:db8::10",
                "location": "Stockholm, Sweden"
            },
            "second_probe": {
                "ip": "203.0.113.20",
                "ipv6": "2001:db8::20",
                "location": "Frankfurt, Germany",
                "version": 1
            }
        })
    }

    fn decode(payload: &serde_json::Value) -> Result<CheckEvent, DecodeError> {
        CheckEvent::from_slice(payload.to_string().as_bytes())
    }

    #[test]
    fn test_decodes_full_payload() {
        let event = decode(&sample_payload()).unwrap();
        assert_eq!(event.check_id, 12345);
        assert_eq!(event.check_name, "example-site");
        assert_eq!(event.check_type, CheckType::Http);
        assert_eq!(event.tags, vec!["prod", "api"]);
        assert_eq!(event.previous_state, "DOWN");
        assert_eq!(event.current_state, "UP");
        assert_eq!(event.description, "up");
        assert_eq!(event.first_probe.location(), "Stockholm, Sweden");
        assert_eq!(event.second_probe.version, 1);
        assert_eq!(event.second_probe.location(), "Frankfurt, Germany");
    }

    #[test]
    fn test_both_timestamp_encodings_agree() {
        let event = decode(&sample_payload()).unwrap();
        assert_eq!(event.state_changed_timestamp, event.state_changed_utc_time);
        assert_eq!(event.state_changed_timestamp.timestamp(), 1_451_610_061);
    }

    #[test]
    fn test_malformed_literal_timestamp_is_a_decode_error() {
        let mut payload = sample_payload();
        payload["state_changed_utc_time"] = serde_json::json!("01/01/2016 01:01");
        assert!(matches!(decode(&payload), Err(DecodeError::Json(_))));
    }

    #[test]
    fn test_malformed_epoch_timestamp_is_a_decode_error() {
        let mut payload = sample_payload();
        payload["state_changed_timestamp"] = serde_json::json!("not-a-number");
        assert!(matches!(decode(&payload), Err(DecodeError::Json(_))));
    }

    #[test]
    fn test_zero_check_id_is_a_validation_error() {
        let mut payload = sample_payload();
        payload["check_id"] = serde_json::json!(0);
        assert!(matches!(
            decode(&payload),
            Err(DecodeError::Invalid(ValidationError::MissingCheckId))
        ));
    }

    #[test]
    fn test_empty_check_name_is_a_validation_error() {
        let mut payload = sample_payload();
        payload["check_name"] = serde_json::json!("");
        assert!(matches!(
            decode(&payload),
            Err(DecodeError::Invalid(ValidationError::MissingCheckName))
        ));
    }

    #[test]
    fn test_unknown_check_type_is_preserved() {
        let mut payload = sample_payload();
        payload["check_type"] = serde_json::json!("QUANTUM");
        let event = decode(&payload).unwrap();
        assert_eq!(event.check_type, CheckType::Other("QUANTUM".to_string()));
        assert_eq!(event.check_type.to_string(), "QUANTUM");
    }

    #[test]
    fn test_params_render_by_kind() {
        let event = decode(&sample_payload()).unwrap();
        assert_eq!(event.param("hostname"), "example.com");
        assert_eq!(event.param("port"), "443");
        assert_eq!(event.param("ipv6"), "false");
        assert_eq!(event.param("encryption"), "true");
    }

    #[test]
    fn test_missing_param_renders_placeholder() {
        let event = decode(&sample_payload()).unwrap();
        assert_eq!(event.param("nameserver"), "n/a");
    }
}
