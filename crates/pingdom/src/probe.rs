//! Probe records reported alongside a check notification.
//!
//! Pingdom reports the two vantage points that confirmed a state
//! change in two shapes: the first probe carries location and
//! addresses directly, the second additionally carries a probe
//! software version. Consumers should not care which shape they hold;
//! both expose the same accessors through [`ProbeInfo`], and display
//! code labels probes by their position in the payload, never by
//! their shape.

use serde::{Deserialize, Serialize};

/// Capability contract shared by both probe shapes.
pub trait ProbeInfo {
    /// Human-readable probe location, e.g. `"Stockholm, Sweden"`.
    fn location(&self) -> &str;

    /// IPv4 address of the probe.
    fn ip(&self) -> &str;

    /// IPv6 address of the probe.
    fn ipv6(&self) -> &str;
}

/// The base probe shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Probe {
    /// IPv4 address.
    #[serde(default)]
    pub ip: String,
    /// IPv6 address.
    #[serde(default)]
    pub ipv6: String,
    /// Probe location.
    #[serde(default)]
    pub location: String,
}

/// The extended probe shape: base fields plus a version number.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionedProbe {
    /// Base probe fields, flattened into the same JSON object.
    #[serde(flatten)]
    pub probe: Probe,
    /// Probe software version.
    #[serde(default)]
    pub version: u64,
}

impl ProbeInfo for Probe {
    fn location(&self) -> &str {
        &self.location
    }

    fn ip(&self) -> &str {
        &self.ip
    }

    fn ipv6(&self) -> &str {
        &self.ipv6
    }
}

impl ProbeInfo for VersionedProbe {
    fn location(&self) -> &str {
        self.probe.location()
    }

    fn ip(&self) -> &str {
        self.probe.ip()
    }

    fn ipv6(&self) -> &str {
        self.probe.ipv6()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_versioned_probe_flattens_base_fields() {
        let probe: VersionedProbe = serde_json::from_str(
            r#"{"ip": "203.0.113.20", "ipv6": "2001:db8::20", "location": "Frankfurt, Germany", "version": 3}"#,
        )
        .unwrap();
        assert_eq!(probe.version, 3);
        assert_eq!(probe.ip(), "203.0.113.20");
        assert_eq!(probe.ipv6(), "2001:db8::20");
        assert_eq!(probe.location(), "Frankfurt, Germany");
    }

    #[test]
    fn test_both_shapes_share_accessors() {
        let first = Probe {
            ip: "198.51.100.1".into(),
            ipv6: "2001:db8::1".into(),
            location: "Stockholm, Sweden".into(),
        };
        let second = VersionedProbe {
            probe: first.clone(),
            version: 1,
        };

        let probes: [&dyn ProbeInfo; 2] = [&first, &second];
        for probe in probes {
            assert_eq!(probe.location(), "Stockholm, Sweden");
            assert_eq!(probe.ip(), "198.51.100.1");
        }
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let probe: Probe = serde_json::from_str(r#"{"ip": "198.51.100.1"}"#).unwrap();
        assert_eq!(probe.ipv6(), "");
        assert_eq!(probe.location(), "");
    }
}
