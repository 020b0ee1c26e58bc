//! Record shapes used by the channel tables

use std::borrow::Cow;
use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Channel identifiers backing a soft (simulated) motor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FakeMotor {
    /// Readback value channel
    pub readback: Cow<'static, str>,
    /// Setpoint channel
    pub setpoint: Cow<'static, str>,
    /// Motion status channel
    pub moving: Cow<'static, str>,
    /// Channel processed to start a move
    pub actuate: Cow<'static, str>,
    /// Channel processed to stop a move
    pub stop: Cow<'static, str>,
}

impl FakeMotor {
    /// Channels as `(field, identifier)` pairs in declaration order
    pub fn channels(&self) -> [(&'static str, &str); 5] {
        [
            ("readback", &*self.readback),
            ("setpoint", &*self.setpoint),
            ("moving", &*self.moving),
            ("actuate", &*self.actuate),
            ("stop", &*self.stop),
        ]
    }
}

/// One entry under an area-detector plugin category
///
/// Most categories list bare prefixes. Ranged entries carry a first index and a
/// count of sub-records living under the same prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PluginEntry {
    Prefix(Cow<'static, str>),
    Ranged(Cow<'static, str>, u32, u32),
}

impl PluginEntry {
    pub fn prefix(&self) -> &str {
        match self {
            PluginEntry::Prefix(prefix) | PluginEntry::Ranged(prefix, _, _) => prefix,
        }
    }

    /// Sub-record indices for ranged entries, empty for bare prefixes
    pub fn indices(&self) -> Range<u32> {
        match self {
            PluginEntry::Prefix(_) => 0..0,
            PluginEntry::Ranged(_, start, count) => *start..start.saturating_add(*count),
        }
    }

    pub fn is_ranged(&self) -> bool {
        matches!(self, PluginEntry::Ranged(..))
    }
}

/// Plugin category name and the entries filed under it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginGroup {
    pub category: Cow<'static, str>,
    pub entries: Cow<'static, [PluginEntry]>,
}

/// A simulated area detector: base prefix plus camera port
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaDetector {
    pub prefix: Cow<'static, str>,
    pub cam: Cow<'static, str>,
}

impl AreaDetector {
    /// Full prefix of the camera port (`prefix` followed by `cam`)
    pub fn cam_prefix(&self) -> String {
        format!("{}{}", self.prefix, self.cam)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plugin_entry_prefix() {
        let bare = PluginEntry::Prefix(Cow::Borrowed("ROI1:"));
        let ranged = PluginEntry::Ranged(Cow::Borrowed("Over1:"), 1, 8);
        assert_eq!(bare.prefix(), "ROI1:");
        assert_eq!(ranged.prefix(), "Over1:");
        assert!(!bare.is_ranged());
        assert!(ranged.is_ranged());
    }

    #[test]
    fn test_plugin_entry_indices() {
        let ranged = PluginEntry::Ranged(Cow::Borrowed("Over1:"), 1, 8);
        assert_eq!(ranged.indices().collect::<Vec<_>>(), (1..=8u32).collect::<Vec<_>>());
        assert!(PluginEntry::Prefix(Cow::Borrowed("CC1:")).indices().is_empty());
    }

    #[test]
    fn test_area_detector_cam_prefix() {
        let det = AreaDetector {
            prefix: Cow::Borrowed("XF:31IDA-BI{Cam:Tbl}"),
            cam: Cow::Borrowed("cam1:"),
        };
        assert_eq!(det.cam_prefix(), "XF:31IDA-BI{Cam:Tbl}cam1:");
    }

    #[test]
    fn test_ranged_entry_toml_shape() {
        #[derive(Serialize, Deserialize)]
        struct Wrapper {
            entries: Vec<PluginEntry>,
        }

        let parsed: Wrapper = toml::from_str(r#"entries = [["Over1:", 1, 8]]"#).unwrap();
        assert_eq!(
            parsed.entries,
            vec![PluginEntry::Ranged(Cow::Borrowed("Over1:"), 1, 8)]
        );

        let parsed: Wrapper = toml::from_str(r#"entries = ["Proc1:"]"#).unwrap();
        assert_eq!(parsed.entries, vec![PluginEntry::Prefix(Cow::Borrowed("Proc1:"))]);
    }
}
