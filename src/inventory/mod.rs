//! Device and channel inventory for the example programs
//!
//! The static tables live in [`tables`]. [`Inventory`] is an owned copy of the
//! same data that can be loaded from the config file, so the examples can be
//! pointed at a different set of records without recompiling.

mod tables;
mod types;

use serde::{Deserialize, Serialize};

pub use tables::{
    ad_plugins, AD_PLUGINS, FAKE_MOTORS, FAKE_SENSORS, MOTOR_RECS, SCALERS, SERVER_PVNAMES,
    SIM_AREADETECTOR,
};
pub use types::{AreaDetector, FakeMotor, PluginEntry, PluginGroup};

/// Owned set of channel tables
///
/// Plain identifier lists come first so the TOML form keeps its arrays of
/// tables at the end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Inventory {
    pub motor_recs: Vec<String>,
    pub fake_sensors: Vec<String>,
    pub server_pvnames: Vec<String>,
    pub scalers: Vec<String>,
    pub fake_motors: Vec<FakeMotor>,
    pub ad_plugins: Vec<PluginGroup>,
    pub sim_areadetector: Vec<AreaDetector>,
}

fn owned(identifiers: &[&str]) -> Vec<String> {
    identifiers.iter().map(|s| s.to_string()).collect()
}

impl Inventory {
    /// The tables compiled into the crate
    pub fn builtin() -> Self {
        Self {
            motor_recs: owned(MOTOR_RECS),
            fake_sensors: owned(FAKE_SENSORS),
            server_pvnames: owned(SERVER_PVNAMES),
            scalers: owned(SCALERS),
            fake_motors: FAKE_MOTORS.to_vec(),
            ad_plugins: AD_PLUGINS.to_vec(),
            sim_areadetector: SIM_AREADETECTOR.to_vec(),
        }
    }

    /// Look up the plugin entries filed under `category`
    pub fn plugins(&self, category: &str) -> Option<&[PluginEntry]> {
        self.ad_plugins
            .iter()
            .find(|group| group.category == category)
            .map(|group| &*group.entries)
    }

    /// Total number of plugin entries across all categories
    pub fn plugin_count(&self) -> usize {
        self.ad_plugins.iter().map(|group| group.entries.len()).sum()
    }
}

impl Default for Inventory {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_matches_static_tables() {
        let inventory = Inventory::builtin();
        assert_eq!(inventory.motor_recs, MOTOR_RECS);
        assert_eq!(inventory.fake_sensors, FAKE_SENSORS);
        assert_eq!(inventory.server_pvnames, SERVER_PVNAMES);
        assert_eq!(inventory.scalers, SCALERS);
        assert_eq!(inventory.fake_motors, FAKE_MOTORS);
        assert_eq!(inventory.ad_plugins, AD_PLUGINS);
        assert_eq!(inventory.sim_areadetector, SIM_AREADETECTOR);
    }

    #[test]
    fn test_inventory_plugins_lookup() {
        let inventory = Inventory::builtin();
        assert_eq!(inventory.plugins("cc").map(|e| e.len()), Some(2));
        assert!(inventory.plugins("missing").is_none());
        assert_eq!(inventory.plugin_count(), 21);
    }

    #[test]
    fn test_inventory_toml_roundtrip() {
        let inventory = Inventory::builtin();
        let toml_str = toml::to_string(&inventory).unwrap();
        let parsed: Inventory = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, inventory);
    }

    #[test]
    fn test_partial_inventory_falls_back_to_builtin() {
        let parsed: Inventory = toml::from_str(r#"scalers = []"#).unwrap();
        assert!(parsed.scalers.is_empty());
        assert_eq!(parsed.motor_recs, MOTOR_RECS);
        assert_eq!(parsed.plugins("overlay"), ad_plugins("overlay"));
    }
}
