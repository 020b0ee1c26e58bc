//! Channel tables shared by the example programs
//!
//! The identifiers are opaque to this crate. Order is significant: examples
//! index into these tables by position.

use std::borrow::Cow;

use super::types::{AreaDetector, FakeMotor, PluginEntry, PluginGroup};

const fn prefix(value: &'static str) -> PluginEntry {
    PluginEntry::Prefix(Cow::Borrowed(value))
}

const fn group(category: &'static str, entries: &'static [PluginEntry]) -> PluginGroup {
    PluginGroup {
        category: Cow::Borrowed(category),
        entries: Cow::Borrowed(entries),
    }
}

pub static MOTOR_RECS: &[&str] = &[
    "XF:31IDA-OP{Tbl-Ax:X1}Mtr",
    "XF:31IDA-OP{Tbl-Ax:X2}Mtr",
    "XF:31IDA-OP{Tbl-Ax:X3}Mtr",
    "XF:31IDA-OP{Tbl-Ax:X4}Mtr",
    "XF:31IDA-OP{Tbl-Ax:X5}Mtr",
    "XF:31IDA-OP{Tbl-Ax:X6}Mtr",
];

pub static FAKE_MOTORS: &[FakeMotor] = &[FakeMotor {
    readback: Cow::Borrowed("XF:31IDA-OP{Tbl-Ax:FakeMtr}-I"),
    setpoint: Cow::Borrowed("XF:31IDA-OP{Tbl-Ax:FakeMtr}-SP"),
    moving: Cow::Borrowed("XF:31IDA-OP{Tbl-Ax:FakeMtr}Sts:Moving-Sts"),
    actuate: Cow::Borrowed("XF:31IDA-OP{Tbl-Ax:FakeMtr}Cmd:Go-Cmd.PROC"),
    stop: Cow::Borrowed("XF:31IDA-OP{Tbl-Ax:FakeMtr}Cmd:Stop-Cmd.PROC"),
}];

pub static FAKE_SENSORS: &[&str] = &[
    "XF:31IDA-BI{Dev:1}E-I",
    "XF:31IDA-BI{Dev:2}E-I",
    "XF:31IDA-BI{Dev:3}E-I",
    "XF:31IDA-BI{Dev:4}E-I",
    "XF:31IDA-BI{Dev:5}E-I",
    "XF:31IDA-BI{Dev:6}E-I",
];

const IMAGE_PLUGINS: &[PluginEntry] = &[prefix("image1:")];

const ROI_PLUGINS: &[PluginEntry] = &[
    prefix("ROI1:"),
    prefix("ROI2:"),
    prefix("ROI3:"),
    prefix("ROI4:"),
];

const FILE_PLUGINS: &[PluginEntry] = &[
    prefix("netCDF1:"),
    prefix("TIFF1:"),
    prefix("JPEG1:"),
    prefix("Nexus1:"),
    prefix("HDF1:"),
    prefix("Magick1:"),
];

const PROC_PLUGINS: &[PluginEntry] = &[prefix("Proc1:")];

const STATS_PLUGINS: &[PluginEntry] = &[
    prefix("Stats1:"),
    prefix("Stats2:"),
    prefix("Stats3:"),
    prefix("Stats4:"),
    prefix("Stats5:"),
];

// Overlay plugin with sub-overlays 1 through 8
const OVERLAY_PLUGINS: &[PluginEntry] = &[PluginEntry::Ranged(Cow::Borrowed("Over1:"), 1, 8)];

const TRANS_PLUGINS: &[PluginEntry] = &[prefix("Trans1:")];

const CC_PLUGINS: &[PluginEntry] = &[prefix("CC1:"), prefix("CC2:")];

/// Area-detector plugin prefixes grouped by category
pub static AD_PLUGINS: &[PluginGroup] = &[
    group("image", IMAGE_PLUGINS),
    group("roi", ROI_PLUGINS),
    group("file", FILE_PLUGINS),
    group("proc", PROC_PLUGINS),
    group("stats", STATS_PLUGINS),
    group("overlay", OVERLAY_PLUGINS),
    group("trans", TRANS_PLUGINS),
    group("cc", CC_PLUGINS),
];

pub static SIM_AREADETECTOR: &[AreaDetector] = &[
    AreaDetector {
        prefix: Cow::Borrowed("XF:31IDA-BI{Cam:Tbl}"),
        cam: Cow::Borrowed("cam1:"),
    },
    AreaDetector {
        prefix: Cow::Borrowed("XF:31IDA-BI{Cam:Tbl}"),
        cam: Cow::Borrowed("cam2:"),
    },
];

/// Channel names for the channel access server to create
pub static SERVER_PVNAMES: &[&str] = &["_server_pv_"];

/// A real instrument. Not used by any example yet, handle with care.
pub static SCALERS: &[&str] = &["XF:23ID2-ES{Sclr:1}"];

/// Look up the plugin entries filed under `category`
pub fn ad_plugins(category: &str) -> Option<&'static [PluginEntry]> {
    AD_PLUGINS
        .iter()
        .find(|group| group.category == category)
        .map(|group| &*group.entries)
}
