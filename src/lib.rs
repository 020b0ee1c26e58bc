//! ophyd-examples - shared setup for the device-control example programs
//!
//! Provides the channel tables the examples run against and the console
//! logging they report through.

pub mod config;
pub mod context;
pub mod inventory;
pub mod logging;
