//! Domain model for esstat
//!
//! This module contains the panel payloads and errors that provide:
//! - Typed views over the cluster API responses
//! - Structured error handling

pub mod errors;
pub mod types;

pub use types::{
    ClusterHealth, ClusterSettings, Panel, RecoveryRecord, SettingsResponse, ShardRecord,
    TRACKED_SETTINGS,
};

pub use errors::{ConfigError, FetchError, TerminalError};
