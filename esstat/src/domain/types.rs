//! Panel payloads
//!
//! Each panel of the dashboard is fed by one cluster API query. The types here
//! keep only the fields the panels show; anything else in the response is
//! ignored during deserialization.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One named category of displayed data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Panel {
    Status,
    Settings,
    Recovery,
    Relocation,
}

impl Panel {
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Panel::Status => "Status",
            Panel::Settings => "Cluster settings",
            Panel::Recovery => "Shards recovery in progress...",
            Panel::Relocation => "Shards relocation in progress...",
        }
    }
}

/// `_cluster/health`, trimmed to the fields the status panel shows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterHealth {
    pub cluster_name: Option<String>,
    pub status: Option<String>,
    pub timed_out: bool,
    pub number_of_nodes: u64,
    pub number_of_data_nodes: u64,
    pub active_primary_shards: u64,
    pub active_shards: u64,
    pub active_shards_percent_as_number: f64,
    pub relocating_shards: u64,
    pub initializing_shards: u64,
    pub unassigned_shards: u64,
    pub delayed_unassigned_shards: u64,
    pub number_of_pending_tasks: u64,
    pub number_of_in_flight_fetch: u64,
    pub task_max_waiting_in_queue_millis: u64,
}

impl ClusterHealth {
    /// Cluster identifier, `None` when absent or blank.
    #[must_use]
    pub fn cluster_name(&self) -> Option<&str> {
        self.cluster_name.as_deref().map(str::trim).filter(|name| !name.is_empty())
    }
}

/// Cluster settings the settings panel tracks.
pub const TRACKED_SETTINGS: &[&str] = &[
    "cluster.name",
    "cluster.routing.allocation.disk.watermark.flood_stage",
    "cluster.routing.allocation.disk.watermark.high",
    "cluster.routing.allocation.disk.watermark.low",
    "cluster.routing.allocation.enable",
    "cluster.routing.allocation.type",
    "cluster.routing.rebalance.enable",
    "indices.recovery.max_bytes_per_sec",
    "cluster.routing.allocation.balance.index",
    "cluster.routing.allocation.balance.shard",
    "cluster.routing.allocation.balance.threshold",
    "cluster.routing.allocation.cluster_concurrent_rebalance",
    "cluster.routing.allocation.node_concurrent_recoveries",
];

/// Raw `_cluster/settings?include_defaults=true&flat_settings=true` body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SettingsResponse {
    pub defaults: Map<String, Value>,
    pub persistent: Map<String, Value>,
    pub transient: Map<String, Value>,
}

/// Effective values of the tracked settings, ordered by key.
///
/// The order is what edit mode's cursor indexes into.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ClusterSettings(BTreeMap<String, String>);

impl ClusterSettings {
    /// Merge the three settings layers; transient beats persistent beats defaults.
    #[must_use]
    pub fn from_response(response: &SettingsResponse) -> Self {
        let mut merged = BTreeMap::new();
        for layer in [&response.defaults, &response.persistent, &response.transient] {
            for (key, value) in layer {
                if TRACKED_SETTINGS.contains(&key.as_str()) {
                    merged.insert(key.clone(), display_value(value));
                }
            }
        }
        Self(merged)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Key/value pair at a row position.
    #[must_use]
    pub fn row(&self, index: usize) -> Option<(&str, &str)> {
        self.0.iter().nth(index).map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ClusterSettings {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// One row of `_cat/recovery?active_only=true&format=json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecoveryRecord {
    pub index: String,
    pub shard: String,
    pub stage: String,
    pub source_node: String,
    pub target_node: String,
    pub files_percent: String,
    pub bytes_percent: String,
    pub translog_ops_percent: String,
}

/// One row of `_cat/shards?format=json`.
///
/// Unassigned shards report `null` for store, docs, ip and node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShardRecord {
    pub index: String,
    pub shard: String,
    pub prirep: String,
    pub state: String,
    pub store: Option<String>,
    pub docs: Option<String>,
    pub ip: Option<String>,
    pub node: Option<String>,
    #[serde(skip_deserializing)]
    pub source: String,
    #[serde(skip_deserializing)]
    pub target: String,
}

impl ShardRecord {
    /// A relocating shard's node reads `"src -> dst"`; split it into the
    /// source and target columns.
    pub fn split_node(&mut self) {
        let node = self.node.as_deref().unwrap_or_default();
        match node.split_once("->") {
            Some((source, target)) => {
                self.source = source.trim().to_string();
                self.target = target.trim().to_string();
            }
            None => {
                self.source = node.to_string();
                self.target = String::new();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_health_ignores_unknown_fields() {
        let health: ClusterHealth = serde_json::from_value(json!({
            "cluster_name": "prod",
            "status": "green",
            "active_shards": 12,
            "discovered_master": true
        }))
        .unwrap();
        assert_eq!(health.cluster_name(), Some("prod"));
        assert_eq!(health.active_shards, 12);
    }

    #[test]
    fn test_blank_cluster_name_is_absent() {
        let health = ClusterHealth { cluster_name: Some("  ".to_string()), ..Default::default() };
        assert_eq!(health.cluster_name(), None);
        assert_eq!(ClusterHealth::default().cluster_name(), None);
    }

    #[test]
    fn test_settings_layers_precedence() {
        let response: SettingsResponse = serde_json::from_value(json!({
            "defaults": {
                "cluster.routing.allocation.enable": "all",
                "cluster.routing.rebalance.enable": "all",
                "cluster.info.update.interval": "30s"
            },
            "persistent": { "cluster.routing.allocation.enable": "primaries" },
            "transient": { "cluster.routing.allocation.enable": "none" }
        }))
        .unwrap();

        let settings = ClusterSettings::from_response(&response);
        assert_eq!(settings.len(), 2);
        assert_eq!(settings.row(0), Some(("cluster.routing.allocation.enable", "none")));
        assert_eq!(settings.row(1), Some(("cluster.routing.rebalance.enable", "all")));
        assert_eq!(settings.row(2), None);
    }

    #[test]
    fn test_settings_non_string_values() {
        let response: SettingsResponse = serde_json::from_value(json!({
            "persistent": { "cluster.routing.allocation.balance.threshold": 1.5 }
        }))
        .unwrap();
        let settings = ClusterSettings::from_response(&response);
        assert_eq!(settings.row(0), Some(("cluster.routing.allocation.balance.threshold", "1.5")));
    }

    #[test]
    fn test_split_relocating_node() {
        let mut shard = ShardRecord {
            node: Some("node-1 -> 10.0.0.2 abc node-2".to_string()),
            ..Default::default()
        };
        shard.split_node();
        assert_eq!(shard.source, "node-1");
        assert_eq!(shard.target, "10.0.0.2 abc node-2");
    }

    #[test]
    fn test_split_unassigned_node() {
        let mut shard = ShardRecord::default();
        shard.split_node();
        assert_eq!(shard.source, "");
        assert_eq!(shard.target, "");
    }
}
