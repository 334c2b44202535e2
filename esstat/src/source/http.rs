//! Elasticsearch HTTP data source

use std::time::Duration;

use log::debug;
use serde::de::DeserializeOwned;

use super::DataSource;
use crate::domain::{
    ClusterHealth, ClusterSettings, FetchError, RecoveryRecord, SettingsResponse, ShardRecord,
};

const HEALTH_PATH: &str = "_cluster/health";
const SETTINGS_PATH: &str = "_cluster/settings?include_defaults=true&flat_settings=true";
const RECOVERY_PATH: &str = "_cat/recovery?active_only=true&format=json";
const SHARDS_PATH: &str = "_cat/shards?v=true&format=json";

const CONNECT_TIMEOUT: Duration = Duration::from_secs(2);

/// Shards in these states are not moving and stay off the relocation panel.
const SETTLED_SHARD_STATES: &[&str] = &["STARTED"];

/// Async client for the four cluster queries.
#[derive(Debug, Clone)]
pub struct ElasticsearchClient {
    client: reqwest::Client,
    base_url: String,
}

impl ElasticsearchClient {
    /// Build a client rooted at `base_url` (e.g. `http://localhost:9200`).
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT.min(timeout))
            .timeout(timeout)
            .build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, FetchError> {
        let url = format!("{}/{path}", self.base_url);
        debug!("GET {url}");
        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status { path: path.to_string(), status: status.as_u16() });
        }
        let body = response.bytes().await?;
        serde_json::from_slice(&body)
            .map_err(|source| FetchError::Decode { path: path.to_string(), source })
    }
}

impl DataSource for ElasticsearchClient {
    async fn status(&self) -> Result<ClusterHealth, FetchError> {
        self.get_json(HEALTH_PATH).await
    }

    async fn settings(&self) -> Result<ClusterSettings, FetchError> {
        let response: SettingsResponse = self.get_json(SETTINGS_PATH).await?;
        Ok(ClusterSettings::from_response(&response))
    }

    async fn recovery(&self) -> Result<Vec<RecoveryRecord>, FetchError> {
        self.get_json(RECOVERY_PATH).await
    }

    async fn relocations(&self) -> Result<Vec<ShardRecord>, FetchError> {
        let shards: Vec<ShardRecord> = self.get_json(SHARDS_PATH).await?;
        Ok(moving_shards(shards))
    }
}

fn moving_shards(shards: Vec<ShardRecord>) -> Vec<ShardRecord> {
    shards
        .into_iter()
        .filter(|shard| !SETTLED_SHARD_STATES.contains(&shard.state.as_str()))
        .map(|mut shard| {
            shard.split_node();
            shard
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shard(state: &str, node: Option<&str>) -> ShardRecord {
        ShardRecord {
            index: "logs-1".to_string(),
            state: state.to_string(),
            node: node.map(String::from),
            ..Default::default()
        }
    }

    #[test]
    fn test_moving_shards_drops_started() {
        let shards = vec![
            shard("STARTED", Some("a")),
            shard("RELOCATING", Some("a -> b")),
            shard("UNASSIGNED", None),
        ];
        let moving = moving_shards(shards);
        assert_eq!(moving.len(), 2);
        assert_eq!(moving[0].source, "a");
        assert_eq!(moving[0].target, "b");
        assert_eq!(moving[1].state, "UNASSIGNED");
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = ElasticsearchClient::new("http://es:9200/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.base_url(), "http://es:9200");
    }
}
