//! Scripted in-memory cluster for scheduler and tick-loop tests.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use tokio::time::{Duration, Instant};

use super::DataSource;
use crate::domain::{ClusterHealth, ClusterSettings, FetchError, RecoveryRecord, ShardRecord};

#[derive(Debug)]
pub struct FakeCluster {
    pub reachable: AtomicBool,
    pub fail_relocations: AtomicBool,
    pub latency: Duration,
    cluster_name: Mutex<Option<String>>,
    settings_rows: AtomicUsize,
    status_calls: Mutex<Vec<Instant>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl FakeCluster {
    pub fn new(cluster_name: &str, latency: Duration) -> Self {
        Self {
            reachable: AtomicBool::new(true),
            fail_relocations: AtomicBool::new(false),
            latency,
            cluster_name: Mutex::new(Some(cluster_name.to_string())),
            settings_rows: AtomicUsize::new(5),
            status_calls: Mutex::new(Vec::new()),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    pub fn set_reachable(&self, reachable: bool) {
        self.reachable.store(reachable, Ordering::SeqCst);
    }

    pub fn set_cluster_name(&self, name: Option<&str>) {
        *self.cluster_name.lock().unwrap_or_else(PoisonError::into_inner) = name.map(String::from);
    }

    pub fn set_settings_rows(&self, rows: usize) {
        self.settings_rows.store(rows, Ordering::SeqCst);
    }

    /// Instants at which each cycle's status query started.
    pub fn status_calls(&self) -> Vec<Instant> {
        self.status_calls.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    async fn respond<T>(&self, path: &str, value: impl FnOnce() -> T) -> Result<T, FetchError> {
        tokio::time::sleep(self.latency).await;
        if self.reachable.load(Ordering::SeqCst) {
            Ok(value())
        } else {
            Err(FetchError::Status { path: path.to_string(), status: 503 })
        }
    }
}

impl DataSource for FakeCluster {
    async fn status(&self) -> Result<ClusterHealth, FetchError> {
        self.status_calls.lock().unwrap_or_else(PoisonError::into_inner).push(Instant::now());
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        let name = self.cluster_name.lock().unwrap_or_else(PoisonError::into_inner).clone();
        let result = self
            .respond("_cluster/health", || ClusterHealth {
                cluster_name: name,
                status: Some("green".to_string()),
                number_of_nodes: 3,
                ..Default::default()
            })
            .await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }

    async fn settings(&self) -> Result<ClusterSettings, FetchError> {
        let rows = self.settings_rows.load(Ordering::SeqCst);
        self.respond("_cluster/settings", || {
            (0..rows).map(|i| (format!("setting.{i}"), format!("value-{i}"))).collect()
        })
        .await
    }

    async fn recovery(&self) -> Result<Vec<RecoveryRecord>, FetchError> {
        self.respond("_cat/recovery", || {
            vec![RecoveryRecord { index: "logs-1".to_string(), ..Default::default() }]
        })
        .await
    }

    async fn relocations(&self) -> Result<Vec<ShardRecord>, FetchError> {
        if self.fail_relocations.load(Ordering::SeqCst) {
            tokio::time::sleep(self.latency).await;
            return Err(FetchError::Status { path: "_cat/shards".to_string(), status: 500 });
        }
        self.respond("_cat/shards", || {
            vec![ShardRecord { index: "logs-1".to_string(), ..Default::default() }]
        })
        .await
    }
}
