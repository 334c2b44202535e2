//! # Snapshot Store
//!
//! Holds the latest successfully fetched set of panel payloads.
//!
//! The store keeps an `Arc<Snapshot>` behind a lock that is only ever held for
//! a pointer swap or clone, never across an `.await`. Readers take their own
//! `Arc` and render from it, so a reader sees either the whole previous
//! snapshot or the whole new one.
//!
//! The data-ready latch flips once, on the first successful replacement, and
//! never flips back.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use serde::Serialize;

use crate::domain::{ClusterHealth, ClusterSettings, RecoveryRecord, ShardRecord};

/// One payload per panel, replaced wholesale.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Snapshot {
    pub status: ClusterHealth,
    pub settings: ClusterSettings,
    pub recovery: Vec<RecoveryRecord>,
    pub relocations: Vec<ShardRecord>,
}

#[derive(Debug, Default)]
pub struct SnapshotStore {
    current: RwLock<Arc<Snapshot>>,
    ready: AtomicBool,
    generation: AtomicU64,
}

impl SnapshotStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current snapshot. Empty until the first successful refresh.
    #[must_use]
    pub fn load(&self) -> Arc<Snapshot> {
        Arc::clone(&self.current.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Whether at least one refresh has succeeded.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    /// Number of successful replacements so far.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Swap in a new snapshot. Returns `true` if this flipped the data-ready latch.
    pub(crate) fn replace(&self, snapshot: Snapshot) -> bool {
        let next = Arc::new(snapshot);
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = next;
        self.generation.fetch_add(1, Ordering::AcqRel);
        !self.ready.swap(true, Ordering::AcqRel)
    }
}
