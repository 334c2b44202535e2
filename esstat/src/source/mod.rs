//! Data sources for the refresh scheduler
//!
//! A [`DataSource`] answers the four panel queries. The scheduler issues them
//! concurrently and treats any `Err` as a failed cycle.

use std::future::Future;
use std::sync::Arc;

use crate::domain::{ClusterHealth, ClusterSettings, FetchError, RecoveryRecord, ShardRecord};

#[cfg(test)]
pub(crate) mod fake;
pub mod http;

pub use http::ElasticsearchClient;

pub trait DataSource: Send + Sync + 'static {
    fn status(&self) -> impl Future<Output = Result<ClusterHealth, FetchError>> + Send;

    fn settings(&self) -> impl Future<Output = Result<ClusterSettings, FetchError>> + Send;

    fn recovery(&self) -> impl Future<Output = Result<Vec<RecoveryRecord>, FetchError>> + Send;

    fn relocations(&self) -> impl Future<Output = Result<Vec<ShardRecord>, FetchError>> + Send;
}

// Lets a caller keep a handle on the source it hands to the scheduler.
impl<T: DataSource> DataSource for Arc<T> {
    fn status(&self) -> impl Future<Output = Result<ClusterHealth, FetchError>> + Send {
        (**self).status()
    }

    fn settings(&self) -> impl Future<Output = Result<ClusterSettings, FetchError>> + Send {
        (**self).settings()
    }

    fn recovery(&self) -> impl Future<Output = Result<Vec<RecoveryRecord>, FetchError>> + Send {
        (**self).recovery()
    }

    fn relocations(&self) -> impl Future<Output = Result<Vec<ShardRecord>, FetchError>> + Send {
        (**self).relocations()
    }
}
