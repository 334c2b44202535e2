//! Periodic snapshot fetching.

pub mod clock;
pub mod scheduler;

pub use clock::RefreshClock;
pub use scheduler::{RefreshEvent, RefreshScheduler, SchedulerControl};
