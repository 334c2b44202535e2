//! Refresh cadence anchored to the previous attempt's completion.

use tokio::time::{Duration, Instant};

/// Tracks when the last refresh attempt finished and derives the next deadline.
///
/// The deadline moves only when an attempt completes, success or failure, so a
/// failing cluster is polled at the same cadence as a healthy one and a slow
/// fetch pushes the next one back instead of causing a catch-up burst.
#[derive(Debug, Clone)]
pub struct RefreshClock {
    interval: Duration,
    last_attempt: Option<Instant>,
}

impl RefreshClock {
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self { interval, last_attempt: None }
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Record a completed attempt, successful or not.
    pub fn stamp(&mut self, completed_at: Instant) {
        self.last_attempt = Some(completed_at);
    }

    /// When the next cycle is due. Before any attempt that is `now`.
    #[must_use]
    pub fn next_deadline(&self, now: Instant) -> Instant {
        self.last_attempt.map_or(now, |last| last + self.interval)
    }

    /// Whole seconds left before the next cycle, for the countdown panel.
    #[must_use]
    pub fn seconds_until_next(&self, now: Instant) -> u64 {
        let interval = self.interval.as_secs();
        match self.last_attempt {
            None => interval,
            Some(last) => interval.saturating_sub(now.saturating_duration_since(last).as_secs()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_deadline_is_immediate() {
        let clock = RefreshClock::new(Duration::from_secs(5));
        let now = Instant::now();
        assert_eq!(clock.next_deadline(now), now);
        assert_eq!(clock.seconds_until_next(now), 5);
    }

    #[test]
    fn test_deadline_anchored_to_completion() {
        let mut clock = RefreshClock::new(Duration::from_secs(5));
        let start = Instant::now();
        let completed = start + Duration::from_millis(1_700);
        clock.stamp(completed);
        assert_eq!(clock.next_deadline(start), completed + Duration::from_secs(5));
    }

    #[test]
    fn test_failure_still_advances_deadline() {
        let mut clock = RefreshClock::new(Duration::from_secs(5));
        let t = Instant::now();
        clock.stamp(t);
        assert_eq!(clock.next_deadline(t), t + Duration::from_secs(5));
        assert_eq!(clock.seconds_until_next(t), 5);
    }

    #[test]
    fn test_countdown_saturates_at_zero() {
        let mut clock = RefreshClock::new(Duration::from_secs(5));
        let t = Instant::now();
        clock.stamp(t);
        assert_eq!(clock.seconds_until_next(t + Duration::from_millis(2_500)), 3);
        assert_eq!(clock.seconds_until_next(t + Duration::from_secs(60)), 0);
    }
}
