//! Gravity timer for automatic descent

use std::time::{Duration, Instant};

/// Default gravity interval
pub const DEFAULT_DROP_DELAY: Duration = Duration::from_millis(500);

/// Tracks when the current piece last fell
#[derive(Debug, Clone, Copy)]
pub struct DropScheduler {
    last_drop: Instant,
    drop_delay: Duration,
}

impl DropScheduler {
    pub fn new(drop_delay: Duration, now: Instant) -> Self {
        Self {
            last_drop: now,
            drop_delay,
        }
    }

    /// True once strictly more than `drop_delay` has passed since the last
    /// drop
    pub fn is_due(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.last_drop) > self.drop_delay
    }

    /// Restart the interval at `now`
    pub fn reset(&mut self, now: Instant) {
        self.last_drop = now;
    }

    pub fn drop_delay(&self) -> Duration {
        self.drop_delay
    }

    pub fn last_drop(&self) -> Instant {
        self.last_drop
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_due_at_exact_delay() {
        let start = Instant::now();
        let scheduler = DropScheduler::new(DEFAULT_DROP_DELAY, start);
        assert!(!scheduler.is_due(start));
        assert!(!scheduler.is_due(start + DEFAULT_DROP_DELAY));
        assert!(scheduler.is_due(start + DEFAULT_DROP_DELAY + Duration::from_millis(1)));
    }

    #[test]
    fn test_reset_restarts_interval() {
        let start = Instant::now();
        let mut scheduler = DropScheduler::new(Duration::from_millis(100), start);
        let later = start + Duration::from_millis(150);
        assert!(scheduler.is_due(later));
        scheduler.reset(later);
        assert!(!scheduler.is_due(later + Duration::from_millis(50)));
        assert_eq!(scheduler.last_drop(), later);
    }

    #[test]
    fn test_clock_before_last_drop_is_not_due() {
        let start = Instant::now() + Duration::from_secs(1);
        let scheduler = DropScheduler::new(Duration::ZERO, start);
        assert!(!scheduler.is_due(start - Duration::from_millis(10)));
    }
}
