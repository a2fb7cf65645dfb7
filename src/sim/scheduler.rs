//! Fixed-interval producers with an injectable clock
//!
//! The spawn and fire schedulers are not backed by host timers. Each is an
//! `IntervalTimer` polled from the tick function with the current time, so
//! tests can simulate arbitrary elapsed time deterministically.

use serde::{Deserialize, Serialize};

/// A repeating timer driven by an explicit clock.
///
/// `fire_count` reports how many intervals have elapsed since the last poll,
/// so a long gap between polls yields the same total firings as frequent
/// polling (catch-up semantics).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntervalTimer {
    interval_ms: f64,
    last_fired_ms: f64,
    cancelled: bool,
}

impl IntervalTimer {
    /// Create a timer that first fires `interval_ms` after `now_ms`.
    pub fn new(interval_ms: f64, now_ms: f64) -> Self {
        Self {
            interval_ms,
            last_fired_ms: now_ms,
            cancelled: false,
        }
    }

    /// Number of firings due at `now_ms`. Advances the timer past them.
    pub fn fire_count(&mut self, now_ms: f64) -> u32 {
        if self.cancelled {
            return 0;
        }
        let mut count = 0;
        while now_ms - self.last_fired_ms >= self.interval_ms {
            self.last_fired_ms += self.interval_ms;
            count += 1;
        }
        count
    }

    /// Permanently stop the timer. Idempotent.
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    /// Whether the timer has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_fire_before_interval() {
        let mut timer = IntervalTimer::new(100.0, 0.0);
        assert_eq!(timer.fire_count(50.0), 0);
        assert_eq!(timer.fire_count(99.9), 0);
    }

    #[test]
    fn test_fires_once_per_interval() {
        let mut timer = IntervalTimer::new(100.0, 0.0);
        assert_eq!(timer.fire_count(100.0), 1);
        assert_eq!(timer.fire_count(150.0), 0);
        assert_eq!(timer.fire_count(200.0), 1);
    }

    #[test]
    fn test_catch_up_after_long_gap() {
        let mut timer = IntervalTimer::new(100.0, 0.0);
        assert_eq!(timer.fire_count(1000.0), 10);
        assert_eq!(timer.fire_count(1000.0), 0);
        assert_eq!(timer.fire_count(1100.0), 1);
    }

    #[test]
    fn test_cancelled_timer_never_fires() {
        let mut timer = IntervalTimer::new(100.0, 0.0);
        timer.cancel();
        assert!(timer.is_cancelled());
        assert_eq!(timer.fire_count(10_000.0), 0);
        // cancel is idempotent
        timer.cancel();
        assert!(timer.is_cancelled());
    }
}
