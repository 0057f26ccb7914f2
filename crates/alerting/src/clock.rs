//! Time source for history timestamps

use chrono::{DateTime, Duration, Utc};
use std::cell::Cell;

/// Source of "now" for lifecycle actions
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Manually driven clock that advances one step after every read
#[derive(Debug, Clone)]
pub struct ManualClock {
    current: Cell<DateTime<Utc>>,
    step: Duration,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self::with_step(start, Duration::seconds(1))
    }

    pub fn with_step(start: DateTime<Utc>, step: Duration) -> Self {
        Self {
            current: Cell::new(start),
            step,
        }
    }

    /// Time the next read will return
    pub fn peek(&self) -> DateTime<Utc> {
        self.current.get()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        let now = self.current.get();
        self.current.set(now + self.step);
        now
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_manual_clock_steps() {
        let start = Utc.with_ymd_and_hms(2025, 5, 30, 8, 0, 0).unwrap();
        let clock = ManualClock::with_step(start, Duration::minutes(2));

        assert_eq!(clock.now(), start);
        assert_eq!(clock.now(), start + Duration::minutes(2));
        assert_eq!(clock.peek(), start + Duration::minutes(4));
    }
}
