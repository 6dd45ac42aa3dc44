//! Timestamp source that never goes backwards.

use std::sync::Mutex;

use chrono::{DateTime, Utc};

/// Hands out wall-clock timestamps, clamped so that each one is at least
/// the previous one even if the system clock steps back.
#[derive(Debug)]
pub struct MonotonicClock {
    last: Mutex<DateTime<Utc>>,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            last: Mutex::new(DateTime::<Utc>::MIN_UTC),
        }
    }

    /// Current time, never earlier than any previous call.
    pub fn now(&self) -> DateTime<Utc> {
        self.observe(Utc::now())
    }

    fn observe(&self, wall: DateTime<Utc>) -> DateTime<Utc> {
        // Poisoning cannot leave the timestamp half-written.
        let mut last = self.last.lock().unwrap_or_else(|e| e.into_inner());
        if wall > *last {
            *last = wall;
        }
        *last
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;

    #[test]
    fn successive_calls_do_not_decrease() {
        let clock = MonotonicClock::new();
        let mut prev = clock.now();
        for _ in 0..100 {
            let next = clock.now();
            assert!(next >= prev);
            prev = next;
        }
    }

    #[test]
    fn clamps_when_wall_clock_steps_back() {
        let clock = MonotonicClock::new();
        let t0 = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();

        assert_eq!(clock.observe(t0), t0);
        assert_eq!(clock.observe(t0 - Duration::seconds(30)), t0);
        assert_eq!(
            clock.observe(t0 + Duration::milliseconds(5)),
            t0 + Duration::milliseconds(5)
        );
    }
}
