//! Timestamp type and the clock abstraction used by the engine.
//!
//! Timestamps are Unix epoch seconds (UTC). Expiry is evaluated against the
//! injected [`Clock`] at the moment of each call; there is no background sweep.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// A Unix timestamp in seconds since epoch (UTC).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(u64);

impl Timestamp {
    pub fn new(secs: u64) -> Self {
        Self(secs)
    }

    /// Get the current system time as a `Timestamp`.
    pub fn now() -> Self {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system clock before Unix epoch")
            .as_secs();
        Self(secs)
    }

    pub fn as_secs(&self) -> u64 {
        self.0
    }

    /// Seconds from this instant until `deadline`; zero once it is reached.
    pub fn remaining_until(&self, deadline: Timestamp) -> u64 {
        deadline.0.saturating_sub(self.0)
    }

    /// Whether this instant, taken as a deadline, has passed at `now`.
    ///
    /// A deadline equal to `now` has not passed yet.
    pub fn has_passed(&self, now: Timestamp) -> bool {
        now.0 > self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}

/// Source of "current time" for every time-dependent decision in the engine.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}

/// Wall-clock time.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deadline_is_exclusive() {
        let deadline = Timestamp::new(100);
        assert!(!deadline.has_passed(Timestamp::new(99)));
        assert!(!deadline.has_passed(Timestamp::new(100)));
        assert!(deadline.has_passed(Timestamp::new(101)));
    }

    #[test]
    fn system_clock_is_after_epoch() {
        assert!(SystemClock.now() > Timestamp::new(0));
    }
}
