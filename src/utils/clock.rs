//! Time sources used to derive operation statistics.
//!
//! Operations read the clock once per update to compute elapsed time, rate
//! and the remaining-time estimate. The registry owns one [`Clock`] shared by
//! every operation it tracks.
//!
//! # Examples
//!
//! ```rust
//! use progressmgr::utils::{Clock, ManualClock};
//! use std::time::Duration;
//!
//! let clock = ManualClock::new();
//! clock.advance(Duration::from_millis(1500));
//! assert_eq!(clock.now_secs(), 1.5);
//! ```

use std::fmt::Debug;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

/// A source of time, in seconds since an arbitrary origin.
pub trait Clock: Debug + Send + Sync {
    /// Current reading in seconds.
    fn now_secs(&self) -> f64;
}

/// Monotonic wall clock measured from its creation.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    /// Create a clock whose origin is now.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_secs(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// Clock that only moves when told to.
///
/// Useful for deterministic statistics, and the only way to exercise a
/// clock that goes backwards.
#[derive(Debug, Default)]
pub struct ManualClock {
    secs: Mutex<f64>,
}

impl ManualClock {
    /// Create a clock reading zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the clock forward.
    pub fn advance(&self, by: Duration) {
        *self.secs.lock().unwrap_or_else(PoisonError::into_inner) += by.as_secs_f64();
    }

    /// Set the reading, which may be earlier than the current one.
    pub fn set_secs(&self, secs: f64) {
        *self.secs.lock().unwrap_or_else(PoisonError::into_inner) = secs;
    }
}

impl Clock for ManualClock {
    fn now_secs(&self) -> f64 {
        *self.secs.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monotonic_clock_does_not_go_backwards() {
        let clock = MonotonicClock::new();
        let first = clock.now_secs();
        let second = clock.now_secs();
        assert!(second >= first);
        assert!(first >= 0.0);
    }

    #[test]
    fn test_manual_clock_advance_and_set() {
        let clock = ManualClock::new();
        assert_eq!(clock.now_secs(), 0.0);

        clock.advance(Duration::from_secs(2));
        assert_eq!(clock.now_secs(), 2.0);

        clock.set_secs(0.5);
        assert_eq!(clock.now_secs(), 0.5);
    }
}
