//! Shared utility functions.
//!
//! The utils module currently contains:
//!
//! - [`clock`] - Time sources used for elapsed/rate/remaining statistics
//!
//! # Examples
//!
//! ```rust
//! use progressmgr::utils::{Clock, MonotonicClock};
//!
//! let clock = MonotonicClock::new();
//! assert!(clock.now_secs() >= 0.0);
//! ```

pub mod clock;

pub use clock::{Clock, ManualClock, MonotonicClock};
