//! Per-operation state machine.
//!
//! Two independent concerns describe where an operation stands:
//!
//! - [`Lifecycle`] tracks which notification cycle the operation is in. Older
//!   overall operations use it to spot a child that just appeared and to tell
//!   a terminal report from an intermediate one.
//! - [`Outcome`] tracks how the work is going: normally, as a retry of
//!   earlier work, or being aborted.
//!
//! # Examples
//!
//! ```rust
//! use progressmgr::operation::{Lifecycle, Outcome};
//!
//! let mut lifecycle = Lifecycle::Initializing;
//! lifecycle = lifecycle.advance();
//! assert!(lifecycle.is_first_update());
//! lifecycle = lifecycle.advance();
//! assert_eq!(lifecycle, Lifecycle::Active);
//!
//! let outcome = Outcome::Retry.abort();
//! assert!(outcome.is_aborting());
//! assert!(outcome.is_retry());
//! ```

/// Notification cycle an operation is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// Constructed, not yet reported.
    Initializing,
    /// Inside the notification cycle right after construction or a retry.
    FirstUpdate,
    /// Reported at least twice.
    Active,
    /// Final report, sent while the owner releases the operation.
    Terminal {
        /// Whether the final report is also the first update.
        first_update: bool,
    },
}

impl Lifecycle {
    /// State after one more notification pass.
    #[must_use]
    pub fn advance(self) -> Self {
        match self {
            Lifecycle::Initializing => Lifecycle::FirstUpdate,
            Lifecycle::FirstUpdate | Lifecycle::Active => Lifecycle::Active,
            Lifecycle::Terminal { .. } => Lifecycle::Terminal {
                first_update: false,
            },
        }
    }

    /// Terminal state carrying over the first-update marker.
    #[must_use]
    pub fn terminate(self) -> Self {
        Lifecycle::Terminal {
            first_update: self.is_first_update(),
        }
    }

    /// Re-arm the first-update marker, as a retry does.
    #[must_use]
    pub fn rearm(self) -> Self {
        match self {
            Lifecycle::Terminal { .. } => Lifecycle::Terminal { first_update: true },
            _ => Lifecycle::FirstUpdate,
        }
    }

    pub fn is_first_update(self) -> bool {
        matches!(
            self,
            Lifecycle::FirstUpdate
                | Lifecycle::Terminal {
                    first_update: true
                }
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Lifecycle::Terminal { .. })
    }
}

/// How the tracked work is going.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Outcome {
    /// Plain progress.
    #[default]
    Normal,
    /// Re-attempt of earlier work; its length adds to overall totals.
    Retry,
    /// The work is being abandoned.
    Aborting {
        /// Whether the operation was a retry before aborting.
        retry: bool,
    },
}

impl Outcome {
    /// Mark as a retry, keeping an abort in place.
    #[must_use]
    pub fn retry(self) -> Self {
        match self {
            Outcome::Aborting { .. } => Outcome::Aborting { retry: true },
            _ => Outcome::Retry,
        }
    }

    /// Mark as aborting, remembering whether it was a retry.
    #[must_use]
    pub fn abort(self) -> Self {
        Outcome::Aborting {
            retry: self.is_retry(),
        }
    }

    pub fn is_retry(self) -> bool {
        matches!(self, Outcome::Retry | Outcome::Aborting { retry: true })
    }

    pub fn is_aborting(self) -> bool {
        matches!(self, Outcome::Aborting { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle_advances_once_through_first_update() {
        let lifecycle = Lifecycle::Initializing;
        assert!(!lifecycle.is_first_update());

        let lifecycle = lifecycle.advance();
        assert_eq!(lifecycle, Lifecycle::FirstUpdate);

        let lifecycle = lifecycle.advance();
        assert_eq!(lifecycle, Lifecycle::Active);
        assert_eq!(lifecycle.advance(), Lifecycle::Active);
    }

    #[test]
    fn test_lifecycle_terminate_keeps_first_update() {
        assert_eq!(
            Lifecycle::FirstUpdate.terminate(),
            Lifecycle::Terminal { first_update: true }
        );
        assert_eq!(
            Lifecycle::Active.terminate(),
            Lifecycle::Terminal {
                first_update: false
            }
        );
        assert!(Lifecycle::Active.terminate().is_terminal());
    }

    #[test]
    fn test_lifecycle_rearm() {
        assert_eq!(Lifecycle::Active.rearm(), Lifecycle::FirstUpdate);
        assert!(Lifecycle::Active.rearm().is_first_update());
    }

    #[test]
    fn test_outcome_retry_and_abort_are_sticky() {
        assert!(Outcome::Normal.retry().is_retry());
        assert!(!Outcome::Normal.abort().is_retry());
        assert_eq!(Outcome::Retry.abort(), Outcome::Aborting { retry: true });
        assert_eq!(
            Outcome::Normal.abort().retry(),
            Outcome::Aborting { retry: true }
        );
        assert!(Outcome::Retry.abort().is_aborting());
    }
}
