//! Progress state of a single tracked operation.
//!
//! An [`Operation`] holds the counters and statistics of one unit of work
//! (a file download, a linking phase). Overall operations additionally
//! absorb the updates of operations registered after them, so their
//! progress reads as the live sum of their children.
//!
//! The registry owns every `Operation`; workers mutate them through an
//! [`OperationHandle`](crate::OperationHandle) and observers read them
//! through a [`ProgressUpdate`](crate::ProgressUpdate).

use super::state::{Lifecycle, Outcome};

use std::fmt;
use std::time::Duration;

/// Identifier of an operation, unique within its registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OperationId(pub(crate) u64);

impl OperationId {
    /// Raw numeric value.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for OperationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "op#{}", self.0)
    }
}

/// Progress state of one tracked unit of work.
#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    id: OperationId,
    title: String,
    current: f64,
    max: f64,
    /// Clock reading at construction.
    start_secs: f64,
    elapsed: Duration,
    remaining: Option<Duration>,
    rate: f64,
    lifecycle: Lifecycle,
    outcome: Outcome,
    is_overall: bool,
    always_show_text: bool,
}

impl Operation {
    pub(crate) fn new(
        id: OperationId,
        length: f64,
        title: String,
        now: f64,
        is_overall: bool,
        always_show_text: bool,
    ) -> Self {
        Self {
            id,
            title,
            current: 0.0,
            max: finite_or_zero(length).max(0.0),
            start_secs: now,
            elapsed: Duration::ZERO,
            remaining: Some(Duration::ZERO),
            rate: 0.0,
            lifecycle: Lifecycle::Initializing,
            outcome: Outcome::Normal,
            is_overall,
            always_show_text,
        }
    }

    /// Start out as a retry without re-arming the first update.
    pub(crate) fn with_retry(self) -> Self {
        Self {
            outcome: Outcome::Retry,
            ..self
        }
    }

    pub fn id(&self) -> OperationId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Amount of work done so far.
    pub fn progress(&self) -> f64 {
        self.current
    }

    /// Total amount of work.
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Completion in `[0, 1]`.
    ///
    /// An operation with nothing to do (including an aborted one, whose
    /// counters are zeroed) reports zero rather than full completion.
    pub fn fraction(&self) -> f64 {
        if self.max > 0.0 {
            (self.current / self.max).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Time since construction, as of the last update.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Estimated time left, or `None` while no rate is known.
    pub fn remaining(&self) -> Option<Duration> {
        self.remaining
    }

    /// Units of work per second since construction.
    pub fn rate(&self) -> f64 {
        self.rate
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn is_overall(&self) -> bool {
        self.is_overall
    }

    pub fn always_show_text(&self) -> bool {
        self.always_show_text
    }

    pub fn is_first_update(&self) -> bool {
        self.lifecycle.is_first_update()
    }

    pub fn is_last_update(&self) -> bool {
        self.lifecycle.is_terminal()
    }

    pub fn is_retry(&self) -> bool {
        self.outcome.is_retry()
    }

    pub fn is_aborting(&self) -> bool {
        self.outcome.is_aborting()
    }

    pub(crate) fn increment(&mut self, by: f64, now: f64) {
        self.current += by;
        self.clamp_progress();
        self.update_stats(now);
    }

    pub(crate) fn set_how_much(&mut self, how_much: f64, now: f64) {
        self.current = how_much;
        self.clamp_progress();
        self.update_stats(now);
    }

    pub(crate) fn set_length(&mut self, length: f64, now: f64) {
        self.max = finite_or_zero(length).max(0.0);
        self.clamp_progress();
        self.update_stats(now);
    }

    pub(crate) fn set_retry(&mut self) {
        self.outcome = self.outcome.retry();
        self.lifecycle = self.lifecycle.rearm();
    }

    pub(crate) fn mark_aborting(&mut self) {
        self.outcome = self.outcome.abort();
    }

    /// Drop all counters; an aborted operation has nothing left to show.
    pub(crate) fn zero(&mut self) {
        self.current = 0.0;
        self.max = 0.0;
    }

    pub(crate) fn mark_terminal(&mut self) {
        self.lifecycle = self.lifecycle.terminate();
    }

    pub(crate) fn advance_lifecycle(&mut self) {
        self.lifecycle = self.lifecycle.advance();
    }

    /// Fold a child's update into this overall operation.
    ///
    /// Runs before observers see the update, so they read the new total.
    pub(crate) fn absorb_begin(&mut self, child: &Operation, now: f64) {
        if child.is_first_update() && child.is_retry() {
            // A retried child brings its whole length on top of the total.
            self.max += child.max;
        }
        self.current += child.progress();
        self.update_stats(now);
    }

    /// Finish folding a child's update once its lifecycle has advanced.
    ///
    /// Intermediate contributions are taken back out because the next
    /// update re-adds the child's new value. A terminal contribution stays.
    pub(crate) fn absorb_end(&mut self, child: &Operation) {
        if child.is_aborting() {
            // progress <= max, so this shrinks the total by the unfinished part.
            self.max += child.progress() - child.max;
        } else if !child.is_last_update() {
            self.current -= child.progress();
        }
    }

    fn clamp_progress(&mut self) {
        self.current = finite_or_zero(self.current).min(self.max).max(0.0);
    }

    fn update_stats(&mut self, now: f64) {
        let elapsed = (now - self.start_secs).abs();
        let progress = self.progress();

        self.rate = if elapsed > 0.0 { progress / elapsed } else { 0.0 };
        self.elapsed = Duration::try_from_secs_f64(elapsed).unwrap_or_default();
        self.remaining = if progress >= self.max {
            Some(Duration::ZERO)
        } else if self.rate > 0.0 {
            Duration::try_from_secs_f64((self.max - progress) / self.rate).ok()
        } else {
            None
        };
    }
}

/// Infinite and NaN amounts count as nothing.
fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
