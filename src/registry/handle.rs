//! Worker-side handle to a registered operation.

use super::registry::Shared;
use crate::operation::{Operation, OperationId};

use std::sync::Weak;
use tracing::warn;

/// Exclusive handle to a live operation.
///
/// Every mutation notifies the registry synchronously. Dropping the handle
/// (or calling [`finish`](OperationHandle::finish)) sends the operation's
/// final update and removes it from the registry.
///
/// If the registry has shut down in the meantime, mutations are ignored.
#[derive(Debug)]
pub struct OperationHandle {
    id: OperationId,
    shared: Weak<Shared>,
}

impl OperationHandle {
    pub(crate) fn new(id: OperationId, shared: Weak<Shared>) -> Self {
        Self { id, shared }
    }

    pub fn id(&self) -> OperationId {
        self.id
    }

    /// Add `by` units of progress, clamped to the length.
    pub fn increment(&self, by: f64) {
        self.update(|op, now| op.increment(by, now));
    }

    /// Set the progress, clamped to the length.
    pub fn set_how_much(&self, how_much: f64) {
        self.update(|op, now| op.set_how_much(how_much, now));
    }

    /// Revise the length, clamping the progress if needed.
    pub fn set_length(&self, length: f64) {
        self.update(|op, now| op.set_length(length, now));
    }

    /// Treat the next update as a fresh retry of this operation.
    ///
    /// Overall operations grow their total by this operation's length on
    /// that update.
    pub fn set_retry(&self) {
        let found = self
            .shared
            .upgrade()
            .is_some_and(|shared| shared.modify(self.id, Operation::set_retry));
        if !found {
            self.warn_gone("set_retry");
        }
    }

    /// Abandon the work.
    ///
    /// Observers see the aborting state first, then the counters are zeroed.
    pub fn set_aborting(&self) {
        let found = self
            .shared
            .upgrade()
            .is_some_and(|shared| shared.abort(self.id));
        if !found {
            self.warn_gone("set_aborting");
        }
    }

    /// Whether the operation was asked to abort, directly or by
    /// [`cancel_all_ops`](crate::ProgressRegistry::cancel_all_ops).
    pub fn is_aborting(&self) -> bool {
        self.read(Operation::is_aborting).unwrap_or(false)
    }

    pub fn progress(&self) -> f64 {
        self.read(Operation::progress).unwrap_or(0.0)
    }

    /// Copy of the operation's current state, or `None` once the registry
    /// has dropped it.
    pub fn snapshot(&self) -> Option<Operation> {
        self.read(Operation::clone)
    }

    /// Report the final update and unregister.
    pub fn finish(self) {}

    fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut Operation, f64),
    {
        let found = self
            .shared
            .upgrade()
            .is_some_and(|shared| shared.update(self.id, f));
        if !found {
            self.warn_gone("update");
        }
    }

    fn read<T, F>(&self, f: F) -> Option<T>
    where
        F: FnOnce(&Operation) -> T,
    {
        self.shared.upgrade()?.read(self.id, f)
    }

    fn warn_gone(&self, action: &str) {
        warn!("Ignoring {} on {}: no longer registered", action, self.id);
    }
}

impl Drop for OperationHandle {
    fn drop(&mut self) {
        if let Some(shared) = self.shared.upgrade() {
            shared.unregister(self.id);
        }
    }
}
