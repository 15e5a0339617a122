//! Rendering hook driven by the registry.
//!
//! A presenter is the registry's built-in consumer: it is told when the
//! first operation appears (with the banner to show), when the last one
//! goes away, and about every update before the observer callback runs.

use crate::registry::{ProgressUpdate, StaticText};

/// Receives registry activity to render it.
///
/// Methods run while the registry is locked; they must not call back into
/// the registry.
pub trait ProgressPresenter: Send {
    /// The registry went from empty to one operation.
    fn activate(&mut self, text: StaticText) {
        let _ = text;
    }

    /// The registry became empty.
    fn deactivate(&mut self) {}

    /// An operation changed.
    fn on_update(&mut self, update: &ProgressUpdate<'_>);
}

/// Presenter that renders nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullPresenter;

impl ProgressPresenter for NullPresenter {
    fn on_update(&mut self, _update: &ProgressUpdate<'_>) {}
}
