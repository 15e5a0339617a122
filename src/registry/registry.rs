//! Core registry implementation with the notification pass.
//!
//! This module contains the [`ProgressRegistry`] that keeps the live set of
//! operations, gates the banner on the empty/non-empty transition, and runs
//! the two-pass notification on every update: overall operations absorb the
//! changed operation, presenter and observer see the result, and the
//! absorption is then finalized.
//!
//! # Examples
//!
//! ## Tracking an Overall Download
//!
//! ```rust
//! use progressmgr::{RegistryBuilder, StaticText};
//!
//! # fn main() -> progressmgr::Result<()> {
//! let registry = RegistryBuilder::new().build()?;
//! let overall = registry.register_overall_operation(300.0, "Age", StaticText::Linking, false);
//!
//! for size in [100.0, 200.0] {
//!     let file = registry.register_operation(size, "file", StaticText::Linking, false, false);
//!     file.set_how_much(size);
//!     // Dropping the handle reports the final update.
//! }
//!
//! assert_eq!(overall.snapshot().map(|op| op.progress()), Some(300.0));
//! # Ok(())
//! # }
//! ```

use super::config::{ObserverCallback, RegistryConfig, StaticText};
use super::handle::OperationHandle;
use super::update::ProgressUpdate;
use crate::operation::{Operation, OperationId};
use crate::progress::ProgressPresenter;
use crate::utils::Clock;

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, trace};

/// Registry of live operations.
///
/// Clones share the same registry. Every update runs to completion under
/// one lock, so presenters and observers must not call back into the
/// registry.
///
/// A registry is created via its builder:
///
/// ```rust
/// # fn main() -> progressmgr::Result<()> {
/// use progressmgr::RegistryBuilder;
///
/// let registry = RegistryBuilder::new().build()?;
/// assert!(registry.is_empty());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ProgressRegistry {
    shared: Arc<Shared>,
}

impl fmt::Debug for ProgressRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.shared.lock();
        f.debug_struct("ProgressRegistry")
            .field("operations", &state.operations.len())
            .field("static_text", &state.static_text)
            .field("observer", &state.observer.is_some())
            .finish()
    }
}

impl ProgressRegistry {
    pub(crate) fn new(config: RegistryConfig) -> Self {
        let RegistryConfig {
            frame_ids,
            static_text_ids,
            clock,
            observer,
            presenter,
        } = config;

        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(RegistryState {
                    operations: Vec::new(),
                    static_text: None,
                    observer,
                    presenter,
                    next_id: 0,
                }),
                clock,
                frame_ids,
                static_text_ids,
            }),
        }
    }

    /// Register a normal operation of `length` units.
    ///
    /// If the registry was empty, `text` becomes the active banner.
    pub fn register_operation(
        &self,
        length: f64,
        title: impl Into<String>,
        text: StaticText,
        is_retry: bool,
        always_show_text: bool,
    ) -> OperationHandle {
        self.register(Registration {
            length,
            title: title.into(),
            text,
            is_retry,
            is_overall: false,
            always_show_text,
        })
    }

    /// Register an overall operation, which absorbs the updates of every
    /// operation registered after it.
    pub fn register_overall_operation(
        &self,
        length: f64,
        title: impl Into<String>,
        text: StaticText,
        always_show_text: bool,
    ) -> OperationHandle {
        self.register(Registration {
            length,
            title: title.into(),
            text,
            is_retry: false,
            is_overall: true,
            always_show_text,
        })
    }

    pub(crate) fn register(&self, registration: Registration) -> OperationHandle {
        let id = self.shared.register(registration);
        OperationHandle::new(id, Arc::downgrade(&self.shared))
    }

    /// Install the observer, returning the previous one.
    pub fn set_callback(&self, observer: Option<ObserverCallback>) -> Option<ObserverCallback> {
        std::mem::replace(&mut self.shared.lock().observer, observer)
    }

    /// Ask every live operation to abort and drop the banner.
    ///
    /// Owners still have to notice the flag and release their handles.
    pub fn cancel_all_ops(&self) {
        let mut state = self.shared.lock();
        for op in state.operations.iter_mut() {
            op.mark_aborting();
        }
        state.static_text = None;
        debug!("Cancelling {} operation(s)", state.operations.len());
    }

    /// Loading animation frame name; out-of-range indices give frame 0.
    pub fn loading_frame_id(&self, index: usize) -> &str {
        let frames = &self.shared.frame_ids;
        frames.get(index).unwrap_or(&frames[0])
    }

    /// Banner asset name.
    pub fn static_text_id(&self, kind: StaticText) -> &str {
        &self.shared.static_text_ids[kind.index()]
    }

    /// Number of loading animation frames.
    pub fn loading_frame_count(&self) -> usize {
        self.shared.frame_ids.len()
    }

    /// Banner currently shown, if any.
    pub fn active_static_text(&self) -> Option<StaticText> {
        self.shared.lock().static_text
    }

    /// Number of live operations.
    pub fn len(&self) -> usize {
        self.shared.lock().operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shared.lock().operations.is_empty()
    }

    /// Snapshot of every live operation, most recently registered first.
    pub fn operations(&self) -> Vec<Operation> {
        self.shared.lock().operations.iter().rev().cloned().collect()
    }

    /// Snapshot of one live operation.
    pub fn operation(&self, id: OperationId) -> Option<Operation> {
        self.shared.read(id, Operation::clone)
    }

    /// Force-remove every live operation, newest first.
    ///
    /// Each one still reports its final update. Handles released later are
    /// ignored.
    pub fn shutdown(&self) {
        let now = self.shared.clock.now_secs();
        self.shared.lock().shutdown(now);
    }
}

/// Arguments of a registration.
#[derive(Debug, Clone)]
pub(crate) struct Registration {
    pub length: f64,
    pub title: String,
    pub text: StaticText,
    pub is_retry: bool,
    pub is_overall: bool,
    pub always_show_text: bool,
}

/// State shared between the registry and the handles it gave out.
pub(crate) struct Shared {
    state: Mutex<RegistryState>,
    clock: Arc<dyn Clock>,
    frame_ids: Vec<String>,
    static_text_ids: [String; 2],
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, RegistryState> {
        // The state is plain bookkeeping; a panicking observer leaves it usable.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn register(&self, registration: Registration) -> OperationId {
        let now = self.clock.now_secs();
        self.lock().register(registration, now)
    }

    /// Apply `f` to a live operation, then notify. Returns `false` if the
    /// operation is gone.
    pub(crate) fn update<F>(&self, id: OperationId, f: F) -> bool
    where
        F: FnOnce(&mut Operation, f64),
    {
        let now = self.clock.now_secs();
        let mut state = self.lock();
        let Some(index) = state.position(id) else {
            return false;
        };
        f(&mut state.operations[index], now);
        state.notify(index, now);
        true
    }

    /// Notify with the aborting flag set, then zero the counters.
    pub(crate) fn abort(&self, id: OperationId) -> bool {
        let now = self.clock.now_secs();
        let mut state = self.lock();
        let Some(index) = state.position(id) else {
            return false;
        };
        state.operations[index].mark_aborting();
        state.notify(index, now);
        state.operations[index].zero();
        true
    }

    /// Change an operation without notifying.
    pub(crate) fn modify<F>(&self, id: OperationId, f: F) -> bool
    where
        F: FnOnce(&mut Operation),
    {
        let mut state = self.lock();
        match state.position(id) {
            Some(index) => {
                f(&mut state.operations[index]);
                true
            }
            None => false,
        }
    }

    pub(crate) fn read<T, F>(&self, id: OperationId, f: F) -> Option<T>
    where
        F: FnOnce(&Operation) -> T,
    {
        let state = self.lock();
        state.position(id).map(|index| f(&state.operations[index]))
    }

    pub(crate) fn unregister(&self, id: OperationId) -> bool {
        let now = self.clock.now_secs();
        self.lock().unregister(id, now)
    }
}

impl Drop for Shared {
    fn drop(&mut self) {
        let now = self.clock.now_secs();
        self.state
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .shutdown(now);
    }
}

struct RegistryState {
    /// Live operations in registration order; the last one is the head.
    operations: Vec<Operation>,
    static_text: Option<StaticText>,
    observer: Option<ObserverCallback>,
    presenter: Box<dyn ProgressPresenter>,
    next_id: u64,
}

impl RegistryState {
    fn position(&self, id: OperationId) -> Option<usize> {
        self.operations.iter().position(|op| op.id() == id)
    }

    fn register(&mut self, registration: Registration, now: f64) -> OperationId {
        let Registration {
            length,
            title,
            text,
            is_retry,
            is_overall,
            always_show_text,
        } = registration;

        if self.operations.is_empty() {
            debug!("Activating progress with banner {}", text);
            self.static_text = Some(text);
            self.presenter.activate(text);
        }

        let id = OperationId(self.next_id);
        self.next_id += 1;

        let mut op = Operation::new(id, length, title, now, is_overall, always_show_text);
        if is_retry {
            op = op.with_retry();
        }
        debug!(
            "Registering {} {:?} (length {}, overall {})",
            id,
            op.title(),
            length,
            is_overall
        );

        self.operations.push(op);
        self.notify(self.operations.len() - 1, now);
        id
    }

    fn unregister(&mut self, id: OperationId, now: f64) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };

        self.operations[index].mark_terminal();
        if self.operations[index].is_overall() {
            // Children were absorbed one by one already; folding the
            // aggregate into older overall operations would count them twice.
            self.broadcast(index, false);
        } else {
            self.notify(index, now);
        }

        self.operations.remove(index);
        debug!("Unregistered {}", id);

        if self.operations.is_empty() {
            debug!("Deactivating progress");
            self.static_text = None;
            self.presenter.deactivate();
        }
        true
    }

    /// Full notification pass for the operation at `index`.
    fn notify(&mut self, index: usize, now: f64) {
        trace!("Notifying update of {}", self.operations[index].id());

        {
            let (older, rest) = self.operations.split_at_mut(index);
            let child = &rest[0];
            for parent in older.iter_mut().rev().filter(|op| op.is_overall()) {
                parent.absorb_begin(child, now);
            }
        }

        self.broadcast(index, true);

        let (older, rest) = self.operations.split_at_mut(index);
        let child = &rest[0];
        for parent in older.iter_mut().rev().filter(|op| op.is_overall()) {
            parent.absorb_end(child);
        }
    }

    /// Deliver the update to presenter and observer, then advance the
    /// operation's lifecycle.
    fn broadcast(&mut self, index: usize, absorbed: bool) {
        let update = ProgressUpdate::new(&self.operations, index, absorbed, self.static_text);
        self.presenter.on_update(&update);
        if let Some(ref observer) = self.observer {
            observer(&update);
        }
        self.operations[index].advance_lifecycle();
    }

    fn shutdown(&mut self, now: f64) {
        if !self.operations.is_empty() {
            debug!(
                "Shutting down with {} live operation(s)",
                self.operations.len()
            );
        }
        while let Some(id) = self.operations.last().map(Operation::id) {
            self.unregister(id, now);
        }
    }
}
