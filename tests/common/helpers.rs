#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use progressmgr::progress::{ProgressBarOpts, ProgressPresenter, StyleOptions};
use progressmgr::{
    Lifecycle, ManualClock, OperationId, Outcome, ProgressRegistry, ProgressUpdate,
    RegistryBuilder, StaticText,
};

// Common test constants
pub const TEST_FRAME_COUNT: usize = 18;
pub const TEST_LENGTH: f64 = 100.0;

/// What an observer saw for one update.
#[derive(Debug, Clone, PartialEq)]
pub struct Seen {
    pub id: OperationId,
    pub title: String,
    pub progress: f64,
    pub max: f64,
    pub lifecycle: Lifecycle,
    pub outcome: Outcome,
    /// Absorbing overall operations as (id, progress, max), nearest first.
    pub overall: Vec<(OperationId, f64, f64)>,
    pub static_text: Option<StaticText>,
}

impl Seen {
    fn from_update(update: &ProgressUpdate<'_>) -> Self {
        let op = update.operation();
        Self {
            id: op.id(),
            title: op.title().to_string(),
            progress: op.progress(),
            max: op.max(),
            lifecycle: op.lifecycle(),
            outcome: op.outcome(),
            overall: update
                .overall()
                .map(|parent| (parent.id(), parent.progress(), parent.max()))
                .collect(),
            static_text: update.static_text(),
        }
    }
}

pub type SeenLog = Arc<Mutex<Vec<Seen>>>;

/// Presenter activity, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum PresenterEvent {
    Activate(StaticText),
    Deactivate,
    Update(OperationId),
}

/// Presenter recording what it is told.
#[derive(Debug, Clone, Default)]
pub struct RecordingPresenter {
    pub events: Arc<Mutex<Vec<PresenterEvent>>>,
}

impl RecordingPresenter {
    pub fn events(&self) -> Vec<PresenterEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn count(&self, wanted: fn(&PresenterEvent) -> bool) -> usize {
        self.events().iter().filter(|e| wanted(e)).count()
    }
}

impl ProgressPresenter for RecordingPresenter {
    fn activate(&mut self, text: StaticText) {
        self.events.lock().unwrap().push(PresenterEvent::Activate(text));
    }

    fn deactivate(&mut self) {
        self.events.lock().unwrap().push(PresenterEvent::Deactivate);
    }

    fn on_update(&mut self, update: &ProgressUpdate<'_>) {
        self.events
            .lock()
            .unwrap()
            .push(PresenterEvent::Update(update.operation().id()));
    }
}

// === Registry Helpers ===

/// Creates a registry with default options
pub fn create_test_registry() -> ProgressRegistry {
    RegistryBuilder::new()
        .build()
        .expect("Failed to build registry")
}

/// Creates a registry driven by a manual clock
pub fn create_clocked_registry() -> (ProgressRegistry, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new());
    let registry = RegistryBuilder::new()
        .clock(clock.clone())
        .build()
        .expect("Failed to build registry");
    (registry, clock)
}

/// Creates a registry whose observer records every update
pub fn create_recording_registry() -> (ProgressRegistry, SeenLog) {
    let log: SeenLog = Arc::default();
    let sink = log.clone();
    let registry = RegistryBuilder::new()
        .on_update(move |update| sink.lock().unwrap().push(Seen::from_update(update)))
        .build()
        .expect("Failed to build registry");
    (registry, log)
}

/// Creates a registry with a recording presenter
pub fn create_presented_registry() -> (ProgressRegistry, RecordingPresenter) {
    let presenter = RecordingPresenter::default();
    let registry = RegistryBuilder::new()
        .presenter(presenter.clone())
        .build()
        .expect("Failed to build registry");
    (registry, presenter)
}

/// Copy of everything seen so far
pub fn seen(log: &SeenLog) -> Vec<Seen> {
    log.lock().unwrap().clone()
}

/// Last update seen for `id`
pub fn last_seen(log: &SeenLog, id: OperationId) -> Seen {
    seen(log)
        .into_iter()
        .rev()
        .find(|s| s.id == id)
        .expect("No update seen for operation")
}

// === Progress Bar Helpers ===

/// Creates default test progress bar options
pub fn create_test_progress_opts() -> ProgressBarOpts {
    ProgressBarOpts::new(None, None, true, false)
}

/// Creates hidden progress bar options for testing
pub fn create_hidden_progress_opts() -> ProgressBarOpts {
    ProgressBarOpts::hidden()
}

/// Creates pip-style progress bar options for testing
pub fn create_pip_style_progress_opts() -> ProgressBarOpts {
    ProgressBarOpts::with_pip_style()
}

/// Creates custom progress bar options with template and chars
pub fn create_custom_progress_opts(template: &str, chars: &str) -> ProgressBarOpts {
    ProgressBarOpts::new(
        Some(template.to_string()),
        Some(chars.to_string()),
        true,
        false
    )
}

/// Creates default test style options
pub fn create_test_style_options() -> StyleOptions {
    StyleOptions::new(create_test_progress_opts(), create_pip_style_progress_opts())
}

/// Creates disabled style options for testing
pub fn create_disabled_style_options() -> StyleOptions {
    StyleOptions::new(create_hidden_progress_opts(), create_hidden_progress_opts())
}

// === Assertion Helpers ===

/// Asserts that progress bar options are enabled with a valid style
pub fn assert_progress_opts_enabled(opts: &ProgressBarOpts) {
    assert!(opts.is_enabled(), "Progress bar should be enabled");
    assert!(opts.to_progress_style().is_ok(), "Template should be valid");
}

/// Asserts that progress bar options are disabled
pub fn assert_progress_opts_disabled(opts: &ProgressBarOpts) {
    assert!(!opts.is_enabled(), "Progress bar should be disabled");
}

/// Asserts that an operation's counters respect 0 <= current <= max
pub fn assert_progress_in_bounds(registry: &ProgressRegistry, id: OperationId) {
    let op = registry.operation(id).expect("Operation should be live");
    assert!(
        op.progress() >= 0.0 && op.progress() <= op.max(),
        "Progress {} out of bounds for max {}",
        op.progress(),
        op.max()
    );
}
