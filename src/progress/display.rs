//! Terminal rendering of the registry's live operations.
//!
//! This module provides the [`TerminalPresenter`], which shows the banner as
//! a spinner line and one bar per live operation using an indicatif
//! [`MultiProgress`]. Overall bars are refreshed on every child update, so
//! they move together with the operation that changed.
//!
//! # Examples
//!
//! ```rust
//! use progressmgr::progress::{StyleOptions, TerminalPresenter};
//! use progressmgr::{RegistryBuilder, StaticText};
//!
//! # fn main() -> progressmgr::Result<()> {
//! let presenter = TerminalPresenter::new(StyleOptions::hidden())?;
//! let registry = RegistryBuilder::new()
//!     .presenter(presenter.clone())
//!     .build()?;
//!
//! let op = registry.register_operation(1024.0, "terrain.prp", StaticText::Linking, false, true);
//! op.increment(512.0);
//! assert_eq!(presenter.live_bars(), 1);
//! # Ok(())
//! # }
//! ```

use super::presenter::ProgressPresenter;
use super::style::{ProgressBarOpts, StyleOptions};
use crate::operation::{Operation, OperationId};
use crate::registry::{ProgressUpdate, StaticText};
use crate::Result;

use console::style;
use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Presenter drawing the registry's operations on the terminal.
///
/// Clones share the same display, so a clone can be kept for inspection
/// after another one was handed to the registry.
#[derive(Clone)]
pub struct TerminalPresenter {
    /// The multi-progress instance coordinating every bar.
    multi: MultiProgress,
    overall: BarStyle,
    task: BarStyle,
    banner_style: ProgressStyle,
    state: Arc<Mutex<DisplayState>>,
}

/// Prepared style of one kind of bar; `None` hides it.
#[derive(Clone)]
struct BarStyle {
    style: Option<ProgressStyle>,
    clear: bool,
}

impl BarStyle {
    fn new(opts: &ProgressBarOpts) -> Result<Self> {
        let style = match opts.is_enabled() {
            true => Some(opts.to_progress_style()?),
            false => None,
        };
        Ok(Self {
            style,
            clear: opts.clears(),
        })
    }
}

#[derive(Default)]
struct DisplayState {
    banner: Option<ProgressBar>,
    bars: HashMap<OperationId, ProgressBar>,
}

impl TerminalPresenter {
    /// Create a presenter drawing to stderr, or nowhere if every bar is
    /// disabled.
    pub fn new(style_options: StyleOptions) -> Result<Self> {
        let target = match style_options.is_enabled() {
            true => ProgressDrawTarget::stderr(),
            false => ProgressDrawTarget::hidden(),
        };
        Self::with_draw_target(style_options, target)
    }

    /// Create a presenter drawing to `target`.
    pub fn with_draw_target(
        style_options: StyleOptions,
        target: ProgressDrawTarget,
    ) -> Result<Self> {
        Ok(Self {
            multi: MultiProgress::with_draw_target(target),
            overall: BarStyle::new(style_options.overall())?,
            task: BarStyle::new(style_options.task())?,
            banner_style: ProgressStyle::with_template(ProgressBarOpts::TEMPLATE_BANNER)?,
            state: Arc::new(Mutex::new(DisplayState::default())),
        })
    }

    /// Get the multi-progress instance, e.g. to print above the bars.
    pub fn multi(&self) -> MultiProgress {
        self.multi.clone()
    }

    /// The bar of a live operation.
    pub fn bar(&self, id: OperationId) -> Option<ProgressBar> {
        self.lock().bars.get(&id).cloned()
    }

    /// Number of bars currently shown.
    pub fn live_bars(&self) -> usize {
        self.lock().bars.len()
    }

    /// Message of the banner line, if the banner is up.
    pub fn banner(&self) -> Option<String> {
        self.lock().banner.as_ref().map(|b| b.message())
    }

    fn lock(&self) -> MutexGuard<'_, DisplayState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn create_bar(&self, op: &Operation) -> ProgressBar {
        let bar_style = match op.is_overall() {
            true => &self.overall,
            false => &self.task,
        };
        match bar_style.style {
            Some(ref style) => self
                .multi
                .add(ProgressBar::new(units(op.max())).with_style(style.clone())),
            // Hidden bars are not added to the MultiProgress.
            None => ProgressBar::hidden(),
        }
    }

    fn sync_bar(&self, state: &mut DisplayState, op: &Operation) {
        let bar = state
            .bars
            .entry(op.id())
            .or_insert_with(|| self.create_bar(op));

        bar.set_length(units(op.max()));
        bar.set_position(units(op.progress()));
        if op.is_aborting() {
            bar.set_message(format!("{} {}", op.title(), style("(aborting)").red()));
        } else if op.always_show_text() || op.is_overall() {
            bar.set_message(op.title().to_string());
        }
    }

    fn finish_bar(&self, state: &mut DisplayState, op: &Operation) {
        let Some(bar) = state.bars.remove(&op.id()) else {
            return;
        };
        let clear = match op.is_overall() {
            true => self.overall.clear,
            false => self.task.clear,
        };

        if op.is_aborting() {
            bar.abandon();
        } else if clear {
            bar.finish_and_clear();
        } else {
            bar.finish();
        }
    }
}

impl ProgressPresenter for TerminalPresenter {
    fn activate(&mut self, text: StaticText) {
        let banner = self
            .multi
            .insert(0, ProgressBar::new_spinner().with_style(self.banner_style.clone()));
        banner.set_message(style(text.label()).bold().cyan().to_string());
        banner.tick();

        if let Some(previous) = self.lock().banner.replace(banner) {
            previous.finish_and_clear();
        }
    }

    fn deactivate(&mut self) {
        let mut state = self.lock();
        if let Some(banner) = state.banner.take() {
            banner.finish_and_clear();
        }
        for (_, bar) in state.bars.drain() {
            bar.finish_and_clear();
        }
    }

    fn on_update(&mut self, update: &ProgressUpdate<'_>) {
        let op = update.operation();
        let mut state = self.lock();

        self.sync_bar(&mut state, op);
        for parent in update.overall() {
            self.sync_bar(&mut state, parent);
        }
        if op.is_last_update() {
            self.finish_bar(&mut state, op);
        }

        if let Some(ref banner) = state.banner {
            banner.tick();
        }
    }
}

/// Whole units shown by a bar.
fn units(value: f64) -> u64 {
    value.max(0.0).round() as u64
}
