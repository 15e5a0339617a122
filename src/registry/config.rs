//! Configuration structures and defaults for the registry.
//!
//! This module provides the configuration used by [`ProgressRegistry`] and
//! [`RegistryBuilder`]: the observer callback type, the banner kinds, the
//! asset name tables handed to the UI, and the clock.
//!
//! # Examples
//!
//! ## Using Callbacks
//!
//! ```rust
//! use progressmgr::registry::ObserverCallback;
//! use progressmgr::ProgressUpdate;
//! use std::sync::Arc;
//!
//! let callback: ObserverCallback = Arc::new(|update: &ProgressUpdate<'_>| {
//!     let op = update.operation();
//!     println!("{}: {:.0}%", op.title(), op.fraction() * 100.0);
//! });
//! ```
//!
//! [`ProgressRegistry`]: crate::ProgressRegistry
//! [`RegistryBuilder`]: crate::RegistryBuilder

use super::update::ProgressUpdate;
use crate::progress::{NullPresenter, ProgressPresenter};
use crate::utils::{Clock, MonotonicClock};

use std::fmt;
use std::sync::Arc;

/// Callback type for operation update events.
pub type ObserverCallback = Arc<dyn Fn(&ProgressUpdate<'_>) + Send + Sync>;

/// Name prefix of the default loading animation frames.
pub const LOADING_FRAME_PREFIX: &str = "xLoading_Linking";
/// File extension of the default loading animation frames.
pub const LOADING_FRAME_EXTENSION: &str = "png";
/// Number of frames in the default loading animation.
pub const LOADING_FRAME_COUNT: usize = 18;

/// Banner shown while at least one operation is live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StaticText {
    /// Moving between ages; assets are being linked in.
    Linking,
    /// Content is being downloaded or patched.
    Updating,
}

impl StaticText {
    /// Every banner kind, in table order.
    pub const ALL: [StaticText; 2] = [StaticText::Linking, StaticText::Updating];

    /// Human readable label.
    pub fn label(self) -> &'static str {
        match self {
            StaticText::Linking => "Linking",
            StaticText::Updating => "Updating",
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            StaticText::Linking => 0,
            StaticText::Updating => 1,
        }
    }
}

impl fmt::Display for StaticText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Build the names of a numbered frame sequence, e.g. `prefix.07.png`.
pub fn loading_frame_ids(prefix: &str, extension: &str, count: usize) -> Vec<String> {
    (0..count)
        .map(|i| format!("{prefix}.{i:02}.{extension}"))
        .collect()
}

/// Configuration structure for the registry.
pub struct RegistryConfig {
    /// Loading animation frame asset names.
    pub frame_ids: Vec<String>,
    /// Banner asset names, indexed by [`StaticText`].
    pub static_text_ids: [String; 2],
    /// Time source for operation statistics.
    pub clock: Arc<dyn Clock>,
    /// Callback for every operation update.
    pub observer: Option<ObserverCallback>,
    /// Built-in rendering hook, called before the observer.
    pub presenter: Box<dyn ProgressPresenter>,
}

impl fmt::Debug for RegistryConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryConfig")
            .field("frame_ids", &self.frame_ids)
            .field("static_text_ids", &self.static_text_ids)
            .field("clock", &self.clock)
            .field("observer", &self.observer.is_some())
            .finish_non_exhaustive()
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            frame_ids: loading_frame_ids(
                LOADING_FRAME_PREFIX,
                LOADING_FRAME_EXTENSION,
                LOADING_FRAME_COUNT,
            ),
            static_text_ids: [
                "xLoading_Linking_Text.png".to_string(),
                "xLoading_Updating_Text.png".to_string(),
            ],
            clock: Arc::new(MonotonicClock::new()),
            observer: None,
            presenter: Box::new(NullPresenter),
        }
    }
}
