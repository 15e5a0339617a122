//! Progress bar styling and configuration options.
//!
//! This module provides the styling of the bars drawn by the
//! [`TerminalPresenter`](crate::progress::TerminalPresenter): one set of
//! options for overall operations and one for regular task operations.
//!
//! # Examples
//!
//! ## Default Styling
//!
//! ```rust
//! use progressmgr::progress::StyleOptions;
//!
//! // Overall bars stay on the screen, task bars clear on completion.
//! let style_options = StyleOptions::default();
//! assert!(style_options.is_enabled());
//! ```
//!
//! ## Custom Styling
//!
//! ```rust
//! use progressmgr::progress::{StyleOptions, ProgressBarOpts};
//!
//! let custom_style = StyleOptions::new(
//!     ProgressBarOpts::new(
//!         Some("{msg} [{bar:40.cyan/blue}] {pos}/{len}".to_string()),
//!         Some(ProgressBarOpts::CHARS_FINE.to_string()),
//!         true,
//!         false
//!     ),
//!     ProgressBarOpts::with_pip_style(),
//! );
//! ```
//!
//! ## Hidden Progress Bars
//!
//! ```rust
//! use progressmgr::progress::StyleOptions;
//!
//! let hidden_style = StyleOptions::hidden();
//! assert!(!hidden_style.is_enabled());
//! ```

use crate::Result;
use indicatif::ProgressStyle;

/// Define the presenter style options.
///
/// By default, overall bars stay on the screen upon completion, but task
/// bars are cleared once complete.
#[derive(Debug, Clone)]
pub struct StyleOptions {
    /// Style options for overall operation bars.
    pub(crate) overall: ProgressBarOpts,
    /// Style options for task operation bars.
    pub(crate) task: ProgressBarOpts,
}

impl Default for StyleOptions {
    fn default() -> Self {
        Self {
            overall: ProgressBarOpts {
                template: Some(ProgressBarOpts::TEMPLATE_OVERALL.into()),
                progress_chars: Some(ProgressBarOpts::CHARS_FINE.into()),
                enabled: true,
                clear: false,
            },
            task: ProgressBarOpts::with_pip_style(),
        }
    }
}

impl StyleOptions {
    /// Create new [`StyleOptions`].
    pub fn new(overall: ProgressBarOpts, task: ProgressBarOpts) -> Self {
        Self { overall, task }
    }

    /// Options hiding every bar.
    pub fn hidden() -> Self {
        Self::new(ProgressBarOpts::hidden(), ProgressBarOpts::hidden())
    }

    /// Set the options for overall operation bars.
    pub fn set_overall(&mut self, overall: ProgressBarOpts) {
        self.overall = overall;
    }

    /// Set the options for task operation bars.
    pub fn set_task(&mut self, task: ProgressBarOpts) {
        self.task = task;
    }

    /// Return `false` if neither the overall nor the task bar is enabled.
    pub fn is_enabled(&self) -> bool {
        self.overall.enabled || self.task.enabled
    }

    pub fn overall(&self) -> &ProgressBarOpts {
        &self.overall
    }

    pub fn task(&self) -> &ProgressBarOpts {
        &self.task
    }
}

/// Define the options for a progress bar.
#[derive(Debug, Clone)]
pub struct ProgressBarOpts {
    /// Progress bar template string.
    template: Option<String>,
    /// Progression characters set.
    ///
    /// There must be at least 3 characters for the following states:
    /// "filled", "current", and "to do".
    progress_chars: Option<String>,
    /// Enable or disable the progress bar.
    pub(crate) enabled: bool,
    /// Clear the progress bar once completed.
    pub(crate) clear: bool,
}

impl Default for ProgressBarOpts {
    fn default() -> Self {
        Self {
            template: None,
            progress_chars: None,
            enabled: true,
            clear: true,
        }
    }
}

impl ProgressBarOpts {
    /// Template for overall operations: title, bar, percentage and eta.
    ///
    /// `Linking city       ██████████████████▌                      45% eta 12s`
    pub const TEMPLATE_OVERALL: &'static str =
        "{msg:<18.bold} {bar:40.blue} {percent:>3}% eta {eta:.blue}";
    /// Template which looks like the Python package installer pip.
    ///
    /// `━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━ 211.23 KiB/211.23 KiB 1008.31 KiB/s eta 0s`
    pub const TEMPLATE_PIP: &'static str =
        "{bar:40.green/black} {bytes:>11.green}/{total_bytes:<11.green} {bytes_per_sec:>13.red} eta {eta:.blue} {msg}";
    /// Template of the banner line.
    pub const TEMPLATE_BANNER: &'static str = "{spinner:.cyan} {msg}";
    /// Use fine blocks as progress characters: `"█▉▊▋▌▍▎▏  "`.
    pub const CHARS_FINE: &'static str = "█▉▊▋▌▍▎▏  ";
    /// Use a line as progress characters: `"━╾─"`.
    pub const CHARS_LINE: &'static str = "━╾╴─";

    /// Create a new [`ProgressBarOpts`].
    pub fn new(
        template: Option<String>,
        progress_chars: Option<String>,
        enabled: bool,
        clear: bool,
    ) -> Self {
        Self {
            template,
            progress_chars,
            enabled,
            clear,
        }
    }

    /// Create a [`ProgressStyle`] based on the provided options.
    pub fn to_progress_style(&self) -> Result<ProgressStyle> {
        let mut style = ProgressStyle::default_bar();
        if let Some(ref template) = self.template {
            style = style.template(template)?;
        }
        if let Some(ref progress_chars) = self.progress_chars {
            style = style.progress_chars(progress_chars);
        }
        Ok(style)
    }

    /// Create a new [`ProgressBarOpts`] which looks like Python pip.
    pub fn with_pip_style() -> Self {
        Self {
            template: Some(ProgressBarOpts::TEMPLATE_PIP.into()),
            progress_chars: Some(ProgressBarOpts::CHARS_LINE.into()),
            enabled: true,
            clear: true,
        }
    }

    /// Set to `true` to clear the progress bar upon completion.
    pub fn set_clear(&mut self, clear: bool) {
        self.clear = clear;
    }

    /// Create a new [`ProgressBarOpts`] which hides the progress bars.
    pub fn hidden() -> Self {
        Self {
            enabled: false,
            ..ProgressBarOpts::default()
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn clears(&self) -> bool {
        self.clear
    }
}
