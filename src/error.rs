//! Error handling for the progressmgr library.
//!
//! Tracking progress never fails: aborting is advisory state on an
//! operation, not an error. The variants below cover the edges that can:
//! building a registry, building terminal progress styles, and talking to
//! a relay whose driver is gone.

use thiserror::Error;

/// Errors that can happen when using progressmgr.
#[derive(Error, Debug)]
pub enum Error {
    /// The loading frame table must hold at least one entry.
    ///
    /// Out-of-range frame lookups fall back to the first frame, so an empty
    /// table has nothing to fall back to.
    #[error("Loading frame table is empty")]
    EmptyFrameTable,

    /// Error from an invalid progress bar template.
    ///
    /// This variant wraps the template parse error reported by indicatif
    /// when a [`ProgressBarOpts`](crate::ProgressBarOpts) template is malformed.
    #[error("Invalid progress bar template")]
    Template {
        #[from]
        source: indicatif::style::TemplateError,
    },

    /// The relay driver was dropped, so the command cannot be delivered.
    #[error("Relay closed: {0}")]
    RelayClosed(String),
}

/// Result type alias for operations that can fail with a progressmgr error.
pub type Result<T> = std::result::Result<T, Error>;
