//! Progress module containing the rendering side of the registry.
//!
//! This module provides the [`ProgressPresenter`] hook the registry drives
//! on activation, deactivation and every update, plus a terminal
//! implementation built on indicatif.
//!
//! # Overview
//!
//! - `presenter` - The [`ProgressPresenter`] trait and a no-op [`NullPresenter`]
//! - `style` - Progress bar styling options and templates
//! - `display` - [`TerminalPresenter`], one bar per live operation
//!
//! # Examples
//!
//! ## Custom Presenter
//!
//! ```rust
//! use progressmgr::progress::ProgressPresenter;
//! use progressmgr::{ProgressUpdate, RegistryBuilder, StaticText};
//!
//! struct Log;
//!
//! impl ProgressPresenter for Log {
//!     fn activate(&mut self, text: StaticText) {
//!         println!("== {} ==", text);
//!     }
//!
//!     fn on_update(&mut self, update: &ProgressUpdate<'_>) {
//!         let op = update.operation();
//!         println!("{}: {}/{}", op.title(), op.progress(), op.max());
//!     }
//! }
//!
//! # fn main() -> progressmgr::Result<()> {
//! let registry = RegistryBuilder::new().presenter(Log).build()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Terminal Bars
//!
//! ```rust,no_run
//! use progressmgr::progress::{StyleOptions, TerminalPresenter};
//! use progressmgr::RegistryBuilder;
//!
//! # fn main() -> progressmgr::Result<()> {
//! let registry = RegistryBuilder::new()
//!     .presenter(TerminalPresenter::new(StyleOptions::default())?)
//!     .build()?;
//! # Ok(())
//! # }
//! ```

pub(crate) mod display;
pub(crate) mod presenter;
pub(crate) mod style;

pub use display::TerminalPresenter;
pub use presenter::{NullPresenter, ProgressPresenter};
pub use style::{ProgressBarOpts, StyleOptions};
