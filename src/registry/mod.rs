//! Registry module containing the live set of operations, its builder and
//! configuration.
//!
//! This module provides the [`ProgressRegistry`] and its builder. The
//! registry hands out [`OperationHandle`]s, runs the notification pass on
//! every update, and exposes the banner and loading frame asset tables.
//!
//! # Overview
//!
//! - `registry` - Core ProgressRegistry with registration and notification
//! - `handle` - OperationHandle, the worker-side owner of an operation
//! - `builder` - RegistryBuilder for configuration
//! - `config` - Configuration structures, banner kinds and callback types
//! - `update` - ProgressUpdate, the view delivered to presenters and observers
//!
//! # Examples
//!
//! ## Retried Download
//!
//! ```rust
//! use progressmgr::{RegistryBuilder, StaticText};
//!
//! # fn main() -> progressmgr::Result<()> {
//! let registry = RegistryBuilder::new().build()?;
//! let overall = registry.register_overall_operation(100.0, "Update", StaticText::Updating, true);
//!
//! let retry = registry.register_operation(50.0, "patch.zip", StaticText::Updating, true, false);
//! retry.set_how_much(50.0);
//! retry.finish();
//!
//! let total = overall.snapshot().expect("overall is live");
//! assert_eq!(total.max(), 150.0);
//! assert_eq!(total.progress(), 50.0);
//! # Ok(())
//! # }
//! ```
//!
//! ## Cancelling Everything
//!
//! ```rust
//! use progressmgr::{RegistryBuilder, StaticText};
//!
//! # fn main() -> progressmgr::Result<()> {
//! let registry = RegistryBuilder::new().build()?;
//! let op = registry.register_operation(10.0, "sound.ogg", StaticText::Linking, false, false);
//!
//! registry.cancel_all_ops();
//! assert!(op.is_aborting());
//! assert_eq!(registry.active_static_text(), None);
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod config;
pub mod handle;
pub mod registry;
pub mod update;

pub use builder::RegistryBuilder;
pub use config::{ObserverCallback, RegistryConfig, StaticText};
pub use handle::OperationHandle;
pub use registry::ProgressRegistry;
pub use update::ProgressUpdate;
