//! Operation module containing per-task progress state.
//!
//! This module provides the [`Operation`] struct holding the counters,
//! statistics and state of one tracked unit of work, together with the
//! small state machine describing its lifecycle and outcome.
//!
//! # Overview
//!
//! - [`operation`] - Counters, rate/time statistics and overall aggregation
//! - [`state`] - [`Lifecycle`] and [`Outcome`] enums
//!
//! # Examples
//!
//! ```rust
//! use progressmgr::{RegistryBuilder, StaticText};
//!
//! # fn main() -> progressmgr::Result<()> {
//! let registry = RegistryBuilder::new().build()?;
//! let op = registry.register_operation(100.0, "textures.pak", StaticText::Updating, false, false);
//! op.increment(25.0);
//!
//! let snapshot = op.snapshot().expect("operation is live");
//! assert_eq!(snapshot.progress(), 25.0);
//! assert_eq!(snapshot.fraction(), 0.25);
//! # Ok(())
//! # }
//! ```

pub mod operation;
pub mod state;

pub use operation::{Operation, OperationId};
pub use state::{Lifecycle, Outcome};
