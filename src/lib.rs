//! progressmgr tracks the progress of concurrent long-running operations
//! (asset downloads, linking and loading phases) and aggregates them into
//! "overall" operations whose progress is the live sum of their children.
//!
//! It only tracks what workers report; it never runs the work itself.
//!
//! # Quick Start
//!
//! ```rust
//! use progressmgr::{RegistryBuilder, StaticText};
//!
//! # fn main() -> progressmgr::Result<()> {
//! let registry = RegistryBuilder::new()
//!     .on_update(|update| {
//!         let op = update.operation();
//!         println!("{:<12} {:>5.1}%", op.title(), op.fraction() * 100.0);
//!     })
//!     .build()?;
//!
//! let overall = registry.register_overall_operation(150.0, "Linking", StaticText::Linking, true);
//! let file = registry.register_operation(150.0, "city.prp", StaticText::Linking, false, false);
//! file.increment(100.0);
//! file.increment(50.0);
//! drop(file);
//!
//! assert_eq!(overall.progress(), 150.0);
//! assert_eq!(registry.active_static_text(), Some(StaticText::Linking));
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`registry`] - The `ProgressRegistry`, its builder, handles and configuration
//! - [`operation`] - Per-operation progress state and aggregation math
//! - [`progress`] - Presenter hook and indicatif terminal rendering
//! - [`relay`] - Cross-thread hand-off of progress reports
//! - [`error`] - Centralized error handling with the `Error` enum
//! - [`utils`] - Shared utilities such as clocks

pub mod error;
pub mod operation;
pub mod progress;
pub mod registry;
pub mod relay;
pub mod utils;

pub use error::{Error, Result};
pub use operation::{Lifecycle, Operation, OperationId, Outcome};
pub use progress::{
    NullPresenter, ProgressBarOpts, ProgressPresenter, StyleOptions, TerminalPresenter,
};
pub use registry::{
    ObserverCallback, OperationHandle, ProgressRegistry, ProgressUpdate, RegistryBuilder,
    StaticText,
};
pub use relay::{RelayDriver, RelaySender, Ticket};
pub use utils::{Clock, ManualClock, MonotonicClock};
