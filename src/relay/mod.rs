//! Relay module for reporting progress from other threads and tasks.
//!
//! The registry runs every update synchronously under one lock, presenter
//! and observer included. Workers that should not wait on rendering (async
//! download tasks, loader threads) report through a relay instead: they
//! hold [`Ticket`]s that queue commands, and a [`RelayDriver`] on the
//! registry's owning context applies them in order.
//!
//! # Overview
//!
//! - `ticket` - [`RelaySender`] and [`Ticket`], the worker side
//! - `driver` - [`RelayDriver`], the owner side
//! - `command` - Queued messages
//!
//! # Examples
//!
//! ```rust
//! use progressmgr::{relay, RegistryBuilder, StaticText};
//!
//! # #[tokio::main]
//! # async fn main() -> progressmgr::Result<()> {
//! let registry = RegistryBuilder::new().build()?;
//! let (sender, driver) = relay::channel(&registry);
//! let pump = tokio::spawn(driver.run());
//!
//! let worker = tokio::spawn(async move {
//!     let ticket =
//!         sender.register_operation(64.0, "avatar.prp", StaticText::Updating, false, false)?;
//!     for _ in 0..4 {
//!         ticket.increment(16.0)?;
//!     }
//!     Ok::<_, progressmgr::Error>(())
//! });
//!
//! worker.await.expect("worker panicked")?;
//! pump.await.expect("driver panicked");
//! assert!(registry.is_empty());
//! # Ok(())
//! # }
//! ```

pub(crate) mod command;
pub mod driver;
pub mod ticket;

pub use command::TicketId;
pub use driver::RelayDriver;
pub use ticket::{RelaySender, Ticket};

use crate::registry::ProgressRegistry;
use tokio::sync::mpsc;

/// Create a relay feeding `registry`.
pub fn channel(registry: &ProgressRegistry) -> (RelaySender, RelayDriver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (
        RelaySender::new(tx),
        RelayDriver::new(rx, registry.clone()),
    )
}
