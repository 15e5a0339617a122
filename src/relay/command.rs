//! Messages carried from tickets to the driver.

pub(crate) use crate::registry::registry::Registration;

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Identifier of a ticket, unique per relay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TicketId(pub(crate) u64);

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ticket#{}", self.0)
    }
}

/// State the driver mirrors back to a ticket.
#[derive(Debug, Default)]
pub(crate) struct TicketShared {
    aborting: AtomicBool,
}

impl TicketShared {
    pub(crate) fn is_aborting(&self) -> bool {
        self.aborting.load(Ordering::Acquire)
    }

    pub(crate) fn set_aborting(&self, aborting: bool) {
        self.aborting.store(aborting, Ordering::Release);
    }
}

/// A mutation of a registered operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Change {
    Increment(f64),
    SetHowMuch(f64),
    SetLength(f64),
    SetRetry,
    SetAborting,
}

#[derive(Debug)]
pub(crate) enum Command {
    Register {
        ticket: TicketId,
        shared: Arc<TicketShared>,
        registration: Registration,
    },
    Update {
        ticket: TicketId,
        change: Change,
    },
    Finish {
        ticket: TicketId,
    },
    CancelAll,
}
