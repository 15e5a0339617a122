//! Worker side of the relay.

use super::command::{Change, Command, Registration, TicketId, TicketShared};
use crate::registry::StaticText;
use crate::{Error, Result};

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;

/// Registers operations on behalf of workers.
///
/// Cheap to clone and safe to move across threads and tasks.
#[derive(Debug, Clone)]
pub struct RelaySender {
    tx: UnboundedSender<Command>,
    next_ticket: Arc<AtomicU64>,
}

impl RelaySender {
    pub(crate) fn new(tx: UnboundedSender<Command>) -> Self {
        Self {
            tx,
            next_ticket: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Queue the registration of a normal operation.
    pub fn register_operation(
        &self,
        length: f64,
        title: impl Into<String>,
        text: StaticText,
        is_retry: bool,
        always_show_text: bool,
    ) -> Result<Ticket> {
        self.register(Registration {
            length,
            title: title.into(),
            text,
            is_retry,
            is_overall: false,
            always_show_text,
        })
    }

    /// Queue the registration of an overall operation.
    pub fn register_overall_operation(
        &self,
        length: f64,
        title: impl Into<String>,
        text: StaticText,
        always_show_text: bool,
    ) -> Result<Ticket> {
        self.register(Registration {
            length,
            title: title.into(),
            text,
            is_retry: false,
            is_overall: true,
            always_show_text,
        })
    }

    /// Queue a cancellation of every live operation.
    pub fn cancel_all(&self) -> Result<()> {
        send(&self.tx, Command::CancelAll)
    }

    /// Whether the driver is gone.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }

    fn register(&self, registration: Registration) -> Result<Ticket> {
        let id = TicketId(self.next_ticket.fetch_add(1, Ordering::Relaxed));
        let shared = Arc::new(TicketShared::default());

        send(
            &self.tx,
            Command::Register {
                ticket: id,
                shared: shared.clone(),
                registration,
            },
        )?;

        Ok(Ticket {
            id,
            tx: self.tx.clone(),
            shared,
        })
    }
}

/// A worker's claim on an operation registered through the relay.
///
/// Mirrors [`OperationHandle`](crate::OperationHandle): every call queues a
/// change, and dropping the ticket queues the final update.
#[derive(Debug)]
pub struct Ticket {
    id: TicketId,
    tx: UnboundedSender<Command>,
    shared: Arc<TicketShared>,
}

impl Ticket {
    pub fn id(&self) -> TicketId {
        self.id
    }

    pub fn increment(&self, by: f64) -> Result<()> {
        self.change(Change::Increment(by))
    }

    pub fn set_how_much(&self, how_much: f64) -> Result<()> {
        self.change(Change::SetHowMuch(how_much))
    }

    pub fn set_length(&self, length: f64) -> Result<()> {
        self.change(Change::SetLength(length))
    }

    pub fn set_retry(&self) -> Result<()> {
        self.change(Change::SetRetry)
    }

    pub fn set_aborting(&self) -> Result<()> {
        self.shared.set_aborting(true);
        self.change(Change::SetAborting)
    }

    /// Whether the operation was asked to abort, as of the last command the
    /// driver applied.
    pub fn is_aborting(&self) -> bool {
        self.shared.is_aborting()
    }

    /// Queue the final update.
    pub fn finish(self) {}

    fn change(&self, change: Change) -> Result<()> {
        send(
            &self.tx,
            Command::Update {
                ticket: self.id,
                change,
            },
        )
    }
}

impl Drop for Ticket {
    fn drop(&mut self) {
        // Nothing left to finish if the driver is gone.
        let _ = self.tx.send(Command::Finish { ticket: self.id });
    }
}

fn send(tx: &UnboundedSender<Command>, command: Command) -> Result<()> {
    tx.send(command)
        .map_err(|e| Error::RelayClosed(format!("{:?} was not delivered", e.0)))
}
