//! Owner side of the relay: applies queued commands to the registry.

use super::command::{Change, Command, TicketId, TicketShared};
use crate::registry::{OperationHandle, ProgressRegistry};

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, warn};

/// Applies relay commands, in the order they were sent, on the context
/// owning the registry.
#[derive(Debug)]
pub struct RelayDriver {
    rx: UnboundedReceiver<Command>,
    registry: ProgressRegistry,
    live: HashMap<TicketId, LiveTicket>,
}

#[derive(Debug)]
struct LiveTicket {
    handle: OperationHandle,
    shared: Arc<TicketShared>,
}

impl LiveTicket {
    fn sync(&self) {
        self.shared.set_aborting(self.handle.is_aborting());
    }
}

impl RelayDriver {
    pub(crate) fn new(rx: UnboundedReceiver<Command>, registry: ProgressRegistry) -> Self {
        Self {
            rx,
            registry,
            live: HashMap::new(),
        }
    }

    /// Apply commands until every sender and ticket is gone.
    ///
    /// Operations still live at that point are finished when the driver
    /// is dropped.
    pub async fn run(mut self) {
        while let Some(command) = self.rx.recv().await {
            self.apply(command);
            self.sync_all();
        }
        debug!("Relay closed with {} live ticket(s)", self.live.len());
    }

    /// Apply every command queued so far without waiting, then refresh
    /// every ticket's abort flag.
    ///
    /// Returns the number of commands applied.
    pub fn drain(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(command) = self.rx.try_recv() {
            self.apply(command);
            applied += 1;
        }
        self.sync_all();
        applied
    }

    /// Number of tickets with a live operation.
    pub fn live(&self) -> usize {
        self.live.len()
    }

    pub fn registry(&self) -> &ProgressRegistry {
        &self.registry
    }

    fn apply(&mut self, command: Command) {
        match command {
            Command::Register {
                ticket,
                shared,
                registration,
            } => {
                let handle = self.registry.register(registration);
                self.live.insert(ticket, LiveTicket { handle, shared });
            }
            Command::Update { ticket, change } => {
                let Some(entry) = self.live.get(&ticket) else {
                    warn!("Ignoring {:?} for unknown {}", change, ticket);
                    return;
                };
                match change {
                    Change::Increment(by) => entry.handle.increment(by),
                    Change::SetHowMuch(how_much) => entry.handle.set_how_much(how_much),
                    Change::SetLength(length) => entry.handle.set_length(length),
                    Change::SetRetry => entry.handle.set_retry(),
                    Change::SetAborting => entry.handle.set_aborting(),
                }
            }
            Command::Finish { ticket } => {
                // Dropping the handle reports the final update.
                if self.live.remove(&ticket).is_none() {
                    warn!("Ignoring finish of unknown {}", ticket);
                }
            }
            Command::CancelAll => self.registry.cancel_all_ops(),
        }
    }

    /// Mirror each operation's abort state to its ticket, including aborts
    /// requested on the registry directly.
    fn sync_all(&self) {
        for entry in self.live.values() {
            entry.sync();
        }
    }
}
