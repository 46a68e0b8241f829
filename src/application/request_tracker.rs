use crate::domain::errors::ApplicationError;
use std::cell::Cell;
use std::rc::Rc;

/// Generation counter deciding which in-flight load may publish its result.
///
/// Every load takes a ticket; only the ticket of the most recent load is
/// current, so a slow earlier load can never overwrite a newer one.
#[derive(Debug, Clone, Default)]
pub struct RequestTracker {
    generation: Rc<Cell<u64>>,
}

/// Proof of which generation a load belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket(u64);

impl RequestTicket {
    pub fn id(&self) -> u64 {
        self.0
    }
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new generation, superseding every ticket issued before.
    pub fn begin(&self) -> RequestTicket {
        let next = self.generation.get() + 1;
        self.generation.set(next);
        RequestTicket(next)
    }

    pub fn current(&self) -> u64 {
        self.generation.get()
    }

    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        ticket.0 == self.generation.get()
    }

    pub fn check(&self, ticket: RequestTicket) -> Result<(), ApplicationError> {
        if self.is_current(ticket) {
            Ok(())
        } else {
            Err(ApplicationError::StaleRequest {
                requested: ticket.0,
                current: self.generation.get(),
            })
        }
    }
}
