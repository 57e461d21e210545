//! Request generations
//!
//! Each view owns a counter. Starting a load or leaving the view bumps it;
//! only a result carrying the current generation may be applied.

use serde::{Deserialize, Serialize};

/// Issued when a load starts; identifies the request it belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadTicket(u64);

impl LoadTicket {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

/// Per-view request counter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestGeneration {
    current: u64,
}

impl RequestGeneration {
    /// Start a new request, superseding any in flight
    pub fn begin(&mut self) -> LoadTicket {
        self.current += 1;
        LoadTicket(self.current)
    }

    /// Invalidate every outstanding ticket
    pub fn cancel(&mut self) {
        self.current += 1;
    }

    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        ticket.0 == self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newer_ticket_supersedes_older() {
        let mut requests = RequestGeneration::default();
        let first = requests.begin();
        let second = requests.begin();

        assert!(!requests.is_current(first));
        assert!(requests.is_current(second));
    }

    #[test]
    fn test_cancel_invalidates_outstanding() {
        let mut requests = RequestGeneration::default();
        let ticket = requests.begin();
        requests.cancel();

        assert!(!requests.is_current(ticket));

        let next = requests.begin();
        assert!(requests.is_current(next));
    }
}
