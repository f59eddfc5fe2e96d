//! Load sequencing for out-of-order response discard.

use std::sync::atomic::{AtomicU64, Ordering};

/// Identity of one issued load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    /// Monotonic sequence number, starting at 1.
    pub seq: u64,
    /// Requested page.
    pub page: u64,
    /// Requested search term.
    pub search: String,
}

/// Hands out increasing sequence numbers; only the latest ticket's
/// response may be applied.
#[derive(Debug, Default)]
pub struct LoadSequencer {
    latest: AtomicU64,
}

impl LoadSequencer {
    /// Create a sequencer with nothing issued.
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket for a load of `page` with `search`.
    pub fn issue(&self, page: u64, search: &str) -> LoadTicket {
        let seq = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        LoadTicket {
            seq,
            page,
            search: search.to_string(),
        }
    }

    /// Most recently issued sequence number, 0 before the first load.
    pub fn latest(&self) -> u64 {
        self.latest.load(Ordering::SeqCst)
    }

    /// Whether `ticket` is still the latest issued.
    pub fn is_current(&self, ticket: &LoadTicket) -> bool {
        self.latest() == ticket.seq
    }
}
