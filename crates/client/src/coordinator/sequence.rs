use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic ticket counter.
///
/// Used both to fence list responses (only the latest dispatched request
/// may write state) and to debounce input (only the latest keystroke in a
/// quiet window is applied).
#[derive(Debug, Default)]
pub struct Sequence {
    latest: AtomicU64,
}

impl Sequence {
    /// Issues a new ticket, superseding every earlier one.
    pub fn next(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn is_latest(&self, ticket: u64) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket
    }
}
