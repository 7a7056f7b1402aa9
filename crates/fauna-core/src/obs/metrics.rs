use serde::{Deserialize, Serialize};
use std::cell::RefCell;

///
/// PaginateCounters
/// Ephemeral, in-memory counters for page traversals on this thread.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct PaginateCounters {
    // Traversal lifecycle
    pub traversals_started: u64,
    pub traversals_finished: u64,
    pub traversals_failed: u64,

    // Fetches
    pub pages_fetched: u64,
    pub elements_fetched: u64,
    pub empty_pages: u64,
    pub pages_with_both_cursors: u64,

    // Largest completed traversal
    pub longest_traversal_pages: u64,
    pub largest_traversal_elements: u64,

    // Failures by class
    pub execution_failures: u64,
    pub malformed_responses: u64,
}

thread_local! {
    static COUNTERS: RefCell<PaginateCounters> = RefCell::new(PaginateCounters::default());
}

/// Borrow counters immutably.
pub(crate) fn with_state<R>(f: impl FnOnce(&PaginateCounters) -> R) -> R {
    COUNTERS.with(|c| f(&c.borrow()))
}

/// Borrow counters mutably.
pub(crate) fn with_state_mut<R>(f: impl FnOnce(&mut PaginateCounters) -> R) -> R {
    COUNTERS.with(|c| f(&mut c.borrow_mut()))
}

/// Reset all counters (useful in tests).
pub(crate) fn reset() {
    with_state_mut(|c| *c = PaginateCounters::default());
}
