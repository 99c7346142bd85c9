//! Thread-local accounting of live cell stores.
//!
//! Every [`CellStore`](crate::CellStore) registers its buffer here on
//! construction and deregisters it on drop. `CellStore` is `!Send`, so a
//! store is always dropped on the thread whose counters recorded it, and
//! per-thread counters observe exactly the stores created by the code
//! running on that thread (one test, for instance).

use std::cell::Cell;

thread_local! {
    static LIVE_STORES: Cell<usize> = const { Cell::new(0) };
    static LIVE_BYTES: Cell<usize> = const { Cell::new(0) };
}

/// Point-in-time view of the ledger for the current thread.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LedgerSnapshot {
    /// Stores constructed and not yet dropped.
    pub stores: usize,
    /// Bytes owned by those stores.
    pub bytes: usize,
}

/// Current ledger totals for this thread.
pub fn snapshot() -> LedgerSnapshot {
    LedgerSnapshot {
        stores: live_stores(),
        bytes: live_bytes(),
    }
}

/// Number of live stores on this thread.
pub fn live_stores() -> usize {
    LIVE_STORES.with(Cell::get)
}

/// Bytes held by live stores on this thread.
pub fn live_bytes() -> usize {
    LIVE_BYTES.with(Cell::get)
}

pub(crate) fn record_alloc(bytes: usize) {
    LIVE_STORES.with(|c| c.set(c.get() + 1));
    LIVE_BYTES.with(|c| c.set(c.get() + bytes));
}

pub(crate) fn record_free(bytes: usize) {
    LIVE_STORES.with(|c| c.set(c.get() - 1));
    LIVE_BYTES.with(|c| c.set(c.get() - bytes));
}
