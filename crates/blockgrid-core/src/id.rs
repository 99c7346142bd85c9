//! Grid identifiers.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// The concrete storage layout of a grid.
///
/// Each kind has exactly one capability table. The kind is carried by the
/// table, not by individual grids.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GridKind {
    /// One contiguous row-major store.
    Flat,
    /// Square blocks, each its own contiguous store.
    Blocked,
}

impl fmt::Display for GridKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flat => write!(f, "flat"),
            Self::Blocked => write!(f, "blocked"),
        }
    }
}

/// Counter for unique [`GridInstanceId`] allocation.
static GRID_INSTANCE_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique per-instance identifier for a grid.
///
/// Allocated from a monotonic counter at construction time. Two grids never
/// share an ID within one process, even if one was dropped before the other
/// was built. Used to correlate construction and teardown log lines.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridInstanceId(u64);

impl GridInstanceId {
    /// Allocate a fresh, unique instance ID.
    pub fn next() -> Self {
        Self(GRID_INSTANCE_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for GridInstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instance_ids_are_unique_and_increasing() {
        let a = GridInstanceId::next();
        let b = GridInstanceId::next();
        assert_ne!(a, b);
        assert!(b > a);
    }

    #[test]
    fn kind_display() {
        assert_eq!(GridKind::Flat.to_string(), "flat");
        assert_eq!(GridKind::Blocked.to_string(), "blocked");
    }
}
