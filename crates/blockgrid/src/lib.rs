//! blockgrid: two-dimensional grids whose storage layout is chosen at
//! construction and hidden behind one access contract.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the blockgrid sub-crates, plus a [`transform`] module of client
//! algorithms built purely on that contract.
//!
//! # Quick start
//!
//! ```rust
//! use blockgrid::prelude::*;
//!
//! // Pick a layout by table; the rest of the code never names it.
//! let methods: &'static GridMethods = &BLOCKED_METHODS;
//! let mut grid = methods.new_with_block_side(13, 10, 4, 8);
//!
//! let mut n = 0u32;
//! grid.small_map(Order::RowMajor, |elem| {
//!     n += 1;
//!     elem.copy_from_slice(&n.to_ne_bytes());
//! });
//! assert_eq!(grid.at_ref(12, 9), &130u32.to_ne_bytes());
//!
//! // Ask before using an order a layout may not have.
//! let order = if methods.supports(Order::BlockMajor) {
//!     Order::BlockMajor
//! } else {
//!     methods.default_order()
//! };
//! let mut visited = 0;
//! grid.map(order, |_col, _row, _shape, _elem| visited += 1);
//! assert_eq!(visited, 130);
//!
//! methods.destroy(grid);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `blockgrid-core` | `Order`, `OrderSet`, `GridKind`, `GridError` |
//! | [`store`] | `blockgrid-store` | `CellStore`, `BlockBudget`, allocation ledger |
//! | [`grid`] | `blockgrid-grid` | `Grid`, `FlatGrid`, `BlockedGrid`, capability tables, traversal engine |
//! | [`transform`] | (this crate) | rotations, flips, and transpose over any layout |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core vocabulary (`blockgrid-core`).
pub use blockgrid_core as types;

/// Type-erased cell storage and block sizing (`blockgrid-store`).
pub use blockgrid_store as store;

/// Grid layouts, capability tables, and traversal (`blockgrid-grid`).
pub use blockgrid_grid as grid;

pub mod transform;

/// Common imports for blockgrid clients.
pub mod prelude {
    pub use blockgrid_core::{GridError, GridKind, Order, OrderSet};
    pub use blockgrid_grid::{
        BlockedGrid, FlatGrid, Grid, GridMethods, Shape, BLOCKED_METHODS, FLAT_METHODS,
    };
    pub use blockgrid_store::BlockBudget;

    pub use crate::transform::Transform;
}
