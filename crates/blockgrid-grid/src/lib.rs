//! Two-dimensional grids with selectable storage layouts.
//!
//! This crate defines the [`Grid`] trait, the access contract every layout
//! implements, and the [`GridMethods`] capability tables through which
//! clients construct grids and pick a traversal order without knowing the
//! layout underneath.
//!
//! # Layouts
//!
//! - [`FlatGrid`]: one contiguous row-major [`CellStore`](blockgrid_store::CellStore).
//!   Supports row-major and column-major traversal.
//! - [`BlockedGrid`]: square blocks of `block_side²` cells, each its own
//!   store. Adds block-major traversal, which finishes one block before
//!   starting the next.
//!
//! # Capability negotiation
//!
//! Each layout has exactly one `static` table ([`FLAT_METHODS`],
//! [`BLOCKED_METHODS`]). A traversal order the layout cannot serve is simply
//! absent from its table; [`GridMethods::traversal`] returns `None` for it
//! and [`GridMethods::map`] treats invoking it as a contract violation.
//!
//! ```
//! use blockgrid_grid::{Order, BLOCKED_METHODS, FLAT_METHODS};
//!
//! assert!(BLOCKED_METHODS.supports(Order::BlockMajor));
//! assert!(FLAT_METHODS.traversal(Order::BlockMajor).is_none());
//!
//! let mut grid = BLOCKED_METHODS.new_with_block_side(13, 10, 4, 8);
//! let mut visited = 0;
//! grid.map(Order::BlockMajor, |_col, _row, _shape, _elem| visited += 1);
//! assert_eq!(visited, 130);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod blocked;
pub mod flat;
pub mod grid;
pub mod methods;
pub mod traverse;

#[cfg(test)]
pub(crate) mod compliance;

pub use blocked::BlockedGrid;
pub use blockgrid_core::{GridError, GridKind, Order, OrderSet};
pub use flat::FlatGrid;
pub use grid::{Grid, Shape};
pub use methods::{GridMethods, MapFn, SmallMapFn, BLOCKED_METHODS, FLAT_METHODS};
pub use traverse::{ApplyFn, Cells, SmallApplyFn};
