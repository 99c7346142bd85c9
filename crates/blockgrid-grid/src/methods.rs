//! Capability tables: one immutable descriptor per layout.
//!
//! A [`GridMethods`] bundles everything a client needs to work with a layout
//! without naming its type: construction, teardown, and one optional entry
//! per traversal order for each callback shape. An order a layout cannot
//! serve is `None` in its table. Clients either branch on
//! [`GridMethods::supports`] / [`GridMethods::traversal`], or call
//! [`GridMethods::map`] and accept the contract violation.

use std::fmt;

use blockgrid_core::{contract, GridError, GridKind, Order, OrderSet};
use log::debug;

use crate::grid::Grid;
use crate::traverse::{self, ApplyFn, SmallApplyFn};
use crate::{blocked, flat};

/// A traversal driving a full-context callback.
pub type MapFn = for<'a> fn(&mut dyn Grid, &mut ApplyFn<'a>);

/// A traversal driving an element-only callback.
pub type SmallMapFn = for<'a> fn(&mut dyn Grid, &mut SmallApplyFn<'a>);

type NewFn = fn(usize, usize, usize) -> Result<Box<dyn Grid>, GridError>;
type NewWithBlockSideFn = fn(usize, usize, usize, usize) -> Result<Box<dyn Grid>, GridError>;

/// The capability table of one grid layout.
///
/// Tables are `static`; every grid of a layout refers to the same one via
/// [`Grid::methods`].
pub struct GridMethods {
    kind: GridKind,
    new: NewFn,
    new_with_block_side: NewWithBlockSideFn,
    /// Indexed by [`Order::index`].
    traversals: [Option<MapFn>; 3],
    /// Indexed by [`Order::index`].
    small_traversals: [Option<SmallMapFn>; 3],
    default_order: Order,
}

/// Table for [`FlatGrid`](crate::FlatGrid): row-major and column-major.
pub static FLAT_METHODS: GridMethods = GridMethods {
    kind: GridKind::Flat,
    new: flat::new_boxed,
    new_with_block_side: flat::new_boxed_with_block_side,
    traversals: [
        Some(traverse::map_row_major),
        Some(traverse::map_col_major),
        None,
    ],
    small_traversals: [
        Some(traverse::small_map_row_major),
        Some(traverse::small_map_col_major),
        None,
    ],
    default_order: Order::RowMajor,
};

/// Table for [`BlockedGrid`](crate::BlockedGrid): every order, block-major
/// by default.
pub static BLOCKED_METHODS: GridMethods = GridMethods {
    kind: GridKind::Blocked,
    new: blocked::new_boxed,
    new_with_block_side: blocked::new_boxed_with_block_side,
    traversals: [
        Some(traverse::map_row_major),
        Some(traverse::map_col_major),
        Some(traverse::map_block_major),
    ],
    small_traversals: [
        Some(traverse::small_map_row_major),
        Some(traverse::small_map_col_major),
        Some(traverse::small_map_block_major),
    ],
    default_order: Order::BlockMajor,
};

impl GridMethods {
    /// Every table, for clients that enumerate layouts.
    pub fn all() -> [&'static GridMethods; 2] {
        [&FLAT_METHODS, &BLOCKED_METHODS]
    }

    /// The table for `kind`.
    pub fn for_kind(kind: GridKind) -> &'static GridMethods {
        match kind {
            GridKind::Flat => &FLAT_METHODS,
            GridKind::Blocked => &BLOCKED_METHODS,
        }
    }

    /// The layout this table describes.
    pub fn kind(&self) -> GridKind {
        self.kind
    }

    /// Orders with a traversal entry.
    pub fn orders(&self) -> OrderSet {
        Order::ALL
            .into_iter()
            .filter(|o| self.traversals[o.index()].is_some())
            .collect()
    }

    /// Whether `order` has a traversal entry.
    pub fn supports(&self, order: Order) -> bool {
        self.traversals[order.index()].is_some()
    }

    /// The order that best matches this layout's storage.
    pub fn default_order(&self) -> Order {
        self.default_order
    }

    /// Construct a zeroed grid. Blocked layouts derive their block side
    /// from the default 64 KiB budget.
    pub fn try_new(
        &self,
        width: usize,
        height: usize,
        elem_size: usize,
    ) -> Result<Box<dyn Grid>, GridError> {
        (self.new)(width, height, elem_size)
    }

    /// Construct a zeroed grid.
    ///
    /// # Panics
    ///
    /// Panics with a contract violation if any argument is zero.
    #[track_caller]
    pub fn new(&self, width: usize, height: usize, elem_size: usize) -> Box<dyn Grid> {
        contract::require(self.try_new(width, height, elem_size))
    }

    /// Construct a zeroed grid with an explicit block side. Layouts without
    /// blocks validate the side and otherwise ignore it.
    pub fn try_new_with_block_side(
        &self,
        width: usize,
        height: usize,
        elem_size: usize,
        block_side: usize,
    ) -> Result<Box<dyn Grid>, GridError> {
        (self.new_with_block_side)(width, height, elem_size, block_side)
    }

    /// Construct a zeroed grid with an explicit block side.
    ///
    /// # Panics
    ///
    /// Panics with a contract violation if any argument is zero.
    #[track_caller]
    pub fn new_with_block_side(
        &self,
        width: usize,
        height: usize,
        elem_size: usize,
        block_side: usize,
    ) -> Box<dyn Grid> {
        contract::require(self.try_new_with_block_side(width, height, elem_size, block_side))
    }

    /// Release a grid built through this table.
    ///
    /// Taking the box by value means a grid cannot be destroyed twice.
    ///
    /// # Panics
    ///
    /// Panics with a contract violation if the grid belongs to another
    /// table.
    #[track_caller]
    pub fn destroy(&self, grid: Box<dyn Grid>) {
        self.check_bound(&*grid);
        drop(grid);
    }

    /// Full-context traversal for `order`, or `None` if unsupported.
    pub fn traversal(&self, order: Order) -> Option<MapFn> {
        self.traversals[order.index()]
    }

    /// Element-only traversal for `order`, or `None` if unsupported.
    pub fn small_traversal(&self, order: Order) -> Option<SmallMapFn> {
        self.small_traversals[order.index()]
    }

    #[track_caller]
    fn check_bound(&self, grid: &dyn Grid) {
        if !std::ptr::eq(grid.methods(), self) {
            contract::violated(GridError::KindMismatch {
                table: self.kind,
                grid: grid.methods().kind,
            });
        }
    }

    #[track_caller]
    fn unsupported(&self, order: Order) -> ! {
        debug!("{} table has no {order} traversal", self.kind);
        contract::violated(GridError::UnsupportedOrder {
            kind: self.kind,
            order,
        })
    }

    /// Visit every cell of `grid` in `order`.
    ///
    /// # Panics
    ///
    /// Panics with a contract violation if this table has no entry for
    /// `order`, or if `grid` belongs to another table.
    #[track_caller]
    pub fn map(&self, grid: &mut dyn Grid, order: Order, apply: &mut ApplyFn<'_>) {
        self.check_bound(grid);
        match self.traversal(order) {
            Some(traversal) => traversal(grid, apply),
            None => self.unsupported(order),
        }
    }

    /// Element-only variant of [`map`](Self::map).
    ///
    /// # Panics
    ///
    /// As for [`map`](Self::map).
    #[track_caller]
    pub fn small_map(&self, grid: &mut dyn Grid, order: Order, apply: &mut SmallApplyFn<'_>) {
        self.check_bound(grid);
        match self.small_traversal(order) {
            Some(traversal) => traversal(grid, apply),
            None => self.unsupported(order),
        }
    }

    /// Visit every cell in [`default_order`](Self::default_order).
    #[track_caller]
    pub fn map_default(&self, grid: &mut dyn Grid, apply: &mut ApplyFn<'_>) {
        self.map(grid, self.default_order, apply);
    }

    /// Element-only visit in [`default_order`](Self::default_order).
    #[track_caller]
    pub fn small_map_default(&self, grid: &mut dyn Grid, apply: &mut SmallApplyFn<'_>) {
        self.small_map(grid, self.default_order, apply);
    }
}

impl fmt::Debug for GridMethods {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GridMethods")
            .field("kind", &self.kind)
            .field("orders", &self.orders())
            .field("default_order", &self.default_order)
            .finish()
    }
}
