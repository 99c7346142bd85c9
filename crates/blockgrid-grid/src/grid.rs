//! The [`Grid`] access contract and `dyn Grid` dispatch helpers.

use std::any::Any;

use blockgrid_core::{contract, GridError, GridInstanceId, Order, OrderSet};

use crate::methods::GridMethods;

/// Geometry of a grid, captured once and handed to traversal callbacks.
///
/// Callbacks receive a `Shape` instead of the grid itself: the grid is
/// mutably borrowed for the duration of the traversal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Shape {
    /// Number of columns.
    pub width: usize,
    /// Number of rows.
    pub height: usize,
    /// Size of one element in bytes.
    pub elem_size: usize,
    /// Side of a physical block, or `None` for layouts without blocks.
    pub block_side: Option<usize>,
}

impl Shape {
    /// Number of logical cells, `width * height`.
    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }

    /// Whether `(col, row)` lies in `[0, width) x [0, height)`.
    pub fn contains(&self, col: usize, row: usize) -> bool {
        col < self.width && row < self.height
    }

    /// Number of logical cells inside block `(block_col, block_row)`.
    ///
    /// Interior blocks hold `block_side²` cells; boundary blocks hold only
    /// the part that overlaps the grid. `None` for layouts without blocks.
    pub fn block_cell_count(&self, block_col: usize, block_row: usize) -> Option<usize> {
        let side = self.block_side?;
        let w = self.width.saturating_sub(block_col * side).min(side);
        let h = self.height.saturating_sub(block_row * side).min(side);
        Some(w * h)
    }
}

/// Access contract shared by every grid layout.
///
/// A grid is a fixed `width x height` array of cells, each `elem_size`
/// opaque bytes. Cells are addressed `(col, row)` with `col` in
/// `[0, width)` and `row` in `[0, height)`. Storage is acquired in full at
/// construction, so access never allocates.
///
/// Traversal is not part of the trait: it goes through the layout's
/// [`GridMethods`] table (see [`Grid::methods`] and the `impl dyn Grid`
/// helpers), which is where support for each order is advertised.
///
/// # Object safety
///
/// Designed for use as `dyn Grid`. Use `downcast_ref` for opt-in
/// specialisation on a concrete layout.
///
/// # Thread safety
///
/// None is promised. A grid has exactly one owner and is used from one
/// thread; both layouts are `!Send`.
pub trait Grid: Any + 'static {
    /// The capability table shared by every grid of this layout.
    fn methods(&self) -> &'static GridMethods;

    /// Unique identifier assigned at construction.
    fn instance_id(&self) -> GridInstanceId;

    /// Number of columns.
    fn width(&self) -> usize;

    /// Number of rows.
    fn height(&self) -> usize;

    /// Size of one element in bytes.
    fn elem_size(&self) -> usize;

    /// Side of a physical block, or `None` if the layout has no blocks.
    fn block_side(&self) -> Option<usize>;

    /// Bytes of cell storage owned by the grid, unused boundary slots
    /// included.
    fn memory_bytes(&self) -> usize;

    /// Cell `(col, row)`, or `None` if out of bounds.
    fn get(&self, col: usize, row: usize) -> Option<&[u8]>;

    /// Mutable cell `(col, row)`, or `None` if out of bounds.
    fn get_mut(&mut self, col: usize, row: usize) -> Option<&mut [u8]>;

    /// Geometry snapshot.
    fn shape(&self) -> Shape {
        Shape {
            width: self.width(),
            height: self.height(),
            elem_size: self.elem_size(),
            block_side: self.block_side(),
        }
    }

    /// Mutable cell `(col, row)`.
    ///
    /// # Panics
    ///
    /// Panics with a contract violation if `(col, row)` is out of bounds.
    #[track_caller]
    fn at(&mut self, col: usize, row: usize) -> &mut [u8] {
        let (width, height) = (self.width(), self.height());
        match self.get_mut(col, row) {
            Some(elem) => elem,
            None => contract::violated(GridError::OutOfBounds {
                col,
                row,
                width,
                height,
            }),
        }
    }

    /// Shared cell `(col, row)`.
    ///
    /// # Panics
    ///
    /// Panics with a contract violation if `(col, row)` is out of bounds.
    #[track_caller]
    fn at_ref(&self, col: usize, row: usize) -> &[u8] {
        match self.get(col, row) {
            Some(elem) => elem,
            None => contract::violated(GridError::OutOfBounds {
                col,
                row,
                width: self.width(),
                height: self.height(),
            }),
        }
    }

    /// Traversal orders this layout supports.
    fn supported_orders(&self) -> OrderSet {
        self.methods().orders()
    }
}

impl dyn Grid {
    /// Attempt to downcast to a concrete layout.
    pub fn downcast_ref<T: Grid>(&self) -> Option<&T> {
        (self as &dyn Any).downcast_ref::<T>()
    }

    /// Attempt to downcast to a concrete layout, mutably.
    pub fn downcast_mut<T: Grid>(&mut self) -> Option<&mut T> {
        (self as &mut dyn Any).downcast_mut::<T>()
    }

    /// Whether this grid's table offers `order`.
    pub fn supports(&self, order: Order) -> bool {
        self.methods().supports(order)
    }

    /// Visit every cell in `order` with a full-context callback.
    ///
    /// The callback receives `(col, row, shape, elem)`.
    ///
    /// # Panics
    ///
    /// Panics with a contract violation if the layout does not support
    /// `order`. Check [`supports`](Self::supports) first.
    #[track_caller]
    pub fn map<F>(&mut self, order: Order, mut apply: F)
    where
        F: FnMut(usize, usize, &Shape, &mut [u8]),
    {
        let methods = self.methods();
        methods.map(self, order, &mut apply);
    }

    /// Visit every cell in `order` with an element-only callback.
    ///
    /// # Panics
    ///
    /// Panics with a contract violation if the layout does not support
    /// `order`.
    #[track_caller]
    pub fn small_map<F>(&mut self, order: Order, mut apply: F)
    where
        F: FnMut(&mut [u8]),
    {
        let methods = self.methods();
        methods.small_map(self, order, &mut apply);
    }

    /// Visit every cell in the layout's preferred order.
    #[track_caller]
    pub fn map_default<F>(&mut self, mut apply: F)
    where
        F: FnMut(usize, usize, &Shape, &mut [u8]),
    {
        let methods = self.methods();
        methods.map_default(self, &mut apply);
    }

    /// Element-only variant of [`map_default`](Self::map_default).
    #[track_caller]
    pub fn small_map_default<F>(&mut self, mut apply: F)
    where
        F: FnMut(&mut [u8]),
    {
        let methods = self.methods();
        methods.small_map_default(self, &mut apply);
    }
}
