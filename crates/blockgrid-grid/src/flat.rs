//! Flat layout: one contiguous row-major store.

use std::fmt;

use blockgrid_core::{contract, GridError, GridInstanceId};
use blockgrid_store::CellStore;
use log::{debug, trace};

use crate::grid::Grid;
use crate::methods::{GridMethods, FLAT_METHODS};

/// A `width x height` grid backed by a single [`CellStore`].
///
/// Cell `(col, row)` lives at store index `row * width + col`. Row-major
/// traversal walks the store front to back; column-major strides by
/// `width` elements per step. The layout has no physical blocks, so
/// [`Grid::block_side`] is `None` and block-major traversal is absent from
/// its table.
///
/// # Examples
///
/// ```
/// use blockgrid_grid::{FlatGrid, Grid};
///
/// let mut grid = FlatGrid::new(3, 2, 4);
/// grid.at(2, 1).copy_from_slice(&7u32.to_ne_bytes());
/// assert_eq!(grid.at_ref(2, 1), &7u32.to_ne_bytes());
/// assert!(grid.get(3, 0).is_none());
/// assert_eq!(grid.block_side(), None);
/// ```
///
/// ```compile_fail
/// use blockgrid_grid::FlatGrid;
///
/// let grid = FlatGrid::new(3, 2, 4);
/// std::thread::spawn(move || grid.destroy());
/// ```
pub struct FlatGrid {
    width: usize,
    height: usize,
    store: CellStore,
    instance_id: GridInstanceId,
}

impl FlatGrid {
    /// Create a zeroed grid.
    ///
    /// Fails if any argument is zero or the total size overflows `usize`.
    pub fn try_new(width: usize, height: usize, elem_size: usize) -> Result<Self, GridError> {
        if width == 0 {
            return Err(GridError::ZeroDimension { name: "width" });
        }
        if height == 0 {
            return Err(GridError::ZeroDimension { name: "height" });
        }
        if elem_size == 0 {
            return Err(GridError::ZeroElemSize);
        }
        let cells = width.checked_mul(height).ok_or(GridError::SizeOverflow {
            elements: width.saturating_mul(height),
            elem_size,
        })?;
        let store = CellStore::try_new(cells, elem_size)?;
        let instance_id = GridInstanceId::next();
        debug!("flat grid {instance_id}: {width}x{height} cells of {elem_size} bytes");
        Ok(Self {
            width,
            height,
            store,
            instance_id,
        })
    }

    /// Create a zeroed grid, treating invalid arguments as a contract
    /// violation.
    ///
    /// # Panics
    ///
    /// Panics if `width`, `height`, or `elem_size` is zero.
    #[track_caller]
    pub fn new(width: usize, height: usize, elem_size: usize) -> Self {
        contract::require(Self::try_new(width, height, elem_size))
    }

    /// Release the grid and its store.
    pub fn destroy(self) {
        drop(self);
    }

    /// The backing store, cell `(0, 0)` first.
    pub fn store(&self) -> &CellStore {
        &self.store
    }

    fn out_of_bounds(&self, col: usize, row: usize) -> GridError {
        GridError::OutOfBounds {
            col,
            row,
            width: self.width,
            height: self.height,
        }
    }

    fn index(&self, col: usize, row: usize) -> Option<usize> {
        (col < self.width && row < self.height).then(|| row * self.width + col)
    }
}

impl Grid for FlatGrid {
    fn methods(&self) -> &'static GridMethods {
        &FLAT_METHODS
    }

    fn instance_id(&self) -> GridInstanceId {
        self.instance_id
    }

    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn elem_size(&self) -> usize {
        self.store.elem_size()
    }

    fn block_side(&self) -> Option<usize> {
        None
    }

    fn memory_bytes(&self) -> usize {
        self.store.memory_bytes()
    }

    fn get(&self, col: usize, row: usize) -> Option<&[u8]> {
        self.index(col, row).and_then(|i| self.store.get(i))
    }

    fn get_mut(&mut self, col: usize, row: usize) -> Option<&mut [u8]> {
        let i = self.index(col, row)?;
        self.store.get_mut(i)
    }

    #[track_caller]
    fn at(&mut self, col: usize, row: usize) -> &mut [u8] {
        match self.index(col, row) {
            Some(i) => self.store.at(i),
            None => contract::violated(self.out_of_bounds(col, row)),
        }
    }

    #[track_caller]
    fn at_ref(&self, col: usize, row: usize) -> &[u8] {
        match self.index(col, row) {
            Some(i) => self.store.at_ref(i),
            None => contract::violated(self.out_of_bounds(col, row)),
        }
    }
}

impl Drop for FlatGrid {
    fn drop(&mut self) {
        trace!(
            "flat grid {}: releasing {} bytes",
            self.instance_id,
            self.store.memory_bytes()
        );
    }
}

impl fmt::Debug for FlatGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlatGrid")
            .field("id", &self.instance_id)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("elem_size", &self.store.elem_size())
            .finish()
    }
}

/// Table constructor.
pub(crate) fn new_boxed(
    width: usize,
    height: usize,
    elem_size: usize,
) -> Result<Box<dyn Grid>, GridError> {
    Ok(Box::new(FlatGrid::try_new(width, height, elem_size)?))
}

/// Table constructor for callers that always pass a block side. The side is
/// validated and then ignored.
pub(crate) fn new_boxed_with_block_side(
    width: usize,
    height: usize,
    elem_size: usize,
    block_side: usize,
) -> Result<Box<dyn Grid>, GridError> {
    if block_side == 0 {
        return Err(GridError::ZeroBlockSide);
    }
    new_boxed(width, height, elem_size)
}
