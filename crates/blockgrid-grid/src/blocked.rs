//! Blocked layout: square blocks, each its own contiguous store.
//!
//! ```text
//!            col 0..8        col 8..13 (8 slots wide, 5 logical)
//!          +-----------+-----------+
//! row 0..8 | block 0,0 | block 1,0 |
//!          +-----------+-----------+
//! row 8..10| block 0,1 | block 1,1 |   boundary blocks: full side² storage,
//!          +-----------+-----------+   only the overlap is ever addressed
//! ```
//!
//! The block index is itself row-major: block `(bc, br)` is entry
//! `br * block_cols + bc`. Within a block, local cell `(lc, lr)` is slot
//! `lr * block_side + lc`.

use std::fmt;

use blockgrid_core::{contract, GridError, GridInstanceId};
use blockgrid_store::{BlockBudget, CellStore};
use log::{debug, trace};

use crate::grid::Grid;
use crate::methods::{GridMethods, BLOCKED_METHODS};

/// A `width x height` grid partitioned into `block_side x block_side`
/// blocks.
///
/// Every block, boundary blocks included, is allocated at construction with
/// exactly `block_side²` slots, so access never allocates. Slots of a
/// boundary block that fall outside the grid are never read or written.
///
/// # Examples
///
/// ```
/// use blockgrid_grid::{BlockedGrid, Grid};
///
/// let mut grid = BlockedGrid::new(13, 10, 4, 8);
/// assert_eq!((grid.block_cols(), grid.block_rows()), (2, 2));
///
/// grid.at(12, 9).copy_from_slice(&130u32.to_ne_bytes());
/// assert_eq!(grid.at_ref(12, 9), &130u32.to_ne_bytes());
/// assert_eq!(grid.block_side(), Some(8));
/// ```
///
/// Grids stay on the thread that built them:
///
/// ```compile_fail
/// use blockgrid_grid::BlockedGrid;
///
/// let grid = BlockedGrid::new(13, 10, 4, 8);
/// std::thread::spawn(move || grid.destroy());
/// ```
pub struct BlockedGrid {
    width: usize,
    height: usize,
    elem_size: usize,
    block_side: usize,
    block_cols: usize,
    block_rows: usize,
    /// Row-major block index, `block_cols * block_rows` entries.
    blocks: Vec<CellStore>,
    instance_id: GridInstanceId,
}

impl BlockedGrid {
    /// Create a zeroed grid with an explicit block side.
    ///
    /// Fails if any argument is zero or the storage size overflows `usize`.
    pub fn try_new(
        width: usize,
        height: usize,
        elem_size: usize,
        block_side: usize,
    ) -> Result<Self, GridError> {
        if width == 0 {
            return Err(GridError::ZeroDimension { name: "width" });
        }
        if height == 0 {
            return Err(GridError::ZeroDimension { name: "height" });
        }
        if elem_size == 0 {
            return Err(GridError::ZeroElemSize);
        }
        if block_side == 0 {
            return Err(GridError::ZeroBlockSide);
        }
        let overflow = || GridError::SizeOverflow {
            elements: width.saturating_mul(height),
            elem_size,
        };
        let block_cells = block_side.checked_mul(block_side).ok_or_else(overflow)?;
        let block_cols = width.div_ceil(block_side);
        let block_rows = height.div_ceil(block_side);
        let block_count = block_cols.checked_mul(block_rows).ok_or_else(overflow)?;
        block_cells
            .checked_mul(elem_size)
            .and_then(|block_bytes| block_bytes.checked_mul(block_count))
            .filter(|&total| total <= isize::MAX as usize)
            .ok_or_else(overflow)?;
        let blocks = (0..block_count)
            .map(|_| CellStore::try_new(block_cells, elem_size))
            .collect::<Result<Vec<_>, _>>()?;
        let instance_id = GridInstanceId::next();
        debug!(
            "blocked grid {instance_id}: {width}x{height} cells of {elem_size} bytes, \
             {block_cols}x{block_rows} blocks of side {block_side}"
        );
        Ok(Self {
            width,
            height,
            elem_size,
            block_side,
            block_cols,
            block_rows,
            blocks,
            instance_id,
        })
    }

    /// Create a zeroed grid with an explicit block side, treating invalid
    /// arguments as a contract violation.
    ///
    /// # Panics
    ///
    /// Panics if any argument is zero.
    #[track_caller]
    pub fn new(width: usize, height: usize, elem_size: usize, block_side: usize) -> Self {
        contract::require(Self::try_new(width, height, elem_size, block_side))
    }

    /// Create a grid whose block side is derived from `budget`.
    pub fn try_with_budget(
        width: usize,
        height: usize,
        elem_size: usize,
        budget: BlockBudget,
    ) -> Result<Self, GridError> {
        if elem_size == 0 {
            return Err(GridError::ZeroElemSize);
        }
        Self::try_new(width, height, elem_size, budget.block_side(elem_size))
    }

    /// Create a grid whose block side is derived from `budget`.
    ///
    /// # Panics
    ///
    /// Panics if `width`, `height`, or `elem_size` is zero.
    #[track_caller]
    pub fn with_budget(width: usize, height: usize, elem_size: usize, budget: BlockBudget) -> Self {
        contract::require(Self::try_with_budget(width, height, elem_size, budget))
    }

    /// Create a grid whose blocks each occupy roughly 64 KiB.
    ///
    /// # Panics
    ///
    /// Panics if `width`, `height`, or `elem_size` is zero.
    #[track_caller]
    pub fn new_auto(width: usize, height: usize, elem_size: usize) -> Self {
        Self::with_budget(width, height, elem_size, BlockBudget::default())
    }

    /// Release every block, then the index, then the grid.
    pub fn destroy(self) {
        drop(self);
    }

    /// Number of block columns, `ceil(width / block_side)`.
    pub fn block_cols(&self) -> usize {
        self.block_cols
    }

    /// Number of block rows, `ceil(height / block_side)`.
    pub fn block_rows(&self) -> usize {
        self.block_rows
    }

    /// Total number of blocks.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Block `(block_col, block_row)`, or `None` if outside the index.
    pub fn block(&self, block_col: usize, block_row: usize) -> Option<&CellStore> {
        if block_col >= self.block_cols || block_row >= self.block_rows {
            return None;
        }
        self.blocks.get(block_row * self.block_cols + block_col)
    }

    fn out_of_bounds(&self, col: usize, row: usize) -> GridError {
        GridError::OutOfBounds {
            col,
            row,
            width: self.width,
            height: self.height,
        }
    }

    /// Translate `(col, row)` to `(block index, slot within block)`.
    fn locate(&self, col: usize, row: usize) -> Option<(usize, usize)> {
        if col >= self.width || row >= self.height {
            return None;
        }
        let side = self.block_side;
        let block = (row / side) * self.block_cols + col / side;
        let slot = (row % side) * side + col % side;
        Some((block, slot))
    }
}

impl Grid for BlockedGrid {
    fn methods(&self) -> &'static GridMethods {
        &BLOCKED_METHODS
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
        self.elem_size
    }

    fn block_side(&self) -> Option<usize> {
        Some(self.block_side)
    }

    fn memory_bytes(&self) -> usize {
        self.blocks.iter().map(CellStore::memory_bytes).sum()
    }

    fn get(&self, col: usize, row: usize) -> Option<&[u8]> {
        let (block, slot) = self.locate(col, row)?;
        self.blocks[block].get(slot)
    }

    fn get_mut(&mut self, col: usize, row: usize) -> Option<&mut [u8]> {
        let (block, slot) = self.locate(col, row)?;
        self.blocks[block].get_mut(slot)
    }

    #[track_caller]
    fn at(&mut self, col: usize, row: usize) -> &mut [u8] {
        let Some((block, slot)) = self.locate(col, row) else {
            contract::violated(self.out_of_bounds(col, row));
        };
        self.blocks[block].at(slot)
    }

    #[track_caller]
    fn at_ref(&self, col: usize, row: usize) -> &[u8] {
        let Some((block, slot)) = self.locate(col, row) else {
            contract::violated(self.out_of_bounds(col, row));
        };
        self.blocks[block].at_ref(slot)
    }
}

impl Drop for BlockedGrid {
    fn drop(&mut self) {
        trace!(
            "blocked grid {}: releasing {} blocks, {} bytes",
            self.instance_id,
            self.blocks.len(),
            self.memory_bytes()
        );
        // Blocks first; the index buffer goes with the record.
        self.blocks.clear();
    }
}

impl fmt::Debug for BlockedGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlockedGrid")
            .field("id", &self.instance_id)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("elem_size", &self.elem_size)
            .field("block_side", &self.block_side)
            .finish()
    }
}

/// Table constructor: block side from the default budget.
pub(crate) fn new_boxed(
    width: usize,
    height: usize,
    elem_size: usize,
) -> Result<Box<dyn Grid>, GridError> {
    Ok(Box::new(BlockedGrid::try_with_budget(
        width,
        height,
        elem_size,
        BlockBudget::default(),
    )?))
}

/// Table constructor: explicit block side.
pub(crate) fn new_boxed_with_block_side(
    width: usize,
    height: usize,
    elem_size: usize,
    block_side: usize,
) -> Result<Box<dyn Grid>, GridError> {
    Ok(Box::new(BlockedGrid::try_new(
        width, height, elem_size, block_side,
    )?))
}
