//! The traversal engine.
//!
//! Orderings are computed from a [`Shape`] alone, so the sequence of cells a
//! traversal visits is fixed before the first callback runs. The engine pulls
//! each cell through [`Grid::get_mut`], which keeps the orderings independent
//! of any particular layout: the same three functions serve every table.
//!
//! Element-only callbacks are adapted onto the full-context entry points
//! rather than getting orderings of their own.

use blockgrid_core::{contract, GridError, Order};

use crate::grid::{Grid, Shape};

/// Full-context traversal callback: `(col, row, shape, elem)`.
pub type ApplyFn<'a> = dyn FnMut(usize, usize, &Shape, &mut [u8]) + 'a;

/// Element-only traversal callback.
pub type SmallApplyFn<'a> = dyn FnMut(&mut [u8]) + 'a;

/// Iterator over `(col, row)` pairs in one traversal order.
#[derive(Clone, Debug)]
pub struct Cells {
    width: usize,
    height: usize,
    walk: Walk,
    remaining: usize,
}

#[derive(Clone, Debug)]
enum Walk {
    /// Linear position in the row-major or column-major sequence.
    Linear { order: Order, next: usize },
    Blocks(BlockCursor),
}

/// Position inside a block-major walk.
#[derive(Clone, Debug)]
struct BlockCursor {
    side: usize,
    block_cols: usize,
    block_col: usize,
    block_row: usize,
    local_col: usize,
    local_row: usize,
}

impl BlockCursor {
    /// Logical width of block column `block_col`.
    fn extent_cols(&self, width: usize, block_col: usize) -> usize {
        (width - block_col * self.side).min(self.side)
    }

    /// Logical height of block row `block_row`.
    fn extent_rows(&self, height: usize, block_row: usize) -> usize {
        (height - block_row * self.side).min(self.side)
    }
}

impl Cells {
    /// Rows top to bottom, each row left to right.
    pub fn row_major(width: usize, height: usize) -> Self {
        Self::linear(width, height, Order::RowMajor)
    }

    /// Columns left to right, each column top to bottom.
    pub fn col_major(width: usize, height: usize) -> Self {
        Self::linear(width, height, Order::ColMajor)
    }

    fn linear(width: usize, height: usize, order: Order) -> Self {
        Self {
            width,
            height,
            walk: Walk::Linear { order, next: 0 },
            remaining: width * height,
        }
    }

    /// Blocks of `side x side` in row-major block order, each block's cells
    /// in row-major order.
    ///
    /// Boundary blocks are walked only over the part that overlaps the grid,
    /// so no coordinate outside `[0, width) x [0, height)` is produced.
    ///
    /// # Panics
    ///
    /// Panics if `side` is zero.
    pub fn block_major(width: usize, height: usize, side: usize) -> Self {
        assert!(side > 0, "block side must be positive");
        Self {
            width,
            height,
            walk: Walk::Blocks(BlockCursor {
                side,
                block_cols: width.div_ceil(side),
                block_col: 0,
                block_row: 0,
                local_col: 0,
                local_row: 0,
            }),
            remaining: width * height,
        }
    }

    /// The sequence for `order` over `shape`, or `None` if `order` needs
    /// physical blocks and the shape has none.
    pub fn for_order(shape: &Shape, order: Order) -> Option<Self> {
        match order {
            Order::RowMajor => Some(Self::row_major(shape.width, shape.height)),
            Order::ColMajor => Some(Self::col_major(shape.width, shape.height)),
            Order::BlockMajor => shape
                .block_side
                .map(|side| Self::block_major(shape.width, shape.height, side)),
        }
    }
}

impl Iterator for Cells {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let (width, height) = (self.width, self.height);
        match &mut self.walk {
            Walk::Linear { order, next } => {
                let i = *next;
                *next += 1;
                match order {
                    Order::ColMajor => Some((i / height, i % height)),
                    _ => Some((i % width, i / width)),
                }
            }
            Walk::Blocks(cur) => {
                let cell = (
                    cur.block_col * cur.side + cur.local_col,
                    cur.block_row * cur.side + cur.local_row,
                );
                cur.local_col += 1;
                if cur.local_col == cur.extent_cols(width, cur.block_col) {
                    cur.local_col = 0;
                    cur.local_row += 1;
                    if cur.local_row == cur.extent_rows(height, cur.block_row) {
                        cur.local_row = 0;
                        cur.block_col += 1;
                        if cur.block_col == cur.block_cols {
                            cur.block_col = 0;
                            cur.block_row += 1;
                        }
                    }
                }
                Some(cell)
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Cells {}

#[track_caller]
fn drive(grid: &mut dyn Grid, order: Order, apply: &mut ApplyFn<'_>) {
    let shape = grid.shape();
    let Some(cells) = Cells::for_order(&shape, order) else {
        contract::violated(GridError::UnsupportedOrder {
            kind: grid.methods().kind(),
            order,
        });
    };
    for (col, row) in cells {
        match grid.get_mut(col, row) {
            Some(elem) => apply(col, row, &shape, elem),
            None => contract::violated(GridError::OutOfBounds {
                col,
                row,
                width: shape.width,
                height: shape.height,
            }),
        }
    }
}

/// Visit every cell in row-major order.
pub fn map_row_major(grid: &mut dyn Grid, apply: &mut ApplyFn<'_>) {
    drive(grid, Order::RowMajor, apply);
}

/// Visit every cell in column-major order.
pub fn map_col_major(grid: &mut dyn Grid, apply: &mut ApplyFn<'_>) {
    drive(grid, Order::ColMajor, apply);
}

/// Visit every cell in block-major order.
///
/// # Panics
///
/// Panics with a contract violation if the grid has no physical blocks.
#[track_caller]
pub fn map_block_major(grid: &mut dyn Grid, apply: &mut ApplyFn<'_>) {
    drive(grid, Order::BlockMajor, apply);
}

/// Element-only row-major traversal.
///
/// The closure handed to the full-context entry point is the intermediate
/// context: it holds the caller's callback and drops the coordinates.
pub fn small_map_row_major(grid: &mut dyn Grid, apply: &mut SmallApplyFn<'_>) {
    map_row_major(grid, &mut |_: usize, _: usize, _: &Shape, elem: &mut [u8]| apply(elem));
}

/// Element-only column-major traversal.
pub fn small_map_col_major(grid: &mut dyn Grid, apply: &mut SmallApplyFn<'_>) {
    map_col_major(grid, &mut |_: usize, _: usize, _: &Shape, elem: &mut [u8]| apply(elem));
}

/// Element-only block-major traversal.
#[track_caller]
pub fn small_map_block_major(grid: &mut dyn Grid, apply: &mut SmallApplyFn<'_>) {
    map_block_major(grid, &mut |_: usize, _: usize, _: &Shape, elem: &mut [u8]| apply(elem));
}
