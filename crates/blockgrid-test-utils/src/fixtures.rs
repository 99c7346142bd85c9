//! Reusable grid fixtures.
//!
//! - [`block_runs`]: collapse a visit sequence into runs of same-block cells.
//! - [`rgb_at`] / [`fill_rgb`]: distinct three-byte pixels per cell.

use blockgrid_grid::Grid;

/// A maximal run of consecutive visits inside one block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockRun {
    /// `(block_col, block_row)`.
    pub block: (usize, usize),
    /// Number of consecutive visits.
    pub len: usize,
}

/// Partition a visit sequence by `(col / side, row / side)` into maximal
/// contiguous runs.
pub fn block_runs(visits: &[(usize, usize)], side: usize) -> Vec<BlockRun> {
    let mut runs: Vec<BlockRun> = Vec::new();
    for &(col, row) in visits {
        let block = (col / side, row / side);
        match runs.last_mut() {
            Some(run) if run.block == block => run.len += 1,
            _ => runs.push(BlockRun { block, len: 1 }),
        }
    }
    runs
}

/// A pixel unique to `(col, row)` for grids up to 256 on each side.
pub fn rgb_at(col: usize, row: usize) -> [u8; 3] {
    [col as u8, row as u8, (col ^ row) as u8]
}

/// Write [`rgb_at`] into every cell of a three-byte grid.
pub fn fill_rgb(grid: &mut dyn Grid) {
    assert_eq!(grid.elem_size(), 3, "fill_rgb needs three-byte cells");
    for row in 0..grid.height() {
        for col in 0..grid.width() {
            grid.at(col, row).copy_from_slice(&rgb_at(col, row));
        }
    }
}
