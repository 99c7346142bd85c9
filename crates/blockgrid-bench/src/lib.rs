//! Benchmark profiles for blockgrid.
//!
//! - [`image_profile`]: a 1024x1024 RGB grid, large enough that a column
//!   walk over flat storage misses cache on every step
//! - [`PROFILE_SIDES`]: block sides swept by the traversal benchmarks

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use blockgrid::prelude::*;

/// Width and height of [`image_profile`] grids.
pub const IMAGE_DIM: usize = 1024;

/// Bytes per cell in [`image_profile`] grids.
pub const IMAGE_ELEM: usize = 3;

/// Block sides swept when comparing blocked layouts.
pub const PROFILE_SIDES: [usize; 4] = [8, 16, 32, 64];

/// Build an `IMAGE_DIM` square RGB grid through `methods`, filled with a
/// position-dependent pattern.
///
/// `block_side` is ignored by layouts without blocks; `None` uses the
/// default budget.
pub fn image_profile(methods: &'static GridMethods, block_side: Option<usize>) -> Box<dyn Grid> {
    let mut grid = match block_side {
        Some(side) => methods.new_with_block_side(IMAGE_DIM, IMAGE_DIM, IMAGE_ELEM, side),
        None => methods.new(IMAGE_DIM, IMAGE_DIM, IMAGE_ELEM),
    };
    grid.map_default(|col, row, _, elem| {
        elem.copy_from_slice(&[col as u8, row as u8, (col ^ row) as u8]);
    });
    grid
}

/// Sum every byte of `grid`, visiting cells in `order`.
pub fn checksum(grid: &mut dyn Grid, order: Order) -> u64 {
    let mut sum = 0u64;
    grid.small_map(order, |elem| {
        sum += elem.iter().map(|&b| u64::from(b)).sum::<u64>();
    });
    sum
}
