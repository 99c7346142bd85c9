//! Test utilities for blockgrid development.
//!
//! Helpers for filling grids with recognisable values, reading them back,
//! and recording the sequence of cells a traversal visits. The grid crates
//! store opaque bytes; these fixtures agree on `u32` (native endian) or
//! three-byte RGB records.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use blockgrid_core::Order;
use blockgrid_grid::Grid;

pub use fixtures::{block_runs, fill_rgb, rgb_at, BlockRun};

/// Write `value` into a four-byte cell.
pub fn write_u32(grid: &mut dyn Grid, col: usize, row: usize, value: u32) {
    grid.at(col, row).copy_from_slice(&value.to_ne_bytes());
}

/// Read a four-byte cell.
pub fn read_u32(grid: &dyn Grid, col: usize, row: usize) -> u32 {
    let mut buf = [0u8; 4];
    buf.copy_from_slice(grid.at_ref(col, row));
    u32::from_ne_bytes(buf)
}

/// Write `1 + row * width + col` into every cell, in row-major order.
///
/// The grid must have four-byte elements.
pub fn fill_counting(grid: &mut dyn Grid) {
    assert_eq!(grid.elem_size(), 4, "fill_counting needs u32 cells");
    let width = grid.width();
    let mut n = 1u32;
    for row in 0..grid.height() {
        for col in 0..width {
            write_u32(grid, col, row, n);
            n += 1;
        }
    }
}

/// The expected value of cell `(col, row)` after [`fill_counting`].
pub fn counting_value(width: usize, col: usize, row: usize) -> u32 {
    (1 + row * width + col) as u32
}

/// Every `(col, row)` a traversal visits, in visit order.
pub fn record_visits(grid: &mut dyn Grid, order: Order) -> Vec<(usize, usize)> {
    let mut visits = Vec::with_capacity(grid.width() * grid.height());
    grid.map(order, |col, row, _, _| visits.push((col, row)));
    visits
}

/// Every `u32` value a traversal sees, in visit order.
pub fn record_values(grid: &mut dyn Grid, order: Order) -> Vec<u32> {
    let mut values = Vec::with_capacity(grid.width() * grid.height());
    grid.small_map(order, |elem| {
        let mut buf = [0u8; 4];
        buf.copy_from_slice(elem);
        values.push(u32::from_ne_bytes(buf));
    });
    values
}
