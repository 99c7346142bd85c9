//! Grid contract compliance test helpers.
//!
//! These functions verify that a [`Grid`] implementation satisfies the
//! invariants the traversal engine and capability tables rely on. Reused by
//! the test modules of every layout.

use crate::grid::Grid;
use blockgrid_core::Order;
use indexmap::IndexSet;

fn visits(grid: &mut dyn Grid, order: Order) -> Vec<(usize, usize)> {
    let mut out = Vec::with_capacity(grid.width() * grid.height());
    grid.map(order, |col, row, _, _| out.push((col, row)));
    out
}

/// Assert that every supported order visits each cell exactly once and
/// nothing outside the grid.
pub fn assert_orders_cover_each_cell_once(grid: &mut dyn Grid) {
    let (width, height) = (grid.width(), grid.height());
    for order in grid.supported_orders() {
        let seq = visits(grid, order);
        assert_eq!(
            seq.len(),
            width * height,
            "{order} visited {} cells, expected {}",
            seq.len(),
            width * height
        );
        for &(col, row) in &seq {
            assert!(
                col < width && row < height,
                "{order} visited ({col}, {row}) outside {width}x{height}"
            );
        }
        let unique: IndexSet<_> = seq.iter().collect();
        assert_eq!(unique.len(), seq.len(), "{order} visited a cell twice");
    }
}

/// Assert that the element handed to a callback is the cell `at` returns.
pub fn assert_callbacks_see_cell_storage(grid: &mut dyn Grid) {
    let width = grid.width();
    for order in grid.supported_orders() {
        grid.map(order, |col, row, shape, elem| {
            assert_eq!(elem.len(), shape.elem_size);
            elem.fill(0);
            let tag = (row * width + col).to_ne_bytes();
            let n = elem.len().min(tag.len());
            elem[..n].copy_from_slice(&tag[..n]);
        });
        for row in 0..grid.height() {
            for col in 0..width {
                let tag = (row * width + col).to_ne_bytes();
                let elem = grid.at_ref(col, row);
                let n = elem.len().min(tag.len());
                assert_eq!(&elem[..n], &tag[..n], "{order} wrote ({col}, {row}) elsewhere");
            }
        }
    }
}

/// Assert that every cell round-trips a distinct byte pattern.
pub fn assert_write_read_round_trip(grid: &mut dyn Grid) {
    let (width, height, size) = (grid.width(), grid.height(), grid.elem_size());
    let pattern = |col: usize, row: usize| -> Vec<u8> {
        (0..size)
            .map(|i| (col * 31 + row * 17 + i * 7) as u8)
            .collect()
    };
    for row in 0..height {
        for col in 0..width {
            grid.at(col, row).copy_from_slice(&pattern(col, row));
        }
    }
    for row in 0..height {
        for col in 0..width {
            assert_eq!(grid.at_ref(col, row), pattern(col, row).as_slice());
        }
    }
}

/// Assert that table entries and the advertised order set agree, and that
/// the default order is supported.
pub fn assert_table_consistent(grid: &dyn Grid) {
    let methods = grid.methods();
    for order in Order::ALL {
        let advertised = grid.supported_orders().contains(order);
        assert_eq!(methods.traversal(order).is_some(), advertised);
        assert_eq!(methods.small_traversal(order).is_some(), advertised);
    }
    assert!(grid.supported_orders().contains(methods.default_order()));
    assert_eq!(
        grid.supported_orders().contains(Order::BlockMajor),
        grid.block_side().is_some(),
        "block-major support must match physical blocking"
    );
}

/// Assert that element-only traversal visits as many cells as the
/// full-context one, in the same order.
pub fn assert_small_map_matches_map(grid: &mut dyn Grid) {
    for order in grid.supported_orders() {
        let mut n = 0u64;
        grid.small_map(order, |elem| {
            elem.fill(0);
            let bytes = n.to_ne_bytes();
            let k = elem.len().min(bytes.len());
            elem[..k].copy_from_slice(&bytes[..k]);
            n += 1;
        });
        assert_eq!(n as usize, grid.width() * grid.height());
        let mut expected = 0u64;
        grid.map(order, |_, _, _, elem| {
            let bytes = expected.to_ne_bytes();
            let k = elem.len().min(bytes.len());
            assert_eq!(&elem[..k], &bytes[..k], "small_map diverged from map under {order}");
            expected += 1;
        });
    }
}

/// Run all compliance checks on a grid.
pub fn run_full_compliance(grid: &mut dyn Grid) {
    assert_table_consistent(grid);
    assert_orders_cover_each_cell_once(grid);
    assert_write_read_round_trip(grid);
    assert_callbacks_see_cell_storage(grid);
    assert_small_map_matches_map(grid);
}
