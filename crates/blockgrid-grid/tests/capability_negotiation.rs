use blockgrid_grid::{Grid, GridKind, GridMethods, Order, BLOCKED_METHODS, FLAT_METHODS};
use blockgrid_test_utils::{fill_counting, read_u32, record_visits};
use test_log::test;

/// A client that asks for its preferred order and falls back to the table's
/// default when the layout cannot serve it.
fn sum_preferring(methods: &'static GridMethods, preferred: Order) -> (Order, u64) {
    let mut grid = methods.new_with_block_side(9, 7, 4, 4);
    fill_counting(&mut *grid);
    let order = if methods.supports(preferred) {
        preferred
    } else {
        methods.default_order()
    };
    let mut sum = 0u64;
    grid.small_map(order, |elem| {
        let mut buf = [0u8; 4];
        buf.copy_from_slice(elem);
        sum += u64::from(u32::from_ne_bytes(buf));
    });
    methods.destroy(grid);
    (order, sum)
}

#[test]
fn clients_fall_back_when_block_major_is_absent() {
    let expected: u64 = (1..=63).sum();
    assert_eq!(
        sum_preferring(&FLAT_METHODS, Order::BlockMajor),
        (Order::RowMajor, expected)
    );
    assert_eq!(
        sum_preferring(&BLOCKED_METHODS, Order::BlockMajor),
        (Order::BlockMajor, expected)
    );
}

#[test]
fn the_same_client_code_runs_on_every_layout() {
    for methods in GridMethods::all() {
        let mut grid = methods.new_with_block_side(6, 4, 4, 3);
        fill_counting(&mut *grid);
        for order in methods.orders() {
            assert_eq!(record_visits(&mut *grid, order).len(), 24);
        }
        assert_eq!(read_u32(&*grid, 5, 3), 24);
    }
}

#[test]
fn block_side_reports_none_without_physical_blocks() {
    let flat = FLAT_METHODS.new(4, 4, 1);
    let blocked = BLOCKED_METHODS.new_with_block_side(4, 4, 1, 2);
    assert_eq!(flat.block_side(), None);
    assert_eq!(blocked.block_side(), Some(2));
    assert_eq!(flat.methods().kind(), GridKind::Flat);
    assert_eq!(blocked.methods().kind(), GridKind::Blocked);
}

#[test]
fn traversal_entries_can_be_called_directly() {
    let mut grid = BLOCKED_METHODS.new_with_block_side(4, 4, 1, 2);
    let traversal = BLOCKED_METHODS
        .traversal(Order::BlockMajor)
        .expect("blocked grids support block-major");
    let mut seen = Vec::new();
    traversal(&mut *grid, &mut |col, row, _, _| seen.push((col, row)));
    assert_eq!(&seen[..4], &[(0, 0), (1, 0), (0, 1), (1, 1)]);
}

#[test]
#[should_panic(expected = "contract violation: flat grids do not support block-major traversal")]
fn block_major_on_flat_grid_aborts() {
    let mut grid = FLAT_METHODS.new(3, 2, 4);
    grid.map(Order::BlockMajor, |_, _, _, _| {});
}

#[test]
#[should_panic(expected = "contract violation: cell (3, 0) out of bounds")]
fn flat_3x2_rejects_col_3() {
    let mut grid = FLAT_METHODS.new(3, 2, 4);
    grid.at(3, 0);
}

#[test]
#[should_panic(expected = "contract violation: cell (0, 2) out of bounds")]
fn flat_3x2_rejects_row_2() {
    let mut grid = FLAT_METHODS.new(3, 2, 4);
    grid.at(0, 2);
}

#[test]
#[should_panic(expected = "contract violation: height must be positive")]
fn table_construction_rejects_zero_height() {
    BLOCKED_METHODS.new_with_block_side(3, 0, 4, 2);
}
