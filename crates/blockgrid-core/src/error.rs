//! The contract-violation taxonomy.
//!
//! Every variant names a precondition the caller failed to satisfy. None of
//! them is an I/O or transient failure; there is nothing to retry.

use crate::id::GridKind;
use crate::order::Order;
use std::error::Error;
use std::fmt;

/// A violated precondition of a grid or store operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GridError {
    /// A width, height, or capacity of zero.
    ZeroDimension {
        /// Which dimension was zero (`"width"`, `"height"`, `"capacity"`).
        name: &'static str,
    },
    /// An element size of zero bytes.
    ZeroElemSize,
    /// A block side of zero.
    ZeroBlockSide,
    /// The requested geometry does not fit in the address space.
    SizeOverflow {
        /// Number of elements requested.
        elements: usize,
        /// Size of each element in bytes.
        elem_size: usize,
    },
    /// A cell coordinate outside `[0, width) x [0, height)`.
    OutOfBounds {
        /// Requested column.
        col: usize,
        /// Requested row.
        row: usize,
        /// Grid width.
        width: usize,
        /// Grid height.
        height: usize,
    },
    /// A flat store index outside `[0, capacity)`.
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Store capacity.
        capacity: usize,
    },
    /// A byte slice whose length differs from the element size.
    ElemSizeMismatch {
        /// The grid's element size.
        expected: usize,
        /// Length of the slice supplied.
        actual: usize,
    },
    /// A traversal order absent from the grid kind's capability table.
    UnsupportedOrder {
        /// The grid kind queried.
        kind: GridKind,
        /// The order requested.
        order: Order,
    },
    /// A grid dispatched through a capability table of another kind.
    KindMismatch {
        /// Kind of the table invoked.
        table: GridKind,
        /// Kind of the grid passed in.
        grid: GridKind,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroDimension { name } => write!(f, "{name} must be positive"),
            Self::ZeroElemSize => write!(f, "element size must be positive"),
            Self::ZeroBlockSide => write!(f, "block side must be positive"),
            Self::SizeOverflow {
                elements,
                elem_size,
            } => {
                write!(
                    f,
                    "{elements} elements of {elem_size} bytes overflow the address space"
                )
            }
            Self::OutOfBounds {
                col,
                row,
                width,
                height,
            } => {
                write!(
                    f,
                    "cell ({col}, {row}) out of bounds: [0, {width}) x [0, {height})"
                )
            }
            Self::IndexOutOfRange { index, capacity } => {
                write!(f, "index {index} out of range: [0, {capacity})")
            }
            Self::ElemSizeMismatch { expected, actual } => {
                write!(f, "element is {expected} bytes, got {actual}")
            }
            Self::UnsupportedOrder { kind, order } => {
                write!(f, "{kind} grids do not support {order} traversal")
            }
            Self::KindMismatch { table, grid } => {
                write!(f, "{grid} grid passed to the {table} capability table")
            }
        }
    }
}

impl Error for GridError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_message_names_cell_and_range() {
        let err = GridError::OutOfBounds {
            col: 3,
            row: 0,
            width: 3,
            height: 2,
        };
        assert_eq!(err.to_string(), "cell (3, 0) out of bounds: [0, 3) x [0, 2)");
    }

    #[test]
    fn unsupported_order_message() {
        let err = GridError::UnsupportedOrder {
            kind: GridKind::Flat,
            order: Order::BlockMajor,
        };
        assert_eq!(
            err.to_string(),
            "flat grids do not support block-major traversal"
        );
    }

    #[test]
    fn zero_dimension_message() {
        let err = GridError::ZeroDimension { name: "height" };
        assert_eq!(err.to_string(), "height must be positive");
    }
}
