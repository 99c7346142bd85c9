//! Image-style transforms over any grid layout.
//!
//! Each transform copies every cell of a source grid to its destination
//! coordinate in a freshly built grid. The copy is driven by one of the
//! source's traversals, so the caller picks the access pattern (and with it
//! the locality) independently of the transform. Cells are copied as opaque
//! bytes.

use blockgrid_core::Order;
use blockgrid_grid::{Grid, GridMethods};
use log::debug;

/// A rearrangement of a grid's cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Transform {
    /// No change; produces a copy.
    Identity,
    /// Quarter turn clockwise. Swaps width and height.
    Rotate90,
    /// Half turn.
    Rotate180,
    /// Quarter turn counter-clockwise. Swaps width and height.
    Rotate270,
    /// Mirror left to right.
    FlipHorizontal,
    /// Mirror top to bottom.
    FlipVertical,
    /// Mirror across the main diagonal. Swaps width and height.
    Transpose,
}

impl Transform {
    /// The clockwise rotation by `degrees`, if it is a multiple of 90 below
    /// 360.
    pub fn rotation(degrees: u32) -> Option<Self> {
        match degrees {
            0 => Some(Self::Identity),
            90 => Some(Self::Rotate90),
            180 => Some(Self::Rotate180),
            270 => Some(Self::Rotate270),
            _ => None,
        }
    }

    /// Whether the output has width and height swapped.
    pub fn swaps_axes(self) -> bool {
        matches!(self, Self::Rotate90 | Self::Rotate270 | Self::Transpose)
    }

    /// Output `(width, height)` for an input of `width x height`.
    pub fn output_dims(self, width: usize, height: usize) -> (usize, usize) {
        if self.swaps_axes() {
            (height, width)
        } else {
            (width, height)
        }
    }

    /// Where source cell `(col, row)` lands in the output.
    pub fn destination(self, col: usize, row: usize, width: usize, height: usize) -> (usize, usize) {
        match self {
            Self::Identity => (col, row),
            Self::Rotate90 => (height - row - 1, col),
            Self::Rotate180 => (width - col - 1, height - row - 1),
            Self::Rotate270 => (row, width - col - 1),
            Self::FlipHorizontal => (width - col - 1, row),
            Self::FlipVertical => (col, height - row - 1),
            Self::Transpose => (row, col),
        }
    }
}

/// Build the transformed copy of `source`.
///
/// The output is constructed through `target` with the source's element
/// size (and block side, when both layouts have blocks), then filled by
/// traversing `source` in `order`.
///
/// # Panics
///
/// Panics with a contract violation if `source` does not support `order`.
#[track_caller]
pub fn apply(
    source: &mut dyn Grid,
    transform: Transform,
    target: &'static GridMethods,
    order: Order,
) -> Box<dyn Grid> {
    let shape = source.shape();
    let (width, height) = transform.output_dims(shape.width, shape.height);
    let mut output = match shape.block_side {
        Some(side) => target.new_with_block_side(width, height, shape.elem_size, side),
        None => target.new(width, height, shape.elem_size),
    };
    debug!(
        "{transform:?}: {}x{} {} -> {width}x{height} {} via {order}",
        shape.width,
        shape.height,
        source.methods().kind(),
        target.kind()
    );
    source.map(order, |col, row, shape, elem| {
        let (c, r) = transform.destination(col, row, shape.width, shape.height);
        output.at(c, r).copy_from_slice(elem);
    });
    output
}

/// Transform `source` into a grid of the same layout and release the
/// source.
#[track_caller]
pub fn apply_owned(mut source: Box<dyn Grid>, transform: Transform, order: Order) -> Box<dyn Grid> {
    let methods = source.methods();
    let output = apply(&mut *source, transform, methods, order);
    methods.destroy(source);
    output
}
