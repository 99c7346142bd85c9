//! Block sizing configuration.

/// Per-block memory budget used to derive a block side automatically.
///
/// A block of side `s` holding elements of `e` bytes occupies `s * s * e`
/// bytes. The derived side is the largest `s` whose footprint fits the
/// budget: `max(1, floor(sqrt(bytes / e)))`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockBudget {
    /// Target footprint of one block, in bytes.
    pub bytes: usize,
}

impl BlockBudget {
    /// Default budget: 64 KiB per block.
    pub const DEFAULT_BYTES: usize = 64 * 1024;

    /// A budget of `bytes` per block.
    pub const fn new(bytes: usize) -> Self {
        Self { bytes }
    }

    /// Block side for elements of `elem_size` bytes.
    ///
    /// Never returns zero: an element larger than the whole budget still
    /// gets one-cell blocks.
    ///
    /// # Panics
    ///
    /// Panics if `elem_size` is zero.
    pub fn block_side(&self, elem_size: usize) -> usize {
        assert!(elem_size > 0, "element size must be positive");
        (self.bytes / elem_size).isqrt().max(1)
    }

    /// Bytes one block occupies at the derived side.
    pub fn block_bytes(&self, elem_size: usize) -> usize {
        let side = self.block_side(elem_size);
        side * side * elem_size
    }
}

impl Default for BlockBudget {
    fn default() -> Self {
        Self::new(Self::DEFAULT_BYTES)
    }
}
