//! Fixed-capacity, fixed-stride element storage.
//!
//! A [`CellStore`] owns a single zero-initialised `Vec<u8>` of
//! `capacity * elem_size` bytes. Element `i` occupies bytes
//! `[i * elem_size, (i + 1) * elem_size)`. The store knows nothing about the
//! layout of an element; callers copy their records in and out.

use std::fmt;
use std::marker::PhantomData;

use blockgrid_core::contract;
use blockgrid_core::GridError;
use log::trace;

use crate::ledger;

/// A flat, type-erased sequence of `capacity` elements of `elem_size` bytes.
///
/// Storage is acquired in full at construction and released in full on
/// drop. Indexed access is O(1) and never allocates.
///
/// A store is bound to the thread that created it: the allocation
/// [`ledger`](crate::ledger) is per thread, so a store must be released
/// where it was registered.
///
/// ```compile_fail
/// fn assert_send<T: Send>() {}
/// assert_send::<blockgrid_store::CellStore>();
/// ```
///
/// ```compile_fail
/// let store = blockgrid_store::CellStore::new(4, 4);
/// std::thread::spawn(move || drop(store));
/// ```
pub struct CellStore {
    /// Backing storage. Allocated to full size at creation.
    data: Vec<u8>,
    capacity: usize,
    elem_size: usize,
    /// Keeps the store on its ledger's thread.
    _thread_bound: PhantomData<*const ()>,
}

impl CellStore {
    /// Create a zeroed store of `capacity` elements of `elem_size` bytes.
    ///
    /// Fails if either argument is zero or the byte length overflows
    /// `usize`.
    pub fn try_new(capacity: usize, elem_size: usize) -> Result<Self, GridError> {
        if capacity == 0 {
            return Err(GridError::ZeroDimension { name: "capacity" });
        }
        if elem_size == 0 {
            return Err(GridError::ZeroElemSize);
        }
        let bytes = capacity
            .checked_mul(elem_size)
            .filter(|&bytes| bytes <= isize::MAX as usize)
            .ok_or(GridError::SizeOverflow {
                elements: capacity,
                elem_size,
            })?;
        ledger::record_alloc(bytes);
        trace!("cell store: {capacity} x {elem_size} B ({bytes} B)");
        Ok(Self {
            data: vec![0; bytes],
            capacity,
            elem_size,
            _thread_bound: PhantomData,
        })
    }

    /// Create a zeroed store, treating invalid arguments as a contract
    /// violation.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` or `elem_size` is zero.
    #[track_caller]
    pub fn new(capacity: usize, elem_size: usize) -> Self {
        contract::require(Self::try_new(capacity, elem_size))
    }

    /// Number of element slots.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Size of one element in bytes.
    pub fn elem_size(&self) -> usize {
        self.elem_size
    }

    /// Size of the backing buffer in bytes.
    pub fn memory_bytes(&self) -> usize {
        self.data.len()
    }

    fn span(&self, index: usize) -> std::ops::Range<usize> {
        let start = index * self.elem_size;
        start..start + self.elem_size
    }

    /// Element `index`, or `None` if `index >= capacity`.
    pub fn get(&self, index: usize) -> Option<&[u8]> {
        if index >= self.capacity {
            return None;
        }
        let span = self.span(index);
        Some(&self.data[span])
    }

    /// Mutable element `index`, or `None` if `index >= capacity`.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut [u8]> {
        if index >= self.capacity {
            return None;
        }
        let span = self.span(index);
        Some(&mut self.data[span])
    }

    /// Mutable element `index`.
    ///
    /// # Panics
    ///
    /// Panics with a contract violation if `index >= capacity`.
    #[track_caller]
    pub fn at(&mut self, index: usize) -> &mut [u8] {
        let capacity = self.capacity;
        match self.get_mut(index) {
            Some(elem) => elem,
            None => contract::violated(GridError::IndexOutOfRange { index, capacity }),
        }
    }

    /// Shared element `index`.
    ///
    /// # Panics
    ///
    /// Panics with a contract violation if `index >= capacity`.
    #[track_caller]
    pub fn at_ref(&self, index: usize) -> &[u8] {
        match self.get(index) {
            Some(elem) => elem,
            None => contract::violated(GridError::IndexOutOfRange {
                index,
                capacity: self.capacity,
            }),
        }
    }

    /// The whole buffer, element 0 first.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Copy `value` into every slot.
    ///
    /// # Panics
    ///
    /// Panics with a contract violation if `value.len() != elem_size`.
    #[track_caller]
    pub fn fill(&mut self, value: &[u8]) {
        if value.len() != self.elem_size {
            contract::violated(GridError::ElemSizeMismatch {
                expected: self.elem_size,
                actual: value.len(),
            });
        }
        for chunk in self.data.chunks_exact_mut(self.elem_size) {
            chunk.copy_from_slice(value);
        }
    }
}

impl Drop for CellStore {
    fn drop(&mut self) {
        ledger::record_free(self.data.len());
    }
}

impl fmt::Debug for CellStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CellStore")
            .field("capacity", &self.capacity)
            .field("elem_size", &self.elem_size)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn new_store_is_zeroed() {
        let store = CellStore::new(16, 3);
        assert_eq!(store.capacity(), 16);
        assert_eq!(store.elem_size(), 3);
        assert_eq!(store.memory_bytes(), 48);
        assert!(store.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn elements_do_not_overlap() {
        let mut store = CellStore::new(4, 2);
        store.at(1).copy_from_slice(&[0xAA, 0xBB]);
        assert_eq!(store.at_ref(0), &[0, 0]);
        assert_eq!(store.at_ref(1), &[0xAA, 0xBB]);
        assert_eq!(store.at_ref(2), &[0, 0]);
        assert_eq!(store.as_bytes(), &[0, 0, 0xAA, 0xBB, 0, 0, 0, 0]);
    }

    #[test]
    fn get_past_end_is_none() {
        let mut store = CellStore::new(4, 8);
        assert!(store.get(3).is_some());
        assert!(store.get(4).is_none());
        assert!(store.get_mut(4).is_none());
    }

    #[test]
    fn try_new_rejects_zero_arguments() {
        assert_eq!(
            CellStore::try_new(0, 4).unwrap_err(),
            GridError::ZeroDimension { name: "capacity" }
        );
        assert_eq!(CellStore::try_new(4, 0).unwrap_err(), GridError::ZeroElemSize);
    }

    #[test]
    fn try_new_rejects_overflow() {
        let err = CellStore::try_new(usize::MAX, 2).unwrap_err();
        assert!(matches!(err, GridError::SizeOverflow { .. }));
    }

    #[test]
    fn try_new_rejects_buffers_past_isize_max() {
        let before = ledger::snapshot();
        let err = CellStore::try_new(isize::MAX as usize / 2 + 1, 2).unwrap_err();
        assert!(matches!(err, GridError::SizeOverflow { .. }));
        assert_eq!(ledger::snapshot(), before);
    }

    #[test]
    #[should_panic(expected = "contract violation: index 4 out of range: [0, 4)")]
    fn at_past_end_panics() {
        let mut store = CellStore::new(4, 1);
        store.at(4);
    }

    #[test]
    #[should_panic(expected = "contract violation: element size must be positive")]
    fn new_with_zero_elem_size_panics() {
        CellStore::new(4, 0);
    }

    #[test]
    fn fill_writes_every_slot() {
        let mut store = CellStore::new(5, 3);
        store.fill(&[1, 2, 3]);
        for i in 0..5 {
            assert_eq!(store.at_ref(i), &[1, 2, 3]);
        }
    }

    #[test]
    #[should_panic(expected = "element is 3 bytes, got 2")]
    fn fill_with_wrong_width_panics() {
        CellStore::new(5, 3).fill(&[1, 2]);
    }

    #[test]
    fn ledger_tracks_lifetime() {
        let before = ledger::snapshot();
        let store = CellStore::new(10, 4);
        assert_eq!(ledger::live_stores(), before.stores + 1);
        assert_eq!(ledger::live_bytes(), before.bytes + 40);
        drop(store);
        assert_eq!(ledger::snapshot(), before);
    }

    #[test]
    fn failed_construction_records_nothing() {
        let before = ledger::snapshot();
        assert!(CellStore::try_new(0, 4).is_err());
        assert_eq!(ledger::snapshot(), before);
    }

    proptest! {
        #[test]
        fn write_then_read_returns_same_bytes(
            capacity in 1usize..64,
            elem_size in 1usize..16,
            index in 0usize..64,
            seed in any::<u8>(),
        ) {
            let index = index % capacity;
            let mut store = CellStore::new(capacity, elem_size);
            let value: Vec<u8> = (0..elem_size).map(|i| seed.wrapping_add(i as u8)).collect();
            store.at(index).copy_from_slice(&value);
            prop_assert_eq!(store.at_ref(index), value.as_slice());
        }
    }
}
