//! Type-erased cell storage for blockgrid.
//!
//! A [`CellStore`] is the leaf of every grid's ownership tree: one owned,
//! zero-initialised byte buffer carved into `capacity` elements of
//! `elem_size` bytes each. Grids never share a store.
//!
//! ```text
//! FlatGrid  ── CellStore (width * height slots)
//! BlockedGrid
//! └── block index (block_cols * block_rows)
//!     └── CellStore × n (block_side² slots each, boundary blocks included)
//! ```
//!
//! The crate also owns the [`BlockBudget`] used to derive a block side from
//! a per-block memory budget, and a thread-local allocation [`ledger`] used
//! to check that teardown releases everything construction acquired.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod ledger;
pub mod store;

pub use config::BlockBudget;
pub use store::CellStore;
