//! Core types for the blockgrid workspace.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! vocabulary shared by storage, grid backends, and clients: traversal
//! orders and the [`OrderSet`] capability bitset, grid identifiers, and the
//! [`GridError`] taxonomy of contract violations.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod contract;
pub mod error;
pub mod id;
pub mod order;

pub use error::GridError;
pub use id::{GridInstanceId, GridKind};
pub use order::{Order, OrderSet, OrderSetIter};
