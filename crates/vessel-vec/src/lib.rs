//! A growable, contiguous, random-access array built on raw storage.
//!
//! [`Vector`] owns exactly one [`RawStorage`](vessel_raw::RawStorage) and a
//! live-element count. Slots `[0, len)` hold constructed values; slots
//! `[len, capacity)` are uninitialised. Every operation that needs more
//! room allocates a new block, constructs into it, relocates the live
//! values, and swaps the block in.
//!
//! # Failure behaviour
//!
//! - **Allocation failure** happens before any live value is touched.
//!   The `try_*` entry points report it as [`AllocError`](vessel_core::AllocError).
//! - **Element construction failure** (a panicking constructor closure,
//!   `Clone` or `Default`) happens before any live value is relocated, so
//!   the array is left exactly as it was. The one documented exception is
//!   [`Clone::clone_from`] on its reuse path, which assigns element-wise in
//!   place and may leave a partially assigned prefix.
//! - **Relocation** is always a bitwise move, which cannot fail.
//! - **Contract violations** (out-of-range index or position, `pop_back`
//!   on an empty array) panic.
//!
//! This crate is one of two that may contain `unsafe` code (along with
//! `vessel-raw`).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

mod into_iter;
mod macros;
mod positional;
mod traits;
pub mod vector;

pub use into_iter::IntoIter;
pub use vector::Vector;
