//! Uninitialised, fixed-capacity element storage.
//!
//! [`RawStorage`] owns a heap block sized for a given number of `T` slots
//! without constructing any of them. It knows nothing about which slots
//! are live; the owner (see `vessel-vec`) constructs and destroys values
//! at specific offsets and must have destroyed every live value before the
//! storage is dropped. This crate is one of two that may contain `unsafe`
//! code (along with `vessel-vec`).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod storage;

pub use storage::RawStorage;
