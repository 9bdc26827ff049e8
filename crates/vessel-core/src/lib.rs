//! Core types shared by the Vessel containers.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! allocation error taxonomy and the growth policy used by the raw storage
//! layer and the dynamic array built on top of it.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;

pub use config::GrowthPolicy;
pub use error::AllocError;
