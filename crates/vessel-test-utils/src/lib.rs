//! Instrumented element types for Vessel development.
//!
//! Container tests need to observe element lifecycles that Rust otherwise
//! hides: how many values were constructed, cloned, clone-assigned and
//! dropped, and what happens when a clone fails partway through a bulk
//! copy. [`Tracked`] reports every lifecycle event to a shared [`Ledger`],
//! which can also be armed to panic on the Nth clone.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod ledger;

pub use ledger::{is_injected_clone_failure, Ledger, Tracked, INJECTED_CLONE_FAILURE};
