//! Vessel: a growable, contiguous array built directly on raw memory.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Vessel sub-crates. For most users, adding `vessel` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use vessel::prelude::*;
//!
//! let mut v: Vector<&str> = Vector::with_capacity(2);
//! v.push_back("A");
//! v.push_back("B");
//!
//! v.push_back("C");
//! assert_eq!(v.capacity(), 4);
//!
//! let at = v.insert(1, "X");
//! assert_eq!(v, ["A", "X", "B", "C"]);
//!
//! v.erase(at - 1);
//! assert_eq!(v, ["X", "B", "C"]);
//!
//! let mut copy = vector!["stale"; 8];
//! copy.clone_from(&v);
//! assert_eq!(copy, v);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `vessel-core` | `AllocError`, `GrowthPolicy` |
//! | [`raw`] | `vessel-raw` | `RawStorage`, the uninitialised block owner |
//! | [`vec`] | `vessel-vec` | `Vector`, `IntoIter`, the `vector!` macro |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Error taxonomy and growth policy (`vessel-core`).
pub use vessel_core as types;

/// Uninitialised fixed-capacity storage (`vessel-raw`).
pub use vessel_raw as raw;

/// The dynamic array (`vessel-vec`).
pub use vessel_vec as vec;

pub use vessel_core::{AllocError, GrowthPolicy};
pub use vessel_raw::RawStorage;
pub use vessel_vec::{vector, IntoIter, Vector};

/// Common imports for Vessel users.
///
/// ```rust
/// use vessel::prelude::*;
/// ```
pub mod prelude {
    pub use vessel_core::AllocError;
    pub use vessel_vec::{vector, Vector};
}
