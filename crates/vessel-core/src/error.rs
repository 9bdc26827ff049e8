//! Allocation error types.
//!
//! Only the fallible `try_*` entry points report these. The infallible
//! entry points follow the standard-library convention and abort through
//! `std::alloc::handle_alloc_error` (or panic on capacity overflow).

use std::error::Error;
use std::fmt;

/// Errors that can occur while acquiring raw storage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AllocError {
    /// The requested capacity does not fit in a valid memory layout
    /// (`capacity * size_of::<T>()` overflows or exceeds `isize::MAX`).
    CapacityOverflow {
        /// Number of element slots requested.
        capacity: usize,
    },
    /// The global allocator returned null for a well-formed layout.
    AllocFailed {
        /// Size of the rejected block in bytes.
        bytes: usize,
        /// Alignment of the rejected block in bytes.
        align: usize,
    },
}

impl fmt::Display for AllocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityOverflow { capacity } => {
                write!(f, "capacity overflow: {capacity} slots exceed the address space")
            }
            Self::AllocFailed { bytes, align } => {
                write!(
                    f,
                    "allocation failed: {bytes} bytes with alignment {align}"
                )
            }
        }
    }
}

impl Error for AllocError {}
