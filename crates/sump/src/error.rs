//! Arena-specific error types.

use std::error::Error;
use std::fmt;

/// Errors that can occur during arena allocation.
///
/// The fallible allocation paths return these directly; the panicking
/// paths panic with the corresponding [`Display`](fmt::Display) message,
/// so both report identical context.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArenaError {
    /// Requested alignment is not a power of two (zero included).
    InvalidAlignment {
        /// The rejected alignment value.
        alignment: usize,
    },
    /// The request does not fit in the arena's free region.
    ///
    /// Alignment padding counts against the free region, so a request can
    /// fail even when `requested` alone would fit.
    OutOfCapacity {
        /// Number of bytes requested, before alignment padding.
        requested: usize,
        /// Free bytes remaining at the time of the request.
        remaining: usize,
    },
}

impl fmt::Display for ArenaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidAlignment { alignment } => {
                write!(f, "invalid alignment {alignment}: must be a power of two")
            }
            Self::OutOfCapacity {
                requested,
                remaining,
            } => {
                write!(
                    f,
                    "arena capacity exceeded: requested {requested} bytes, {remaining} bytes remaining"
                )
            }
        }
    }
}

impl Error for ArenaError {}
