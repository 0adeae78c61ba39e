//! Error types for sequence and cursor operations.
//!
//! Lookups of absent keys are not errors: they produce `None` or a past-rear
//! cursor. Errors are reserved for allocation failures, which leave the tree
//! exactly as it was, and for reading through a cursor that is not on an
//! element.

use alloc::collections::TryReserveError;

use thiserror::Error;

use crate::Position;

/// Errors returned by fallible [`AvlSequence`](crate::AvlSequence) and cursor operations.
#[derive(Error, Clone, Debug, Eq, PartialEq)]
pub enum Error {
    /// Memory for a new node could not be reserved.
    #[error("failed to allocate a tree node")]
    AllocationFailure(#[from] TryReserveError),

    /// The sequence already holds as many nodes as it can address.
    #[error("sequence is full ({max} nodes)")]
    CapacityExceeded {
        /// The maximum number of nodes.
        max: usize,
    },

    /// The cursor is before the first or past the rear element.
    ///
    /// Reported instead of a sentinel key, so every key (including `-1`) is
    /// unambiguous.
    #[error("cursor is not dereferencable: it is {0}")]
    NotDereferencable(Position),
}

/// A `Result` alias using this crate's [`Error`].
pub type Result<T> = core::result::Result<T, Error>;
