//! Error types for Yale storage operations

use thiserror::Error;

/// Result type alias using the crate's [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while operating on Yale storage
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// An insertion would grow the buffers past the largest size the shape
    /// admits (`rows * cols + 1`). The descriptor is left unchanged.
    #[error("insertion would exceed maximum yale storage size of {max_capacity} elements")]
    CapacityExceeded {
        /// The capacity ceiling that would have been crossed
        max_capacity: usize,
    },

    /// The allocator could not provide replacement buffers for a resize.
    /// The descriptor is left unchanged; no partially-resized state escapes.
    #[error("failed to allocate storage buffers of {capacity} elements")]
    AllocationFailed {
        /// The capacity that was requested
        capacity: usize,
    },

    /// Yale storage only represents two-dimensional matrices.
    #[error("yale storage requires rank-2 shapes, got rank {rank}")]
    ShapeUnsupported {
        /// The rank that was requested
        rank: usize,
    },

    /// An internal protocol was invoked outside its contract, e.g. an
    /// insertion position inside the row-pointer region.
    #[error("precondition violated: {0}")]
    PreconditionViolated(&'static str),

    /// The requested surface exists in the API but has no implementation.
    #[error("{0} is not implemented for yale storage")]
    Unimplemented(&'static str),
}
