//! Error types shared across the stack

use crate::buffer::BufferError;
use crate::pool::PoolError;
use crate::traits::DisplayError;

/// Errors returned by stack, layer and subsystem operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GfxError {
    /// Display provider has not reported ready
    NotReady,
    /// Subsystem used before its init call
    NotInitialized,
    /// Provider geometry is inconsistent or too large
    Geometry,
    /// Coordinate, size or range outside what the target allows
    OutOfBounds,
    /// Raw colour value is neither black nor white
    InvalidColour,
    /// Raw layer priority is outside `0..LAYER_COUNT`
    InvalidPriority,
    /// Layer slot already registered
    LayerOccupied,
    /// Stale, released or foreign handle
    InvalidHandle,
    /// No free slot left in a fixed pool
    Exhausted,
    /// Buffer primitive failure
    Buffer(BufferError),
    /// Display provider failure
    Display(DisplayError),
}

impl From<BufferError> for GfxError {
    fn from(err: BufferError) -> Self {
        Self::Buffer(err)
    }
}

impl From<DisplayError> for GfxError {
    fn from(err: DisplayError) -> Self {
        match err {
            DisplayError::NotReady => Self::NotReady,
            other => Self::Display(other),
        }
    }
}

impl From<PoolError> for GfxError {
    fn from(err: PoolError) -> Self {
        match err {
            PoolError::Exhausted => Self::Exhausted,
            PoolError::InvalidHandle => Self::InvalidHandle,
        }
    }
}

/// Convenience alias used throughout the crate
pub type Result<T> = core::result::Result<T, GfxError>;
