//! Error types for the placement core.

use thiserror::Error;

use crate::element::OccupantId;
use crate::grid::GridCoordinate;
use crate::math::Vec2Fixed;

/// Result type alias using [`GridError`].
pub type Result<T> = std::result::Result<T, GridError>;

/// Top-level error type for all placement errors.
///
/// Placement failures (`CellOccupied`, `OutOfBounds`) are ordinary
/// recoverable outcomes handled by the drag controller; configuration
/// errors are surfaced at grid construction time, never at query time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// A target cell was at capacity during the pre-flight check.
    #[error("cell {coord:?} is at capacity")]
    CellOccupied {
        /// The first footprint cell that failed the check.
        coord: GridCoordinate,
    },

    /// A candidate position lies outside the playable bounds.
    #[error("position {position:?} is outside the playable bounds")]
    OutOfBounds {
        /// The offending world position.
        position: Vec2Fixed,
    },

    /// The occupant already has a live registration.
    #[error("occupant {occupant:?} is already registered")]
    AlreadyRegistered {
        /// The occupant with an existing reverse-index entry.
        occupant: OccupantId,
    },

    /// Grid configured with a zero or negative cell size.
    #[error("cell size must be positive")]
    InvalidCellSize,

    /// Grid bounds are inverted or degenerate.
    #[error("bounds must satisfy left < right and bottom < top")]
    InvalidBounds,
}
