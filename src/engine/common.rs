//! Common types for the engine: coordinates, board errors and shot outcomes.

use core::fmt;

use super::ship::ShipId;

/// A `(row, col)` position on a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Result of resolving a shot that landed inside the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct ShotOutcome {
    /// The cell had been shot before; nothing changed.
    pub already_shot: bool,
    pub hit: bool,
    /// This shot brought the ship's hits up to its length.
    pub sunk: bool,
    /// Ship occupying the cell, if any.
    pub ship_id: Option<ShipId>,
}

impl ShotOutcome {
    pub(crate) const fn miss() -> Self {
        Self {
            already_shot: false,
            hit: false,
            sunk: false,
            ship_id: None,
        }
    }
}

/// Errors returned by Board operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum BoardError {
    /// Placement or shot falls outside the grid.
    OutOfBounds,
    /// Ship placement overlaps another ship.
    Overlap,
    /// The ship is already registered on this board.
    ShipAlreadyPlaced,
    /// Random placement found no free spot.
    UnableToPlaceShip,
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::OutOfBounds => write!(f, "Position is out of bounds"),
            BoardError::Overlap => write!(f, "Ship placement overlaps with another ship"),
            BoardError::ShipAlreadyPlaced => write!(f, "Ship is already placed on the board"),
            BoardError::UnableToPlaceShip => write!(f, "Unable to place ship"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BoardError {}
