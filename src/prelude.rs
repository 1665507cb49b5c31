//! Commonly used types and utilities for ease of import.

pub use crate::engine::{
    validate, Board, BoardError, Match, MatchError, Orientation, Phase, PlayerSlot, Ship,
    ShipCounts, ShipId, ShotOutcome, ShotReport,
};

#[cfg(feature = "std")]
pub use crate::{cli::HotSeat, init_logging};
