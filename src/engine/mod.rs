//! Core battleship game engine (no_std compatible)
//!
//! Pure game-state logic: ship catalog, setup validation, boards and the
//! match controller. Needs only `alloc`, `log` and `rand`, so it can be
//! driven by any front end.

pub mod board;
pub mod common;
pub mod config;
pub mod game;
pub mod setup;
pub mod ship;

// Re-export commonly used types
pub use board::{Board, Cell};
pub use common::{BoardError, Coord, ShotOutcome};
pub use config::*;
pub use game::{
    Match, MatchError, MatchState, Phase, Player, PlayerSlot, ShotReport, MSG_ALREADY_SHOT,
    MSG_HIT, MSG_INVALID_PLACEMENT, MSG_MISS, MSG_PLACE_ALL, MSG_SUNK,
};
pub use setup::{grid_area, ship_area, validate, SetupError, SetupValidation};
pub use ship::{instantiate_fleet, Fleet, Orientation, Ship, ShipCounts, ShipId, ShipKind};
