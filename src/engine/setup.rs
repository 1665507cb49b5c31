//! Match setup validation: grid bounds and fleet feasibility.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

use super::config::{MAX_GRID_SIZE, MIN_AREA_RATIO, MIN_GRID_SIZE};
use super::ship::ShipCounts;

/// One failed setup rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum SetupError {
    /// Grid edge outside `MIN_GRID_SIZE..=MAX_GRID_SIZE`.
    GridSizeOutOfRange { size: usize },
    /// The fleet has no ships.
    NoShips,
    /// The grid offers less than `MIN_AREA_RATIO` cells per ship cell.
    FleetTooLarge { grid_area: usize, ship_area: usize },
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetupError::GridSizeOutOfRange { .. } => write!(
                f,
                "Grid size must be between {} and {}.",
                MIN_GRID_SIZE, MAX_GRID_SIZE
            ),
            SetupError::NoShips => write!(f, "You must add at least one ship."),
            SetupError::FleetTooLarge { .. } => write!(
                f,
                "Too many ships for this grid. Grid area must be at least {} × ship area.",
                MIN_AREA_RATIO
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SetupError {}

/// Outcome of [`validate`]: every failed rule plus the computed areas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupValidation {
    pub errors: Vec<SetupError>,
    pub grid_area: usize,
    pub ship_area: usize,
}

impl SetupValidation {
    /// `true` when no rule failed.
    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Human-readable messages, one per failed rule.
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(|e| e.to_string()).collect()
    }
}

pub fn grid_area(grid_size: usize) -> usize {
    grid_size.saturating_mul(grid_size)
}

/// Sum of `count × length` over the catalog.
pub fn ship_area(counts: &ShipCounts) -> usize {
    counts.iter().fold(0usize, |acc, (kind, count)| {
        acc.saturating_add(count.saturating_mul(kind.length()))
    })
}

/// Check a prospective match setup. Rules are checked independently, so a
/// single call reports every problem at once.
pub fn validate(grid_size: usize, counts: &ShipCounts) -> SetupValidation {
    let grid_area = grid_area(grid_size);
    let ship_area = ship_area(counts);
    let mut errors = Vec::new();

    if !(MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&grid_size) {
        errors.push(SetupError::GridSizeOutOfRange { size: grid_size });
    }
    if ship_area == 0 {
        errors.push(SetupError::NoShips);
    }
    if grid_area < ship_area.saturating_mul(MIN_AREA_RATIO) {
        errors.push(SetupError::FleetTooLarge {
            grid_area,
            ship_area,
        });
    }

    log::debug!(
        "setup {}x{}: grid area {}, ship area {}, {} error(s)",
        grid_size,
        grid_size,
        grid_area,
        ship_area,
        errors.len()
    );
    SetupValidation {
        errors,
        grid_area,
        ship_area,
    }
}
