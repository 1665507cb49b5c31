//! Game board: a square grid of cells plus the ships registered on it.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use core::fmt;
use rand::Rng;

use super::common::{BoardError, Coord, ShotOutcome};
use super::ship::{Orientation, Ship, ShipId};

/// Attempts made by [`Board::random_placement`] before giving up.
const RANDOM_PLACEMENT_ATTEMPTS: usize = 100;

/// One grid position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    has_ship: bool,
    ship_id: Option<ShipId>,
    shot: bool,
    hit: bool,
}

impl Cell {
    pub fn has_ship(&self) -> bool {
        self.has_ship
    }

    /// Ship occupying this cell, if any.
    pub fn ship_id(&self) -> Option<ShipId> {
        self.ship_id
    }

    /// Has this cell been fired at? Never reverts to `false`.
    pub fn is_shot(&self) -> bool {
        self.shot
    }

    /// Only meaningful once [`Cell::is_shot`] is `true`.
    pub fn is_hit(&self) -> bool {
        self.hit
    }
}

/// A `size × size` grid with its placed ships.
///
/// `Clone` is a deep copy: tentative placements and shots run on a clone and
/// are only committed once accepted.
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
    ships: BTreeMap<ShipId, Ship>,
}

impl Board {
    /// Create an empty board (no ships, nothing shot).
    pub fn new(size: usize) -> Self {
        Board {
            size,
            cells: alloc::vec![Cell::default(); size.saturating_mul(size)],
            ships: BTreeMap::new(),
        }
    }

    /// Edge length of the grid.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn in_bounds(&self, row: usize, col: usize) -> bool {
        row < self.size && col < self.size
    }

    /// Cell at (`row`, `col`), or `None` outside the grid.
    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        if self.in_bounds(row, col) {
            self.cells.get(row * self.size + col)
        } else {
            None
        }
    }

    fn cell_mut(&mut self, row: usize, col: usize) -> Option<&mut Cell> {
        if self.in_bounds(row, col) {
            self.cells.get_mut(row * self.size + col)
        } else {
            None
        }
    }

    /// Registered ships, ordered by id.
    pub fn ships(&self) -> impl Iterator<Item = &Ship> {
        self.ships.values()
    }

    pub fn ship(&self, id: ShipId) -> Option<&Ship> {
        self.ships.get(&id)
    }

    /// Number of registered ships not yet sunk.
    pub fn ships_remaining(&self) -> usize {
        self.ships.values().filter(|s| !s.is_sunk()).count()
    }

    /// Cells a ship of `length` would cover, or why it cannot go there.
    fn footprint(
        &self,
        length: usize,
        row: usize,
        col: usize,
        orientation: Orientation,
    ) -> Result<Vec<Coord>, BoardError> {
        let mut cells = Vec::with_capacity(length);
        for i in 0..length {
            let coord = orientation
                .step(row, col, i)
                .filter(|c| self.in_bounds(c.row, c.col))
                .ok_or(BoardError::OutOfBounds)?;
            if self.cell(coord.row, coord.col).is_some_and(|c| c.has_ship) {
                return Err(BoardError::Overlap);
            }
            cells.push(coord);
        }
        Ok(cells)
    }

    /// Would `ship` fit at (`row`, `col`) with `orientation`? Ships may touch,
    /// they may not overlap or leave the grid.
    pub fn can_place(&self, ship: &Ship, row: usize, col: usize, orientation: Orientation) -> bool {
        self.footprint(ship.length(), row, col, orientation).is_ok()
    }

    /// Place `ship` and register it. Returns the placed copy of the ship; the
    /// board is untouched on error.
    pub fn place(
        &mut self,
        ship: &Ship,
        row: usize,
        col: usize,
        orientation: Orientation,
    ) -> Result<Ship, BoardError> {
        if self.ships.contains_key(&ship.id()) {
            return Err(BoardError::ShipAlreadyPlaced);
        }
        let cells = self.footprint(ship.length(), row, col, orientation)?;
        for coord in &cells {
            if let Some(cell) = self.cell_mut(coord.row, coord.col) {
                cell.has_ship = true;
                cell.ship_id = Some(ship.id());
            }
        }
        let mut placed = ship.clone();
        placed.record_placement(orientation, cells);
        self.ships.insert(placed.id(), placed.clone());
        log::debug!(
            "placed {} {} at ({}, {}) {:?}",
            placed.id(),
            placed.name(),
            row,
            col,
            orientation
        );
        Ok(placed)
    }

    /// Every legal (row, col, Orientation) for `ship`, row-major, horizontal
    /// before vertical.
    pub fn legal_placements(&self, ship: &Ship) -> Vec<(usize, usize, Orientation)> {
        let first = Orientation::default();
        let mut spots = Vec::new();
        for r in 0..self.size {
            for c in 0..self.size {
                for o in [first, first.rotated()] {
                    if self.can_place(ship, r, c, o) {
                        spots.push((r, c, o));
                    }
                }
            }
        }
        spots
    }

    /// Returns a random legal (row, col, Orientation) for `ship`.
    ///
    /// Samples random spots first and falls back to picking among all legal
    /// spots, so `UnableToPlaceShip` means the ship fits nowhere.
    pub fn random_placement<R: Rng>(
        &self,
        rng: &mut R,
        ship: &Ship,
    ) -> Result<(usize, usize, Orientation), BoardError> {
        let len = ship.length();
        if len == 0 || len > self.size {
            return Err(BoardError::UnableToPlaceShip);
        }
        for _ in 0..RANDOM_PLACEMENT_ATTEMPTS {
            let orient = if rng.random() {
                Orientation::Horizontal
            } else {
                Orientation::Vertical
            };
            let (max_r, max_c) = match orient {
                Orientation::Horizontal => (self.size - 1, self.size - len),
                Orientation::Vertical => (self.size - len, self.size - 1),
            };
            let r = rng.random_range(0..=max_r);
            let c = rng.random_range(0..=max_c);
            if self.can_place(ship, r, c, orient) {
                return Ok((r, c, orient));
            }
        }
        let spots = self.legal_placements(ship);
        if spots.is_empty() {
            return Err(BoardError::UnableToPlaceShip);
        }
        log::debug!("random sampling missed, choosing among {} legal spot(s)", spots.len());
        Ok(spots[rng.random_range(0..spots.len())])
    }

    /// Fire at (`row`, `col`).
    ///
    /// A cell that was already shot reports its stored result with
    /// `already_shot` set and changes nothing, so hits are never counted twice.
    pub fn shoot(&mut self, row: usize, col: usize) -> Result<ShotOutcome, BoardError> {
        let cell = self.cell_mut(row, col).ok_or(BoardError::OutOfBounds)?;

        if cell.shot {
            return Ok(ShotOutcome {
                already_shot: true,
                hit: cell.hit,
                sunk: false,
                ship_id: cell.ship_id,
            });
        }

        cell.shot = true;
        if !cell.has_ship {
            cell.hit = false;
            log::debug!("shot ({}, {}): miss", row, col);
            return Ok(ShotOutcome::miss());
        }

        cell.hit = true;
        let ship_id = cell.ship_id;
        let sunk = ship_id
            .and_then(|id| self.ships.get_mut(&id))
            .is_some_and(|ship| ship.register_hit());
        log::debug!("shot ({}, {}): hit, sunk = {}", row, col, sunk);
        Ok(ShotOutcome {
            already_shot: false,
            hit: true,
            sunk,
            ship_id,
        })
    }

    /// `true` when at least one ship is registered and every one is sunk.
    pub fn all_sunk(&self) -> bool {
        !self.ships.is_empty() && self.ships.values().all(Ship::is_sunk)
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Board {{ size: {}, ships: {} }}", self.size, self.ships.len())?;
        for r in 0..self.size {
            for c in 0..self.size {
                let ch = match self.cell(r, c) {
                    Some(cell) if cell.shot && cell.hit => 'X',
                    Some(cell) if cell.shot => 'o',
                    Some(cell) if cell.has_ship => 'S',
                    _ => '.',
                };
                write!(f, "{}", ch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
