//! Ship kinds, ship instances and fleet construction.

use alloc::vec::Vec;
use core::fmt;

use super::common::Coord;
use super::config::{kind_index, NUM_SHIP_KINDS, SHIP_KINDS};

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Column increases along the ship.
    #[default]
    Horizontal,
    /// Row increases along the ship.
    Vertical,
}

impl Orientation {
    /// The other axis.
    pub fn rotated(self) -> Self {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }

    /// Coordinate of the `i`-th segment of a ship starting at (`row`, `col`).
    /// `None` when the arithmetic overflows.
    pub(crate) fn step(self, row: usize, col: usize, i: usize) -> Option<Coord> {
        match self {
            Orientation::Horizontal => col.checked_add(i).map(|c| Coord::new(row, c)),
            Orientation::Vertical => row.checked_add(i).map(|r| Coord::new(r, col)),
        }
    }
}

/// Catalog entry: key, display name and length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShipKind {
    key: &'static str,
    name: &'static str,
    length: usize,
}

impl ShipKind {
    /// Create a new ship kind.
    pub const fn new(key: &'static str, name: &'static str, length: usize) -> Self {
        Self { key, name, length }
    }

    /// Unique catalog key, e.g. `"carrier"`.
    pub fn key(&self) -> &'static str {
        self.key
    }

    /// Display name, e.g. `"Carrier"`.
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn length(&self) -> usize {
        self.length
    }
}

// Kinds travel as their catalog key.
#[cfg(feature = "std")]
impl serde::Serialize for ShipKind {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.key)
    }
}

#[cfg(feature = "std")]
impl<'de> serde::Deserialize<'de> for ShipKind {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let key = std::string::String::deserialize(deserializer)?;
        super::config::ship_kind(&key)
            .ok_or_else(|| serde::de::Error::custom(std::format!("unknown ship kind `{}`", key)))
    }
}

/// Identifier of a ship instance, unique within one fleet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct ShipId(pub u32);

impl fmt::Display for ShipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{}", self.0)
    }
}

/// A ship instance belonging to one fleet.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Ship {
    id: ShipId,
    kind: ShipKind,
    orientation: Orientation,
    placed: bool,
    cells: Vec<Coord>,
    hits: usize,
}

impl Ship {
    /// A fresh, unplaced ship of `kind`.
    pub fn new(id: ShipId, kind: ShipKind) -> Self {
        Self {
            id,
            kind,
            orientation: Orientation::Horizontal,
            placed: false,
            cells: Vec::new(),
            hits: 0,
        }
    }

    pub fn id(&self) -> ShipId {
        self.id
    }

    pub fn kind(&self) -> ShipKind {
        self.kind
    }

    /// Display name, always the catalog name of the ship's kind.
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn length(&self) -> usize {
        self.kind.length()
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn is_placed(&self) -> bool {
        self.placed
    }

    /// Occupied coordinates in placement order. Empty until placed.
    pub fn cells(&self) -> &[Coord] {
        &self.cells
    }

    /// Distinct hits received so far.
    pub fn hits(&self) -> usize {
        self.hits
    }

    /// A ship is sunk once every segment has been hit.
    pub fn is_sunk(&self) -> bool {
        self.hits == self.kind.length()
    }

    /// Does the ship occupy (`row`, `col`)?
    pub fn contains(&self, row: usize, col: usize) -> bool {
        self.cells.contains(&Coord::new(row, col))
    }

    pub(crate) fn record_placement(&mut self, orientation: Orientation, cells: Vec<Coord>) {
        self.orientation = orientation;
        self.cells = cells;
        self.placed = true;
        self.hits = 0;
    }

    /// Count one more hit. Returns `true` exactly when this hit sinks the ship.
    pub(crate) fn register_hit(&mut self) -> bool {
        if self.hits >= self.kind.length() {
            return false;
        }
        self.hits += 1;
        self.is_sunk()
    }
}

/// Ordered ships of one player.
pub type Fleet = Vec<Ship>;

/// Requested number of ships per catalog kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct ShipCounts {
    counts: [usize; NUM_SHIP_KINDS],
}

impl ShipCounts {
    /// No ships at all.
    pub const fn none() -> Self {
        Self {
            counts: [0; NUM_SHIP_KINDS],
        }
    }

    /// One ship of every kind, the classic fleet.
    pub const fn standard() -> Self {
        Self {
            counts: [1; NUM_SHIP_KINDS],
        }
    }

    /// Builder form of [`ShipCounts::set`]. Unknown keys are ignored.
    pub fn with(mut self, key: &str, count: usize) -> Self {
        self.set(key, count);
        self
    }

    /// Set the count for `key`. Returns `false` if the key is not in the catalog.
    pub fn set(&mut self, key: &str, count: usize) -> bool {
        match kind_index(key) {
            Some(i) => {
                self.counts[i] = count;
                true
            }
            None => false,
        }
    }

    /// Count for `key`; unknown keys count as zero.
    pub fn get(&self, key: &str) -> usize {
        kind_index(key).map_or(0, |i| self.counts[i])
    }

    /// Kinds with their counts, in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (ShipKind, usize)> + '_ {
        SHIP_KINDS.iter().copied().zip(self.counts.iter().copied())
    }

    /// Total number of ships requested.
    pub fn total_ships(&self) -> usize {
        self.counts.iter().fold(0usize, |acc, n| acc.saturating_add(*n))
    }
}

impl<'a> FromIterator<(&'a str, usize)> for ShipCounts {
    fn from_iter<I: IntoIterator<Item = (&'a str, usize)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(ShipCounts::none(), |counts, (key, n)| counts.with(key, n))
    }
}

/// Build a fleet from `counts`.
///
/// Kinds are visited in catalog order and, within a kind, `1..=count`; ids are
/// assigned sequentially from 1, so equal counts always yield equal fleets.
pub fn instantiate_fleet(counts: &ShipCounts) -> Fleet {
    let mut fleet = Vec::new();
    let mut next_id = 1u32;
    for (kind, count) in counts.iter() {
        for _ in 0..count {
            fleet.push(Ship::new(ShipId(next_id), kind));
            next_id += 1;
        }
    }
    fleet
}
