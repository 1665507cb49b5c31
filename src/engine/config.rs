use super::ship::ShipKind;

/// Smallest playable grid edge.
pub const MIN_GRID_SIZE: usize = 5;
/// Largest playable grid edge.
pub const MAX_GRID_SIZE: usize = 10;
pub const DEFAULT_GRID_SIZE: usize = 8;

/// The grid must offer at least this many cells per ship cell.
pub const MIN_AREA_RATIO: usize = 2;

pub const NUM_SHIP_KINDS: usize = 5;

/// Ship catalog. Declaration order is the fleet instantiation order, which
/// makes ship ids reproducible for identical counts.
pub const SHIP_KINDS: [ShipKind; NUM_SHIP_KINDS] = [
    ShipKind::new("carrier", "Carrier", 5),
    ShipKind::new("battleship", "Battleship", 4),
    ShipKind::new("cruiser", "Cruiser", 3),
    ShipKind::new("submarine", "Submarine", 3),
    ShipKind::new("destroyer", "Destroyer", 2),
];

/// Names used when a player leaves the name blank.
pub const DEFAULT_PLAYER_NAMES: [&str; 2] = ["Player 1", "Player 2"];

/// Fixed, ordered catalog of ship kinds.
pub fn list_kinds() -> &'static [ShipKind] {
    &SHIP_KINDS
}

/// Look up a catalog entry by its key. Returns `None` for unknown keys.
pub fn ship_kind(key: &str) -> Option<ShipKind> {
    SHIP_KINDS.iter().copied().find(|kind| kind.key() == key)
}

/// Position of `key` in the catalog.
pub(crate) fn kind_index(key: &str) -> Option<usize> {
    SHIP_KINDS.iter().position(|kind| kind.key() == key)
}
