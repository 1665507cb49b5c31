use neon_battleships::{
    instantiate_fleet, Board, BoardError, Coord, Orientation, Ship, ShipCounts, ShipId,
    ShotOutcome, SHIP_KINDS,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn destroyer(id: u32) -> Ship {
    Ship::new(ShipId(id), SHIP_KINDS[4])
}

#[test]
fn new_board_is_empty() {
    let board = Board::new(6);
    assert_eq!(board.size(), 6);
    assert_eq!(board.ships().count(), 0);
    for r in 0..6 {
        for c in 0..6 {
            let cell = board.cell(r, c).unwrap();
            assert!(!cell.has_ship() && !cell.is_shot() && !cell.is_hit());
            assert_eq!(cell.ship_id(), None);
        }
    }
    assert!(board.cell(6, 0).is_none());
}

#[test]
fn place_records_cells_and_registers_ship() {
    let mut board = Board::new(8);
    let cruiser = Ship::new(ShipId(3), SHIP_KINDS[2]);
    let placed = board.place(&cruiser, 2, 4, Orientation::Vertical).unwrap();

    assert!(placed.is_placed());
    assert_eq!(placed.orientation(), Orientation::Vertical);
    assert_eq!(
        placed.cells(),
        &[Coord::new(2, 4), Coord::new(3, 4), Coord::new(4, 4)]
    );
    assert_eq!(board.ship(ShipId(3)), Some(&placed));
    for coord in placed.cells() {
        let cell = board.cell(coord.row, coord.col).unwrap();
        assert!(cell.has_ship());
        assert_eq!(cell.ship_id(), Some(ShipId(3)));
    }
    // the caller's copy is untouched
    assert!(!cruiser.is_placed());
}

#[test]
fn placement_out_of_bounds_or_overlapping_is_rejected() {
    let mut board = Board::new(5);
    let carrier = Ship::new(ShipId(1), SHIP_KINDS[0]);
    assert!(board.can_place(&carrier, 0, 0, Orientation::Horizontal));
    assert!(!board.can_place(&carrier, 0, 1, Orientation::Horizontal));
    assert!(!board.can_place(&carrier, 1, 0, Orientation::Vertical));
    assert!(!board.can_place(&carrier, usize::MAX, 0, Orientation::Vertical));

    board.place(&carrier, 0, 0, Orientation::Horizontal).unwrap();
    let before = board.clone();

    let d = destroyer(2);
    assert!(!board.can_place(&d, 0, 3, Orientation::Vertical));
    assert_eq!(
        board.place(&d, 0, 3, Orientation::Vertical).unwrap_err(),
        BoardError::Overlap
    );
    assert_eq!(
        board.place(&d, 4, 4, Orientation::Horizontal).unwrap_err(),
        BoardError::OutOfBounds
    );
    assert_eq!(board, before);
}

#[test]
fn ships_may_touch() {
    let mut board = Board::new(5);
    board.place(&destroyer(1), 0, 0, Orientation::Horizontal).unwrap();
    assert!(board.can_place(&destroyer(2), 1, 0, Orientation::Horizontal));
    assert!(board.can_place(&destroyer(2), 0, 2, Orientation::Horizontal));
}

#[test]
fn placing_same_ship_twice_is_rejected() {
    let mut board = Board::new(5);
    let d = destroyer(1);
    board.place(&d, 0, 0, Orientation::Horizontal).unwrap();
    assert_eq!(
        board.place(&d, 3, 0, Orientation::Horizontal).unwrap_err(),
        BoardError::ShipAlreadyPlaced
    );
}

#[test]
fn destroyer_hit_then_sunk() {
    let mut board = Board::new(5);
    board.place(&destroyer(1), 0, 0, Orientation::Horizontal).unwrap();

    let first = board.shoot(0, 0).unwrap();
    assert_eq!(
        first,
        ShotOutcome {
            already_shot: false,
            hit: true,
            sunk: false,
            ship_id: Some(ShipId(1)),
        }
    );
    assert!(!board.all_sunk());

    let second = board.shoot(0, 1).unwrap();
    assert!(second.hit && second.sunk);
    assert!(board.all_sunk());
    assert_eq!(board.ships_remaining(), 0);
}

#[test]
fn miss_marks_cell_shot() {
    let mut board = Board::new(5);
    board.place(&destroyer(1), 0, 0, Orientation::Horizontal).unwrap();
    let outcome = board.shoot(3, 3).unwrap();
    assert_eq!(
        outcome,
        ShotOutcome {
            already_shot: false,
            hit: false,
            sunk: false,
            ship_id: None,
        }
    );
    let cell = board.cell(3, 3).unwrap();
    assert!(cell.is_shot() && !cell.is_hit());
}

#[test]
fn repeated_shot_reports_stored_result_without_counting() {
    let mut board = Board::new(5);
    board.place(&destroyer(1), 0, 0, Orientation::Horizontal).unwrap();
    board.shoot(0, 0).unwrap();
    board.shoot(0, 1).unwrap();
    let snapshot = board.clone();

    let again = board.shoot(0, 1).unwrap();
    assert!(again.already_shot && again.hit && !again.sunk);
    assert_eq!(board.ship(ShipId(1)).unwrap().hits(), 2);

    board.shoot(4, 4).unwrap();
    let water = board.shoot(4, 4).unwrap();
    assert!(water.already_shot && !water.hit);
    assert_eq!(board.ship(ShipId(1)), snapshot.ship(ShipId(1)));
}

#[test]
fn out_of_bounds_shot_changes_nothing() {
    let mut board = Board::new(5);
    let before = board.clone();
    assert_eq!(board.shoot(5, 0).unwrap_err(), BoardError::OutOfBounds);
    assert_eq!(board.shoot(0, 5).unwrap_err(), BoardError::OutOfBounds);
    assert_eq!(board, before);
}

#[test]
fn empty_board_is_never_all_sunk() {
    let mut board = Board::new(5);
    assert!(!board.all_sunk());
    board.shoot(0, 0).unwrap();
    assert!(!board.all_sunk());
}

#[test]
fn clone_is_independent() {
    let mut board = Board::new(5);
    board.place(&destroyer(1), 0, 0, Orientation::Horizontal).unwrap();
    let snapshot = board.clone();
    board.shoot(0, 0).unwrap();

    assert!(!snapshot.cell(0, 0).unwrap().is_shot());
    assert_eq!(snapshot.ship(ShipId(1)).unwrap().hits(), 0);
    assert_eq!(board.ship(ShipId(1)).unwrap().hits(), 1);
}

#[test]
fn random_placement_fills_standard_fleet_without_overlap() {
    let mut board = Board::new(10);
    let mut rng = SmallRng::seed_from_u64(42);
    let fleet = instantiate_fleet(&ShipCounts::standard());
    for ship in &fleet {
        let (r, c, o) = board.random_placement(&mut rng, ship).unwrap();
        board.place(ship, r, c, o).unwrap();
    }
    let occupied = (0..10)
        .flat_map(|r| (0..10).map(move |c| (r, c)))
        .filter(|&(r, c)| board.cell(r, c).unwrap().has_ship())
        .count();
    assert_eq!(occupied, 17, "all ships should be placed without overlap");
}

/// 5x5 board with exactly one free spot for a destroyer: (4, 3) horizontal.
fn board_with_single_gap() -> Board {
    let mut board = Board::new(5);
    for row in 0..4 {
        let carrier = Ship::new(ShipId(row as u32 + 1), SHIP_KINDS[0]);
        board.place(&carrier, row, 0, Orientation::Horizontal).unwrap();
    }
    let cruiser = Ship::new(ShipId(5), SHIP_KINDS[2]);
    board.place(&cruiser, 4, 0, Orientation::Horizontal).unwrap();
    board
}

#[test]
fn legal_placements_lists_the_only_gap() {
    let board = board_with_single_gap();
    assert_eq!(
        board.legal_placements(&destroyer(6)),
        vec![(4, 3, Orientation::Horizontal)]
    );
}

#[test]
fn random_placement_finds_the_only_gap_for_every_seed() {
    let board = board_with_single_gap();
    let ship = destroyer(6);
    for seed in 0..200 {
        let mut rng = SmallRng::seed_from_u64(seed);
        assert_eq!(
            board.random_placement(&mut rng, &ship),
            Ok((4, 3, Orientation::Horizontal)),
            "seed {}",
            seed
        );
    }
}

#[test]
fn random_placement_fails_when_board_is_full() {
    let mut board = board_with_single_gap();
    board.place(&destroyer(6), 4, 3, Orientation::Horizontal).unwrap();
    let mut rng = SmallRng::seed_from_u64(3);
    assert_eq!(
        board.random_placement(&mut rng, &destroyer(7)),
        Err(BoardError::UnableToPlaceShip)
    );
}

#[test]
fn random_placement_fails_when_ship_cannot_fit() {
    let board = Board::new(4);
    let mut rng = SmallRng::seed_from_u64(1);
    let carrier = Ship::new(ShipId(1), SHIP_KINDS[0]);
    assert_eq!(
        board.random_placement(&mut rng, &carrier).unwrap_err(),
        BoardError::UnableToPlaceShip
    );
}
