#[cfg(feature = "std")]
mod cli_tests {
    use std::io::Cursor;

    use neon_battleships::cli::{render_board, HotSeat, MatchSetup};
    use neon_battleships::{Board, Orientation, Phase, Ship, ShipCounts, ShipId, SHIP_KINDS};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn setup(auto_place: bool) -> MatchSetup {
        MatchSetup {
            player1: "Ada".to_string(),
            player2: "Grace".to_string(),
            grid_size: 5,
            counts: ShipCounts::none().with("destroyer", 1),
            auto_place,
        }
    }

    fn run_script(setup: MatchSetup, script: &str) -> (String, Phase) {
        let mut out = Vec::new();
        let mut rng = SmallRng::seed_from_u64(12345);
        let phase = {
            let mut session = HotSeat::new(setup, Cursor::new(script.to_string()), &mut out);
            session.run(&mut rng).unwrap();
            session.game().phase()
        };
        (String::from_utf8(out).unwrap(), phase)
    }

    #[test]
    fn scripted_match_to_victory() {
        // place, confirm, place, confirm, pass, two hits, decline rematch
        let script = "A1 H\n\nA1 H\n\n\nA1\nB1\nn\n";
        let (output, phase) = run_script(setup(false), script);

        assert!(output.contains("Destroyer placed at A1"));
        assert!(output.contains("Pass the device to Ada"));
        assert!(output.contains("A1 -> Hit! Shoot again."));
        assert!(output.contains("B1 -> Ada wins!"));
        assert!(output.contains("Winner: Ada"));
        assert_eq!(
            phase,
            Phase::GameOver {
                winner: neon_battleships::PlayerSlot::One
            }
        );
    }

    #[test]
    fn bad_input_is_reported_and_retried() {
        let script = "Z9 H\nA1 Q\nE1 H\nA1 H\n\nA1 V\n\n\nA9\nquit\n";
        let (output, phase) = run_script(setup(false), script);

        assert!(output.contains("Error: Column 'Z' out of bounds - must be A-E"));
        assert!(output.contains("Error: Invalid orientation - use H or V"));
        assert!(output.contains("Invalid placement (out of bounds or overlap)."));
        assert!(output.contains("Invalid coordinate: Row 9 out of bounds - must be 1-5"));
        assert!(matches!(phase, Phase::Playing { .. }));
    }

    #[test]
    fn auto_place_skips_prompts_and_eof_stops() {
        let (output, phase) = run_script(setup(true), "");
        assert_eq!(output.matches("Fleet placed randomly.").count(), 2);
        assert!(matches!(phase, Phase::Pass { .. }));
    }

    #[test]
    fn blank_placement_line_places_randomly() {
        // random, confirm, random, confirm, pass, quit
        let (output, phase) = run_script(setup(false), "\n\n\n\n\nquit\n");

        assert_eq!(output.matches("Destroyer randomly placed at").count(), 2);
        assert!(output.contains("Ada vs Grace on a 5x5 grid, 1 ship(s) each."));
        assert_eq!(
            phase,
            Phase::Playing {
                turn: neon_battleships::PlayerSlot::One
            }
        );
    }

    #[test]
    fn miss_is_announced_before_the_pass_screen() {
        let script = "A1 H\n\nA1 H\n\n\nC3\n";
        let (output, phase) = run_script(setup(false), script);

        let miss = output.find("Miss. Turn passes.").expect("miss message");
        let pass = output
            .find("Pass the device to Grace")
            .expect("pass screen for Grace");
        assert!(miss < pass);
        assert!(!output.contains("C3 ->"));
        assert_eq!(
            phase,
            Phase::Pass {
                target: neon_battleships::PlayerSlot::Two
            }
        );
    }

    #[test]
    fn play_again_starts_a_fresh_match() {
        let script = "A1 H\n\nA1 H\n\n\nA1\nB1\ny\n";
        let (output, phase) = run_script(setup(false), script);

        assert!(output.contains("Winner: Ada"));
        assert_eq!(
            output.matches("Ada vs Grace on a 5x5 grid, 1 ship(s) each.").count(),
            2
        );
        assert_eq!(output.matches("=== Ship placement: Ada ===").count(), 2);
        assert_eq!(phase, Phase::Placing(neon_battleships::PlayerSlot::One));
    }

    #[test]
    fn restart_during_play_returns_to_placement() {
        let script = "A1 H\n\nA1 H\n\n\nA1\nrestart\n";
        let (output, phase) = run_script(setup(false), script);

        assert!(output.contains("A1 -> Hit! Shoot again."));
        assert!(output.contains("Match restarted."));
        assert_eq!(phase, Phase::Placing(neon_battleships::PlayerSlot::One));
    }

    #[test]
    fn hidden_board_does_not_reveal_ships() {
        let mut board = Board::new(5);
        let ship = Ship::new(ShipId(1), SHIP_KINDS[4]);
        board.place(&ship, 0, 0, Orientation::Horizontal).unwrap();
        board.shoot(0, 0).unwrap();
        board.shoot(4, 4).unwrap();

        let hidden = render_board(&board, false);
        assert!(!hidden.contains(" S"));
        assert!(hidden.contains(" X"));
        assert!(hidden.contains(" o"));

        let revealed = render_board(&board, true);
        assert!(revealed.contains(" X S"));
    }
}
