//! Terminal hot-seat front end.
//!
//! Drives a [`Match`] from line-based input: ship placement, the pass screen
//! between turns, firing and the game-over prompt. Input and output are
//! generic so the loop can be scripted in tests.

use std::io::{BufRead, Write};

use anyhow::anyhow;
use rand::Rng;

use crate::engine::{
    Board, BoardError, Match, MatchError, Orientation, Phase, PlayerSlot, ShipCounts,
    MSG_INVALID_PLACEMENT, MSG_PLACE_ALL,
};

/// Format a coordinate as `A1` style text.
pub fn coord_to_string(r: usize, c: usize) -> String {
    let col = (b'A' + c as u8) as char;
    format!("{}{}", col, r + 1)
}

fn last_column(size: usize) -> char {
    (b'A' + size.saturating_sub(1) as u8) as char
}

/// Parse `A5` style input into `(row, col)` on a `size × size` grid.
pub fn parse_coord(input: &str, size: usize) -> Result<(usize, usize), String> {
    let input = input.trim();
    if input.is_empty() {
        return Err("Empty input".to_string());
    }
    if input.len() < 2 {
        return Err("Too short - need column letter and row number (e.g., A5)".to_string());
    }
    let mut chars = input.chars();
    let col_ch = chars.next().ok_or("No column letter")?.to_ascii_uppercase();
    if !col_ch.is_ascii_alphabetic() {
        return Err(format!(
            "Invalid column '{}' - must be a letter A-{}",
            col_ch,
            last_column(size)
        ));
    }
    let col = (col_ch as u8).wrapping_sub(b'A') as usize;
    if col >= size {
        return Err(format!(
            "Column '{}' out of bounds - must be A-{}",
            col_ch,
            last_column(size)
        ));
    }
    let row_str: String = chars.collect();
    let row: usize = row_str
        .parse()
        .map_err(|_| format!("Invalid row '{}' - must be a number 1-{}", row_str, size))?;
    if row == 0 {
        return Err(format!("Row cannot be 0 - must be 1-{}", size));
    }
    if row > size {
        return Err(format!("Row {} out of bounds - must be 1-{}", row, size));
    }
    Ok((row - 1, col))
}

/// `H`/`V` (any case, any suffix such as `horizontal`). Missing means horizontal.
pub fn parse_orientation(input: Option<&str>) -> Option<Orientation> {
    match input.and_then(|s| s.chars().next()) {
        None | Some('h') | Some('H') => Some(Orientation::Horizontal),
        Some('v') | Some('V') => Some(Orientation::Vertical),
        Some(_) => None,
    }
}

/// Render `board` as text. With `reveal` unset, unshot ships stay hidden.
pub fn render_board(board: &Board, reveal: bool) -> String {
    let size = board.size();
    let mut out = String::from("    ");
    for c in 0..size {
        out.push(' ');
        out.push((b'A' + c as u8) as char);
    }
    out.push('\n');
    for r in 0..size {
        out.push_str(&format!("  {:2}", r + 1));
        for c in 0..size {
            let ch = match board.cell(r, c) {
                Some(cell) if cell.is_shot() && cell.is_hit() => 'X',
                Some(cell) if cell.is_shot() => 'o',
                Some(cell) if reveal && cell.has_ship() => 'S',
                _ => '.',
            };
            out.push(' ');
            out.push(ch);
        }
        out.push('\n');
    }
    if reveal {
        out.push_str("  Legend: S=Ship  X=Hit  o=Miss  .=Water\n");
    } else {
        out.push_str("  Legend: X=Hit  o=Miss  .=Unknown\n");
    }
    out
}

/// Match parameters, reused when the players choose to play again.
#[derive(Debug, Clone)]
pub struct MatchSetup {
    pub player1: String,
    pub player2: String,
    pub grid_size: usize,
    pub counts: ShipCounts,
    /// Place both fleets randomly instead of prompting.
    pub auto_place: bool,
}

/// Line-driven hot-seat session over any reader and writer.
pub struct HotSeat<R: BufRead, W: Write> {
    input: R,
    out: W,
    game: Match,
    setup: MatchSetup,
    /// Cleared once random placement of a whole fleet has failed.
    auto_place: bool,
}

impl<R: BufRead, W: Write> HotSeat<R, W> {
    pub fn new(setup: MatchSetup, input: R, out: W) -> Self {
        Self {
            input,
            out,
            game: Match::new(),
            auto_place: setup.auto_place,
            setup,
        }
    }

    /// The match being driven.
    pub fn game(&self) -> &Match {
        &self.game
    }

    /// Next trimmed input line, `None` at end of input.
    fn read_line(&mut self) -> anyhow::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Run matches until the players decline a rematch or input ends.
    pub fn run<G: Rng>(&mut self, rng: &mut G) -> anyhow::Result<()> {
        loop {
            let keep_going = match self.game.phase() {
                Phase::Setup => {
                    let s = &self.setup;
                    self.game
                        .start_match(&s.player1, &s.player2, s.grid_size, &s.counts)
                        .map_err(|e| anyhow!(e))?;
                    let (size, ships) = (s.grid_size, s.counts.total_ships());
                    self.auto_place = s.auto_place;
                    let (one, two) = (
                        self.player_name(PlayerSlot::One),
                        self.player_name(PlayerSlot::Two),
                    );
                    writeln!(
                        self.out,
                        "{} vs {} on a {}x{} grid, {} ship(s) each.",
                        one, two, size, size, ships
                    )?;
                    true
                }
                Phase::Placing(slot) => self.placement_turn(slot, rng)?,
                Phase::Pass { .. } => self.pass_screen()?,
                Phase::Playing { .. } => self.firing_turn()?,
                Phase::GameOver { .. } => self.game_over()?,
            };
            if !keep_going {
                self.out.flush()?;
                return Ok(());
            }
        }
    }

    fn player_name(&self, slot: PlayerSlot) -> String {
        self.game
            .player(slot)
            .map(|p| p.name().to_string())
            .unwrap_or_default()
    }

    fn placement_turn<G: Rng>(&mut self, slot: PlayerSlot, rng: &mut G) -> anyhow::Result<bool> {
        let name = self.player_name(slot);
        writeln!(self.out, "\n=== Ship placement: {} ===", name)?;

        if self.auto_place {
            match self.game.auto_place(slot, rng) {
                Ok(()) => {
                    self.game.confirm_placement(slot).map_err(|e| anyhow!(e))?;
                    writeln!(self.out, "Fleet placed randomly.")?;
                    return Ok(true);
                }
                Err(MatchError::Board(e)) => {
                    writeln!(self.out, "Error: {}. Place the fleet manually.", e)?;
                    self.auto_place = false;
                }
                Err(e) => return Err(anyhow!(e)),
            }
        }

        let Some(player) = self.game.player(slot) else {
            return Err(anyhow!("no player in slot {}", slot.number()));
        };
        let size = player.board().size();
        let board_text = render_board(player.board(), true);
        let next = player
            .unplaced()
            .next()
            .map(|s| (s.id(), s.name(), s.length()));
        let remaining = player.unplaced().count();
        write!(self.out, "{}", board_text)?;

        let Some((ship_id, ship_name, ship_len)) = next else {
            write!(self.out, "All ships placed. Press ENTER to confirm placement: ")?;
            self.out.flush()?;
            if self.read_line()?.is_none() {
                return Ok(false);
            }
            match self.game.confirm_placement(slot) {
                Ok(_) => {}
                Err(MatchError::PlacementIncomplete) => writeln!(self.out, "{}", MSG_PLACE_ALL)?,
                Err(e) => return Err(anyhow!(e)),
            }
            return Ok(true);
        };

        write!(
            self.out,
            "{} remaining. {} (length {}): enter placement like A5 H or A5 V, ENTER for random, 'restart': ",
            remaining, ship_name, ship_len
        )?;
        self.out.flush()?;
        let Some(line) = self.read_line()? else {
            return Ok(false);
        };

        if line.eq_ignore_ascii_case("restart") {
            return self.restart();
        }

        if line.is_empty() {
            let spot = {
                let board = self
                    .game
                    .player(slot)
                    .map(|p| p.board().clone())
                    .ok_or_else(|| anyhow!("no player in slot {}", slot.number()))?;
                let ship = self
                    .game
                    .player(slot)
                    .and_then(|p| p.fleet().iter().find(|s| s.id() == ship_id).cloned())
                    .ok_or_else(|| anyhow!("ship {} vanished", ship_id))?;
                board.random_placement(rng, &ship)
            };
            let (r, c, o) = match spot {
                Ok(spot) => spot,
                Err(e) => {
                    writeln!(self.out, "Error: {}. Place it manually or restart.", e)?;
                    return Ok(true);
                }
            };
            self.game
                .place_ship(slot, ship_id, r, c, o)
                .map_err(|e| anyhow!(e))?;
            writeln!(self.out, "{} randomly placed at {}", ship_name, coord_to_string(r, c))?;
            return Ok(true);
        }

        let mut parts = line.split_whitespace();
        let coord = match parts.next().map(|s| parse_coord(s, size)) {
            Some(Ok(coord)) => coord,
            Some(Err(e)) => {
                writeln!(self.out, "Error: {}", e)?;
                return Ok(true);
            }
            None => {
                writeln!(self.out, "Error: Please enter coordinates (e.g., A5 H)")?;
                return Ok(true);
            }
        };
        let Some(orientation) = parse_orientation(parts.next()) else {
            writeln!(self.out, "Error: Invalid orientation - use H or V")?;
            return Ok(true);
        };

        match self.game.place_ship(slot, ship_id, coord.0, coord.1, orientation) {
            Ok(()) => writeln!(
                self.out,
                "{} placed at {}",
                ship_name,
                coord_to_string(coord.0, coord.1)
            )?,
            Err(MatchError::Board(BoardError::OutOfBounds | BoardError::Overlap)) => {
                writeln!(self.out, "{}", MSG_INVALID_PLACEMENT)?
            }
            Err(e) => return Err(anyhow!(e)),
        }
        Ok(true)
    }

    fn pass_screen(&mut self) -> anyhow::Result<bool> {
        if let Some(message) = self.game.state().message() {
            writeln!(self.out, "{}", message)?;
        }
        let name = self.game.pass_target_name().unwrap_or_default().to_string();
        write!(self.out, "\nPass the device to {}. Press ENTER when ready: ", name)?;
        self.out.flush()?;
        if self.read_line()?.is_none() {
            return Ok(false);
        }
        self.game.continue_after_pass().map_err(|e| anyhow!(e))?;
        Ok(true)
    }

    fn firing_turn(&mut self) -> anyhow::Result<bool> {
        let (Some(me), Some(enemy)) = (self.game.current_player(), self.game.opponent()) else {
            return Err(anyhow!("match has no players"));
        };
        let size = enemy.board().size();
        let view = format!(
            "\n=== {}'s turn ===\nOpponent board ({} ship(s) afloat):\n{}\nYour board:\n{}",
            me.name(),
            enemy.board().ships_remaining(),
            render_board(enemy.board(), false),
            render_board(me.board(), true)
        );
        write!(self.out, "{}", view)?;
        write!(self.out, "Enter target (e.g. A5), 'restart' or 'quit': ")?;
        self.out.flush()?;

        let Some(line) = self.read_line()? else {
            return Ok(false);
        };
        if line.eq_ignore_ascii_case("quit") {
            return Ok(false);
        }
        if line.eq_ignore_ascii_case("restart") {
            return self.restart();
        }
        let (r, c) = match parse_coord(&line, size) {
            Ok(coord) => coord,
            Err(e) => {
                writeln!(self.out, "Invalid coordinate: {}", e)?;
                return Ok(true);
            }
        };
        match self.game.fire_shot(r, c) {
            Ok(report) => {
                if !matches!(report.phase, Phase::Pass { .. }) {
                    writeln!(self.out, "{} -> {}", coord_to_string(r, c), report.message)?;
                }
            }
            Err(MatchError::Board(BoardError::OutOfBounds)) => {
                writeln!(self.out, "Shot out of bounds.")?;
            }
            Err(e) => return Err(anyhow!(e)),
        }
        Ok(true)
    }

    /// Abandon the current match; the loop starts a fresh one.
    fn restart(&mut self) -> anyhow::Result<bool> {
        self.game.restart_match();
        writeln!(self.out, "Match restarted.")?;
        Ok(true)
    }

    fn game_over(&mut self) -> anyhow::Result<bool> {
        let winner = self.game.state().winner_name().unwrap_or_default().to_string();
        writeln!(self.out, "\n=== Game over ===\nWinner: {}", winner)?;
        write!(self.out, "Play again? [y/N]: ")?;
        self.out.flush()?;
        let again = matches!(self.read_line()?, Some(answer) if answer.eq_ignore_ascii_case("y"));
        if again {
            self.game.restart_match();
        }
        Ok(again)
    }
}
