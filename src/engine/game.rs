//! Match controller: phase progression, turn ownership and player-facing
//! messages for a two-player, same-device match.

use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;
use rand::Rng;

use super::board::Board;
use super::common::{BoardError, ShotOutcome};
use super::config::DEFAULT_PLAYER_NAMES;
use super::setup::{validate, SetupError};
use super::ship::{instantiate_fleet, Fleet, Orientation, Ship, ShipCounts, ShipId};

pub const MSG_ALREADY_SHOT: &str = "Already shot there. Choose another cell.";
pub const MSG_HIT: &str = "Hit! Shoot again.";
pub const MSG_SUNK: &str = "Hit! You sunk a ship. Shoot again.";
pub const MSG_MISS: &str = "Miss. Turn passes.";
pub const MSG_INVALID_PLACEMENT: &str = "Invalid placement (out of bounds or overlap).";
pub const MSG_PLACE_ALL: &str = "Place all ships before continuing.";

/// One of the two seats at the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum PlayerSlot {
    #[default]
    One,
    Two,
}

impl PlayerSlot {
    pub fn other(self) -> Self {
        match self {
            PlayerSlot::One => PlayerSlot::Two,
            PlayerSlot::Two => PlayerSlot::One,
        }
    }

    /// 1 or 2.
    pub fn number(self) -> u8 {
        match self {
            PlayerSlot::One => 1,
            PlayerSlot::Two => 2,
        }
    }

    fn index(self) -> usize {
        usize::from(self.number() - 1)
    }
}

/// Stage of the match. Each stage carries only the data it needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    #[default]
    Setup,
    /// The given player is placing their fleet.
    Placing(PlayerSlot),
    /// Hand the device to `target` without revealing boards.
    Pass { target: PlayerSlot },
    /// `turn` is firing at the other player's board.
    Playing { turn: PlayerSlot },
    GameOver { winner: PlayerSlot },
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Setup => write!(f, "setup"),
            Phase::Placing(slot) => write!(f, "placing (player {})", slot.number()),
            Phase::Pass { target } => write!(f, "pass to player {}", target.number()),
            Phase::Playing { turn } => write!(f, "playing (player {})", turn.number()),
            Phase::GameOver { winner } => write!(f, "game over (player {} won)", winner.number()),
        }
    }
}

/// A participant: name, private board and fleet.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Player {
    name: String,
    board: Board,
    fleet: Fleet,
}

impl Player {
    fn new(name: String, grid_size: usize, counts: &ShipCounts) -> Self {
        Self {
            name,
            board: Board::new(grid_size),
            fleet: instantiate_fleet(counts),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn fleet(&self) -> &[Ship] {
        &self.fleet
    }

    /// Ships still waiting to be placed, in fleet order.
    pub fn unplaced(&self) -> impl Iterator<Item = &Ship> {
        self.fleet.iter().filter(|s| !s.is_placed())
    }

    pub fn all_placed(&self) -> bool {
        self.fleet.iter().all(Ship::is_placed)
    }

    /// Copy the board's view of `id` into the fleet.
    fn sync_ship(&mut self, id: ShipId) {
        if let Some(on_board) = self.board.ship(id) {
            if let Some(entry) = self.fleet.iter_mut().find(|s| s.id() == id) {
                *entry = on_board.clone();
            }
        }
    }
}

/// Whole state of one match. `Default` is the state of a fresh process.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchState {
    phase: Phase,
    players: Option<[Player; 2]>,
    turn_owner: PlayerSlot,
    pass_target: PlayerSlot,
    message: Option<String>,
    winner_name: Option<String>,
}

impl MatchState {
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Player in `slot`; `None` before a match has started.
    pub fn player(&self, slot: PlayerSlot) -> Option<&Player> {
        self.players.as_ref().map(|p| &p[slot.index()])
    }

    pub fn turn_owner(&self) -> PlayerSlot {
        self.turn_owner
    }

    pub fn pass_target(&self) -> PlayerSlot {
        self.pass_target
    }

    /// Last player-facing message.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn winner_name(&self) -> Option<&str> {
        self.winner_name.as_deref()
    }
}

/// Why a command was rejected. Rejection never changes the match state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    /// The command is not valid in the current phase.
    WrongPhase(Phase),
    InvalidSetup(Vec<SetupError>),
    /// Confirmation requested while some ship is still unplaced.
    PlacementIncomplete,
    UnknownShip(ShipId),
    Board(BoardError),
}

impl From<BoardError> for MatchError {
    fn from(err: BoardError) -> Self {
        MatchError::Board(err)
    }
}

impl fmt::Display for MatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchError::WrongPhase(phase) => write!(f, "Command not allowed during {}", phase),
            MatchError::InvalidSetup(errors) => {
                write!(f, "Invalid setup:")?;
                for e in errors {
                    write!(f, " {}", e)?;
                }
                Ok(())
            }
            MatchError::PlacementIncomplete => write!(f, "{}", MSG_PLACE_ALL),
            MatchError::UnknownShip(id) => write!(f, "Ship {} is not in this fleet", id),
            MatchError::Board(e) => write!(f, "{}", e),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for MatchError {}

/// What a resolved shot did to the match.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct ShotReport {
    pub outcome: ShotOutcome,
    pub message: String,
    /// Phase after the shot.
    pub phase: Phase,
}

/// Owns the [`MatchState`] and applies commands to it.
///
/// Commands are expected one at a time from a single driver. Every command
/// either fully applies or returns an error and leaves the state untouched.
#[derive(Debug, Clone, Default)]
pub struct Match {
    state: MatchState,
}

impl Match {
    /// A match in [`Phase::Setup`] with no players.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    /// Read-only view of the whole state.
    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn player(&self, slot: PlayerSlot) -> Option<&Player> {
        self.state.player(slot)
    }

    /// The player whose turn it is while playing.
    pub fn current_player(&self) -> Option<&Player> {
        self.player(self.state.turn_owner)
    }

    /// The player being fired at while playing.
    pub fn opponent(&self) -> Option<&Player> {
        self.player(self.state.turn_owner.other())
    }

    /// Name of the player the device is being handed to.
    pub fn pass_target_name(&self) -> Option<&str> {
        match self.state.phase {
            Phase::Pass { target } => self.player(target).map(Player::name),
            _ => None,
        }
    }

    fn players_mut(&mut self) -> Result<&mut [Player; 2], MatchError> {
        let phase = self.state.phase;
        self.state.players.as_mut().ok_or(MatchError::WrongPhase(phase))
    }

    fn player_mut(&mut self, slot: PlayerSlot) -> Result<&mut Player, MatchError> {
        Ok(&mut self.players_mut()?[slot.index()])
    }

    fn ensure_placing(&self, slot: PlayerSlot) -> Result<(), MatchError> {
        match self.state.phase {
            Phase::Placing(current) if current == slot => Ok(()),
            phase => {
                log::warn!("placement by player {} rejected during {}", slot.number(), phase);
                Err(MatchError::WrongPhase(phase))
            }
        }
    }

    /// Begin a match: `Setup -> Placing(One)`.
    ///
    /// Blank names fall back to "Player 1" / "Player 2". Both players get an
    /// empty board of `grid_size` and a fleet built from the same `counts`.
    pub fn start_match(
        &mut self,
        player1_name: &str,
        player2_name: &str,
        grid_size: usize,
        counts: &ShipCounts,
    ) -> Result<(), MatchError> {
        if self.state.phase != Phase::Setup {
            return Err(MatchError::WrongPhase(self.state.phase));
        }
        let validation = validate(grid_size, counts);
        if !validation.ok() {
            log::warn!("rejected setup: {:?}", validation.errors);
            return Err(MatchError::InvalidSetup(validation.errors));
        }

        let name = |raw: &str, fallback: &str| {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                fallback.to_string()
            } else {
                trimmed.to_string()
            }
        };
        let one = Player::new(name(player1_name, DEFAULT_PLAYER_NAMES[0]), grid_size, counts);
        let two = Player::new(name(player2_name, DEFAULT_PLAYER_NAMES[1]), grid_size, counts);
        log::info!(
            "match started: {} vs {} on {}x{} with {} ship(s) each",
            one.name,
            two.name,
            grid_size,
            grid_size,
            one.fleet.len()
        );

        self.state = MatchState {
            phase: Phase::Placing(PlayerSlot::One),
            players: Some([one, two]),
            ..MatchState::default()
        };
        Ok(())
    }

    /// Replace `slot`'s board and fleet with a placement snapshot, and move on
    /// when `confirm` is set. Returns the resulting phase.
    ///
    /// Confirming requires every ship in `fleet` to be placed. Confirming
    /// player one hands over to player two; confirming player two starts the
    /// pass to player one.
    pub fn update_placement(
        &mut self,
        slot: PlayerSlot,
        board: Board,
        fleet: Fleet,
        confirm: bool,
    ) -> Result<Phase, MatchError> {
        self.ensure_placing(slot)?;
        if confirm && !fleet.iter().all(Ship::is_placed) {
            return Err(MatchError::PlacementIncomplete);
        }

        let player = self.player_mut(slot)?;
        player.board = board;
        player.fleet = fleet;

        if confirm {
            self.state.phase = match slot {
                PlayerSlot::One => Phase::Placing(PlayerSlot::Two),
                PlayerSlot::Two => {
                    self.state.turn_owner = PlayerSlot::One;
                    self.state.pass_target = PlayerSlot::One;
                    self.state.message = None;
                    Phase::Pass {
                        target: PlayerSlot::One,
                    }
                }
            };
            log::info!("player {} confirmed placement, now {}", slot.number(), self.state.phase);
        }
        Ok(self.state.phase)
    }

    /// Place one ship of `slot`'s fleet, then submit the result as an
    /// unconfirmed placement update.
    pub fn place_ship(
        &mut self,
        slot: PlayerSlot,
        ship_id: ShipId,
        row: usize,
        col: usize,
        orientation: Orientation,
    ) -> Result<(), MatchError> {
        self.ensure_placing(slot)?;
        let player = self.player(slot).ok_or(MatchError::WrongPhase(self.phase()))?;
        let ship = player
            .fleet
            .iter()
            .find(|s| s.id() == ship_id)
            .ok_or(MatchError::UnknownShip(ship_id))?;
        if ship.is_placed() {
            return Err(MatchError::Board(BoardError::ShipAlreadyPlaced));
        }

        let mut board = player.board.clone();
        let placed = board.place(ship, row, col, orientation)?;
        let fleet = player
            .fleet
            .iter()
            .map(|s| if s.id() == ship_id { placed.clone() } else { s.clone() })
            .collect();
        self.update_placement(slot, board, fleet, false)?;
        Ok(())
    }

    /// Randomly place every ship of `slot` that is not placed yet.
    pub fn auto_place<R: Rng>(
        &mut self,
        slot: PlayerSlot,
        rng: &mut R,
    ) -> Result<(), MatchError> {
        self.ensure_placing(slot)?;
        let player = self.player(slot).ok_or(MatchError::WrongPhase(self.phase()))?;
        let mut board = player.board.clone();
        let mut fleet = player.fleet.clone();
        for ship in fleet.iter_mut().filter(|s| !s.is_placed()) {
            let (r, c, o) = board.random_placement(rng, ship)?;
            *ship = board.place(ship, r, c, o)?;
        }
        self.update_placement(slot, board, fleet, false)?;
        Ok(())
    }

    /// Confirm `slot`'s current placement.
    pub fn confirm_placement(&mut self, slot: PlayerSlot) -> Result<Phase, MatchError> {
        self.ensure_placing(slot)?;
        let player = self.player(slot).ok_or(MatchError::WrongPhase(self.phase()))?;
        let (board, fleet) = (player.board.clone(), player.fleet.clone());
        self.update_placement(slot, board, fleet, true)
    }

    /// `Pass { target } -> Playing { turn: target }`.
    pub fn continue_after_pass(&mut self) -> Result<PlayerSlot, MatchError> {
        let Phase::Pass { target } = self.state.phase else {
            return Err(MatchError::WrongPhase(self.state.phase));
        };
        self.state.turn_owner = target;
        self.state.message = None;
        self.state.phase = Phase::Playing { turn: target };
        log::info!("player {} takes the device", target.number());
        Ok(target)
    }

    /// Fire at (`row`, `col`) on the opponent's board.
    ///
    /// A hit keeps the turn, a miss passes the device, sinking the last ship
    /// ends the match. Re-firing at a resolved cell only updates the message.
    pub fn fire_shot(&mut self, row: usize, col: usize) -> Result<ShotReport, MatchError> {
        let Phase::Playing { turn } = self.state.phase else {
            log::warn!("shot rejected during {}", self.state.phase);
            return Err(MatchError::WrongPhase(self.state.phase));
        };
        let target_slot = turn.other();
        let players = self.players_mut()?;

        let mut next_board = players[target_slot.index()].board.clone();
        let outcome = next_board.shoot(row, col)?;

        if outcome.already_shot {
            self.state.message = Some(MSG_ALREADY_SHOT.to_string());
            return Ok(self.report(outcome, MSG_ALREADY_SHOT.to_string()));
        }

        let target = &mut players[target_slot.index()];
        target.board = next_board;
        if let Some(id) = outcome.ship_id {
            target.sync_ship(id);
        }
        let target_defeated = target.board.all_sunk();
        let shooter_name = players[turn.index()].name.clone();

        let message = if target_defeated {
            self.state.phase = Phase::GameOver { winner: turn };
            self.state.winner_name = Some(shooter_name.clone());
            log::info!("{} wins", shooter_name);
            format!("{} wins!", shooter_name)
        } else if outcome.hit {
            if outcome.sunk {
                MSG_SUNK.to_string()
            } else {
                MSG_HIT.to_string()
            }
        } else {
            self.state.pass_target = target_slot;
            self.state.phase = Phase::Pass {
                target: target_slot,
            };
            MSG_MISS.to_string()
        };
        self.state.message = Some(message.clone());
        Ok(self.report(outcome, message))
    }

    fn report(&self, outcome: ShotOutcome, message: String) -> ShotReport {
        ShotReport {
            outcome,
            message,
            phase: self.state.phase,
        }
    }

    /// Discard everything and return to [`Phase::Setup`]. Valid in any phase.
    pub fn restart_match(&mut self) {
        log::info!("match restarted from {}", self.state.phase);
        self.state = MatchState::default();
    }
}
