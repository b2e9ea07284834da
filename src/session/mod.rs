//! Turn/phase state machine.
//!
//! [`GameSession`] is the only component with top-level mutable state. It
//! owns the board, the RNG, the phase, the dice countdown and the per-player
//! setup records, and drives every operation through the stateless rules in
//! [`crate::rules`]. The hosting layer owns one session per game; `&mut`
//! access makes each operation an atomic transaction.
//!
//! ## Phases
//!
//! ```text
//! home_setup --(both home pieces placed)--> neutral_setup
//! neutral_setup --(both neutral quotas filled)--> main
//! main --(main_turns >= max_main_turns)--> ended
//! ended --(reset)--> home_setup
//! ```
//!
//! ## Winner rule
//!
//! When the turn cap is reached, the player owning more board cells wins;
//! equal counts are a tie. No earlier decisive condition is applied.

pub mod view;

use serde::{Deserialize, Serialize, Serializer};
use tracing::{debug, info};

use crate::board::{Board, Coord, Orientation};
use crate::core::{GameRng, GameRngState, Player, RuleError};
use crate::rules::{self, Cluster, MoveOutcome};

pub use view::{BoardView, StateView};

/// Main-phase turns played before the game ends.
pub const MAX_MAIN_TURNS: u32 = 4;

/// Neutral pieces seeded per side during setup.
pub const NEUTRAL_QUOTA: u32 = 4;

/// Game phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Each player places their home piece.
    HomeSetup,
    /// Neutral pieces are seeded on the opposing halves.
    NeutralSetup,
    /// Dice-driven movement turns.
    Main,
    /// Terminal; only `reset` is accepted.
    Ended,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::HomeSetup => "home_setup",
            Phase::NeutralSetup => "neutral_setup",
            Phase::Main => "main",
            Phase::Ended => "ended",
        };
        f.write_str(name)
    }
}

/// Final result. Serializes as `1`, `2` or `"tie"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Winner {
    /// A single winner.
    Player(Player),
    /// Equal cell counts at the turn cap.
    Tie,
}

impl Serialize for Winner {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Winner::Player(player) => serializer.serialize_u8(player.number()),
            Winner::Tie => serializer.serialize_str("tie"),
        }
    }
}

/// Result of a successful piece placement.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PlacementOutcome {
    /// The two cells the piece occupies.
    pub cells: [Coord; 2],
}

/// Result of a dice roll.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RollOutcome {
    /// The rolled value, `1..=6`.
    pub dice: u8,
    /// Legal steal targets; non-empty only on a six.
    pub steal_targets: Vec<Coord>,
}

/// Result of a successful move or rotation, with turn bookkeeping.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TurnMoveOutcome {
    /// The re-resolved cluster after the step.
    pub cells: Cluster,
    /// Neutral cells converted to the mover, row-major order.
    pub converted: Vec<Coord>,
    /// Movement units left on the dice.
    pub moves_left: u8,
    /// Whether this step exhausted the dice and ended the turn.
    pub turn_over: bool,
}

/// Result of a successful steal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StealOutcome {
    /// The converted cell, as a one-element list.
    pub converted: Vec<Coord>,
}

/// Builder for a [`GameSession`] with non-default rules.
#[derive(Clone, Copy, Debug)]
pub struct SessionBuilder {
    neutral_quota: u32,
    max_main_turns: u32,
}

impl Default for SessionBuilder {
    fn default() -> Self {
        Self {
            neutral_quota: NEUTRAL_QUOTA,
            max_main_turns: MAX_MAIN_TURNS,
        }
    }
}

impl SessionBuilder {
    /// Create a builder with the standard rules.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Neutral pieces seeded per side.
    #[must_use]
    pub fn neutral_quota(mut self, quota: u32) -> Self {
        self.neutral_quota = quota;
        self
    }

    /// Main-phase turns before the game ends.
    #[must_use]
    pub fn max_main_turns(mut self, turns: u32) -> Self {
        assert!(turns > 0, "Must play at least 1 main turn");
        self.max_main_turns = turns;
        self
    }

    /// Build a fresh session in `home_setup`.
    #[must_use]
    pub fn build(self, seed: u64) -> GameSession {
        GameSession {
            board: Board::new(),
            phase: Phase::HomeSetup,
            current: Player::One,
            dice: 0,
            steal_armed: false,
            main_turns: 0,
            max_main_turns: self.max_main_turns,
            neutral_quota: self.neutral_quota,
            homes: [None; 2],
            neutral_counts: [0; 2],
            winner: None,
            rng: GameRng::new(seed),
        }
    }
}

/// One game's complete mutable state.
#[derive(Clone, Debug)]
pub struct GameSession {
    board: Board,
    phase: Phase,
    current: Player,
    /// Movement units left this turn; 0 means not rolled.
    dice: u8,
    /// Set by rolling a six, cleared by stealing or ending the turn.
    steal_armed: bool,
    main_turns: u32,
    max_main_turns: u32,
    neutral_quota: u32,
    homes: [Option<Coord>; 2],
    neutral_counts: [u32; 2],
    winner: Option<Winner>,
    rng: GameRng,
}

impl GameSession {
    /// Create a session with the standard rules.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        SessionBuilder::new().build(seed)
    }

    // === Accessors ===

    /// The board.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The player whose turn it is.
    #[must_use]
    pub fn current_player(&self) -> Player {
        self.current
    }

    /// Movement units left this turn; 0 means the dice have not been rolled.
    #[must_use]
    pub fn dice(&self) -> u8 {
        self.dice
    }

    /// Completed main-phase turns.
    #[must_use]
    pub fn main_turns(&self) -> u32 {
        self.main_turns
    }

    /// The turn cap.
    #[must_use]
    pub fn max_main_turns(&self) -> u32 {
        self.max_main_turns
    }

    /// The winner, once the game has ended.
    #[must_use]
    pub fn winner(&self) -> Option<Winner> {
        self.winner
    }

    /// Checkpoint the dice stream.
    ///
    /// Pair with [`Self::restore_rng`] to persist a session mid-game and
    /// resume with an identical sequence of rolls.
    #[must_use]
    pub fn rng_state(&self) -> GameRngState {
        self.rng.state()
    }

    /// Resume the dice stream from a checkpoint taken with
    /// [`Self::rng_state`].
    pub fn restore_rng(&mut self, state: &GameRngState) {
        self.rng = GameRng::from_state(state);
    }

    /// Serializable game-state view.
    #[must_use]
    pub fn state_view(&self) -> StateView {
        StateView {
            phase: self.phase,
            current_player: self.current,
            main_turns: self.main_turns,
            max_main_turns: self.max_main_turns,
            winner: self.winner,
        }
    }

    /// Serializable board view.
    #[must_use]
    pub fn board_view(&self) -> BoardView {
        BoardView::new(&self.board)
    }

    fn ensure_live(&self) -> Result<(), RuleError> {
        if self.phase == Phase::Ended {
            Err(RuleError::GameOver)
        } else {
            Ok(())
        }
    }

    fn ensure_main(&self, what: &str) -> Result<(), RuleError> {
        self.ensure_live()?;
        if self.phase != Phase::Main {
            return Err(RuleError::wrong_phase(format!(
                "{what} is only legal in the main phase (currently {})",
                self.phase
            )));
        }
        Ok(())
    }

    // === Setup ===

    /// Place a piece for the current player.
    ///
    /// Dispatches on phase: the home piece during `home_setup`, a neutral
    /// piece (on the opponent's half, counting toward the placer's quota)
    /// during `neutral_setup`. Turn and phase advancement happen here.
    pub fn place_piece(
        &mut self,
        row: i32,
        col: i32,
        orientation: Orientation,
    ) -> Result<PlacementOutcome, RuleError> {
        self.ensure_live()?;
        let anchor = Coord::new(row, col);
        let player = self.current;

        match self.phase {
            Phase::HomeSetup => {
                if self.homes[player.index()].is_some() {
                    return Err(RuleError::placement(format!(
                        "{player} already placed a home piece"
                    )));
                }
                let cells = rules::place_home(&mut self.board, player, anchor, orientation)?;
                self.homes[player.index()] = Some(anchor);
                debug!(%player, %anchor, "placed home piece");

                if self.homes.iter().all(Option::is_some) {
                    self.enter_neutral_setup();
                } else {
                    self.current = player.opponent();
                }
                Ok(PlacementOutcome {
                    cells: [cells[0].0, cells[1].0],
                })
            }
            Phase::NeutralSetup => {
                if self.neutral_counts[player.index()] >= self.neutral_quota {
                    return Err(RuleError::placement(format!(
                        "{player}'s neutral quota is already met"
                    )));
                }
                let cells = rules::place_neutral(&mut self.board, player, anchor, orientation)?;
                self.neutral_counts[player.index()] += 1;
                debug!(%player, %anchor, "placed neutral piece");

                self.advance_neutral_setup();
                Ok(PlacementOutcome {
                    cells: [cells[0].0, cells[1].0],
                })
            }
            Phase::Main => Err(RuleError::wrong_phase(
                "pieces cannot be placed in the main phase".to_string(),
            )),
            Phase::Ended => Err(RuleError::GameOver),
        }
    }

    /// Fill both neutral quotas automatically and advance to `main`.
    ///
    /// Fails with `InvalidPlacement` when the board cannot accommodate the
    /// quota under the spacing rule; already-placed pieces stay.
    pub fn auto_place_neutrals(&mut self) -> Result<(), RuleError> {
        self.ensure_live()?;
        if self.phase != Phase::NeutralSetup {
            return Err(RuleError::wrong_phase(format!(
                "neutral pieces are seeded during neutral_setup (currently {})",
                self.phase
            )));
        }

        while self
            .neutral_counts
            .iter()
            .any(|&count| count < self.neutral_quota)
        {
            let mut progressed = false;
            for player in [Player::One, Player::Two] {
                if self.neutral_counts[player.index()] >= self.neutral_quota {
                    continue;
                }
                if rules::auto_place_neutral(&mut self.board, &mut self.rng, player).is_some() {
                    self.neutral_counts[player.index()] += 1;
                    progressed = true;
                }
            }
            if !progressed {
                return Err(RuleError::placement("no room left for neutral pieces"));
            }
        }

        self.enter_main();
        Ok(())
    }

    fn enter_neutral_setup(&mut self) {
        self.phase = Phase::NeutralSetup;
        self.current = Player::One;
        info!("both home pieces placed, entering neutral_setup");
        if self.neutral_quota == 0 {
            self.enter_main();
        }
    }

    fn advance_neutral_setup(&mut self) {
        if self
            .neutral_counts
            .iter()
            .all(|&count| count >= self.neutral_quota)
        {
            self.enter_main();
        } else if self.neutral_counts[self.current.opponent().index()] < self.neutral_quota {
            self.current = self.current.opponent();
        }
    }

    fn enter_main(&mut self) {
        self.phase = Phase::Main;
        self.current = Player::One;
        self.main_turns = 0;
        self.dice = 0;
        info!("neutral quotas filled, entering main phase");
    }

    // === Main phase ===

    /// Roll the dice for the current turn.
    ///
    /// Legal once per turn. On a six, stealing is armed and the current
    /// steal targets are returned.
    pub fn roll_dice(&mut self) -> Result<RollOutcome, RuleError> {
        self.ensure_main("rolling the dice")?;
        if self.dice > 0 {
            return Err(RuleError::wrong_phase(
                "the dice were already rolled this turn".to_string(),
            ));
        }

        self.dice = self.rng.roll_die();
        self.steal_armed = self.dice == 6;
        debug!(player = %self.current, dice = self.dice, "rolled");

        let steal_targets = if self.steal_armed {
            rules::steal_targets(&self.board, self.current)
        } else {
            Vec::new()
        };
        Ok(RollOutcome {
            dice: self.dice,
            steal_targets,
        })
    }

    /// Resolve the current player's cluster at the seed cell. Pure read.
    pub fn select_cluster(&self, row: i32, col: i32) -> Result<Cluster, RuleError> {
        self.ensure_live()?;
        rules::find_cluster(&self.board, self.current, Coord::new(row, col))
    }

    /// Move the current player's cluster one unit step, consuming one
    /// movement unit. The turn ends automatically when the dice hit zero.
    pub fn move_cluster(
        &mut self,
        cells: &[Coord],
        dr: i32,
        dc: i32,
    ) -> Result<TurnMoveOutcome, RuleError> {
        self.ensure_move_ready("moving")?;
        let outcome = rules::move_cluster(&mut self.board, self.current, cells, dr, dc)?;
        debug!(player = %self.current, converted = outcome.converted.len(), "moved cluster");
        Ok(self.consume_movement_unit(outcome))
    }

    /// Rotate the current player's two-cell piece, consuming one movement
    /// unit. The turn ends automatically when the dice hit zero.
    pub fn rotate_cluster(&mut self, cells: &[Coord]) -> Result<TurnMoveOutcome, RuleError> {
        self.ensure_move_ready("rotating")?;
        let outcome = rules::rotate_cluster(&mut self.board, self.current, cells)?;
        debug!(player = %self.current, converted = outcome.converted.len(), "rotated piece");
        Ok(self.consume_movement_unit(outcome))
    }

    fn ensure_move_ready(&self, what: &str) -> Result<(), RuleError> {
        self.ensure_main(what)?;
        if self.dice == 0 {
            return Err(RuleError::wrong_phase(format!(
                "roll the dice before {what}"
            )));
        }
        Ok(())
    }

    fn consume_movement_unit(&mut self, outcome: MoveOutcome) -> TurnMoveOutcome {
        self.dice -= 1;
        let turn_over = self.dice == 0;
        if turn_over {
            self.finish_turn();
        }
        TurnMoveOutcome {
            cells: outcome.cells,
            converted: outcome.converted,
            moves_left: self.dice,
            turn_over,
        }
    }

    /// Current steal targets for the active player. Pure read; whether a
    /// steal is armed is a separate question answered by [`Self::steal`].
    #[must_use]
    pub fn steal_targets(&self) -> Vec<Coord> {
        rules::steal_targets(&self.board, self.current)
    }

    /// Steal one neutral cell.
    ///
    /// Only armed by rolling a six, at most once per roll; consumes no
    /// movement unit. Declining to steal is always legal and costs nothing.
    pub fn steal(&mut self, row: i32, col: i32) -> Result<StealOutcome, RuleError> {
        self.ensure_main("stealing")?;
        if !self.steal_armed {
            return Err(RuleError::NotStealable { row, col });
        }

        let converted = rules::steal(&mut self.board, self.current, Coord::new(row, col))?;
        self.steal_armed = false;
        debug!(player = %self.current, cell = %converted, "stole neutral cell");
        Ok(StealOutcome {
            converted: vec![converted],
        })
    }

    /// Forfeit any remaining movement units and end the turn.
    pub fn end_turn(&mut self) -> Result<(), RuleError> {
        self.ensure_main("ending the turn")?;
        self.finish_turn();
        Ok(())
    }

    fn finish_turn(&mut self) {
        self.dice = 0;
        self.steal_armed = false;
        self.main_turns += 1;

        if self.main_turns >= self.max_main_turns {
            self.phase = Phase::Ended;
            self.winner = Some(self.score());
            info!(winner = ?self.winner, "turn cap reached, game over");
        } else {
            self.current = self.current.opponent();
        }
    }

    /// Cell-count scoring: more owned cells wins, equal counts tie.
    fn score(&self) -> Winner {
        let one = self.board.count_owned_by(Player::One);
        let two = self.board.count_owned_by(Player::Two);
        match one.cmp(&two) {
            std::cmp::Ordering::Greater => Winner::Player(Player::One),
            std::cmp::Ordering::Less => Winner::Player(Player::Two),
            std::cmp::Ordering::Equal => Winner::Tie,
        }
    }

    /// Reinitialize to `home_setup` with an empty board.
    ///
    /// Always legal, including after `ended`. The RNG stream continues; the
    /// configured quota and turn cap are kept.
    pub fn reset(&mut self) {
        self.board = Board::new();
        self.phase = Phase::HomeSetup;
        self.current = Player::One;
        self.dice = 0;
        self.steal_armed = false;
        self.main_turns = 0;
        self.homes = [None; 2];
        self.neutral_counts = [0; 2];
        self.winner = None;
        info!("session reset");
    }
}
