//! Session controller
//!
//! Owns the game state, mode, score counters, and the computer player, with
//! exclusive mutation rights. Applying a move returns the events the
//! presentation layer reacts to, so front ends never inspect engine
//! internals to find out what just happened.
//!
//! Deferred computer moves are modelled as [`PendingMove`] tokens stamped
//! with a generation counter. Resets bump the generation, so a move
//! scheduled before a reset is recognized as stale and dropped instead of
//! landing on the fresh board.

use crate::ai::HeuristicAi;
use crate::board::{Line, Player};
use crate::game::{GameError, GameState, Mode, MoveOutcome};
use serde::{Deserialize, Serialize};

// ============================================================================
// SCORES & EVENTS
// ============================================================================

/// Win/draw counters. Counters only increase, exactly once per completed
/// game; they survive board resets and mode changes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scores {
    pub x: u32,
    pub o: u32,
    pub draws: u32,
}

impl Scores {
    fn record(&mut self, outcome: MoveOutcome) {
        match outcome {
            MoveOutcome::Win(Player::X) => self.x += 1,
            MoveOutcome::Win(Player::O) => self.o += 1,
            MoveOutcome::Draw => self.draws += 1,
            MoveOutcome::Continue => {}
        }
    }
}

/// State transitions the presentation layer subscribes to
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    MoveApplied {
        index: usize,
        player: Player,
    },
    GameEnded {
        outcome: MoveOutcome,
        winning_line: Option<Line>,
    },
    ScoresChanged {
        scores: Scores,
    },
}

// ============================================================================
// PENDING MOVES
// ============================================================================

/// A computer move selected now for application later (after the
/// presentation layer's thinking delay).
///
/// Only valid for the generation it was created under.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingMove {
    index: usize,
    generation: u64,
}

impl PendingMove {
    pub fn index(&self) -> usize {
        self.index
    }
}

// ============================================================================
// SESSION
// ============================================================================

/// A play session: one board at a time, scores accumulating across games.
pub struct Session {
    state: GameState,
    mode: Mode,
    scores: Scores,
    ai: HeuristicAi,
    generation: u64,
}

impl Session {
    pub fn new(mode: Mode) -> Self {
        Self {
            state: GameState::new(),
            mode,
            scores: Scores::default(),
            ai: HeuristicAi::new(),
            generation: 0,
        }
    }

    /// Session with a seeded computer player, for reproducible games
    pub fn with_seed(mode: Mode, seed: u64) -> Self {
        Self {
            ai: HeuristicAi::with_seed(seed),
            ..Self::new(mode)
        }
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn scores(&self) -> Scores {
        self.scores
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// True when the session should ask the computer player for a move
    pub fn computer_to_move(&self) -> bool {
        self.mode == Mode::Pvc
            && self.state.is_active()
            && self.state.current_player() == Player::O
    }

    // ========================================================================
    // MOVES
    // ========================================================================

    /// Play the side to move at `index`.
    ///
    /// A terminal move increments exactly one score counter and reports the
    /// end of the game alongside the move itself.
    pub fn apply_move(&mut self, index: usize) -> Result<Vec<GameEvent>, GameError> {
        let player = self.state.current_player();
        let outcome = self.state.apply_move(index, player)?;

        let mut events = vec![GameEvent::MoveApplied { index, player }];

        if outcome != MoveOutcome::Continue {
            self.scores.record(outcome);
            events.push(GameEvent::GameEnded {
                outcome,
                winning_line: self.state.winning_line(),
            });
            events.push(GameEvent::ScoresChanged {
                scores: self.scores,
            });
        }

        Ok(events)
    }

    /// Ask the computer player for a move without applying it
    pub fn select_computer_move(&mut self) -> Result<usize, GameError> {
        if !self.state.is_active() {
            return Err(GameError::GameOver);
        }
        let computer = self.state.current_player();
        self.ai.select_move(self.state.board(), computer)
    }

    /// Select the computer's move and stamp it with the current generation
    pub fn schedule_computer_move(&mut self) -> Result<PendingMove, GameError> {
        let index = self.select_computer_move()?;
        Ok(PendingMove {
            index,
            generation: self.generation,
        })
    }

    /// Apply a previously scheduled computer move.
    ///
    /// Returns `Ok(None)` when the token is stale (a reset happened since it
    /// was scheduled) or the game has ended; stale tokens never touch the
    /// board.
    pub fn apply_pending(
        &mut self,
        pending: PendingMove,
    ) -> Result<Option<Vec<GameEvent>>, GameError> {
        if pending.generation != self.generation || !self.state.is_active() {
            return Ok(None);
        }
        self.apply_move(pending.index).map(Some)
    }

    // ========================================================================
    // LIFECYCLE
    // ========================================================================

    /// Clear the board for another game; mode and scores are kept
    pub fn reset(&mut self) {
        self.state = GameState::new();
        self.generation += 1;
    }

    /// Reset the board and zero the score counters
    pub fn start_new_game(&mut self) -> Vec<GameEvent> {
        self.reset();
        self.scores = Scores::default();
        vec![GameEvent::ScoresChanged {
            scores: self.scores,
        }]
    }

    /// Switch mode; clears the board, keeps scores
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
        self.reset();
    }
}

// ============================================================================
// TESTS
// ============================================================================
