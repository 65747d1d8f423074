//! Game state, turn sequencing, and terminal detection

use crate::board::{Board, Line, Player, CELL_COUNT};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// CORE TYPES
// ============================================================================

/// Game mode: who sources O's moves.
///
/// The engine's move rules are mode-independent; mode is carried by the
/// session so the presentation layer knows when to ask the computer player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    /// Player vs player
    Pvp,
    /// Player vs computer (computer plays O)
    Pvc,
}

/// Outcome of applying a single move
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveOutcome {
    /// Game goes on, turn has passed to the other player
    Continue,
    /// The move completed a line for this player
    Win(Player),
    /// The move filled the last cell without completing a line
    Draw,
}

/// Rule violations. All recoverable; callers may treat them as no-ops.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("cell index {index} is out of range")]
    OutOfBounds { index: usize },

    #[error("cell {index} is already taken")]
    CellTaken { index: usize },

    #[error("it is not {player}'s turn")]
    WrongTurn { player: Player },

    #[error("the game is already over")]
    GameOver,

    #[error("no empty cell to move to")]
    NoMovesAvailable,
}

// ============================================================================
// GAME STATE
// ============================================================================

/// State of a single game: board, side to move, and whether play continues.
///
/// Invariants maintained here:
/// - exactly one of {active, game over} holds
/// - `current_player` alternates strictly between applied moves
/// - a cell, once marked, is never overwritten
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    board: Board,
    current_player: Player,
    active: bool,
}

impl GameState {
    /// Fresh game: empty board, X to move, active
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            current_player: Player::X,
            active: true,
        }
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Winning line on the current board, if the game ended in a win
    pub fn winning_line(&self) -> Option<Line> {
        self.board.winning_line()
    }

    // ========================================================================
    // APPLY MOVE
    // ========================================================================

    /// Apply `player`'s mark at `index`.
    ///
    /// Terminal conditions are evaluated in fixed order: a completed line
    /// wins, else a full board draws, else the turn passes.
    pub fn apply_move(&mut self, index: usize, player: Player) -> Result<MoveOutcome, GameError> {
        if index >= CELL_COUNT {
            return Err(GameError::OutOfBounds { index });
        }
        if !self.active {
            return Err(GameError::GameOver);
        }
        if player != self.current_player {
            return Err(GameError::WrongTurn { player });
        }
        if self.board.get(index).is_some() {
            return Err(GameError::CellTaken { index });
        }

        self.board.set(index, player);

        if self.board.has_winner() {
            self.active = false;
            Ok(MoveOutcome::Win(player))
        } else if self.board.is_full() {
            self.active = false;
            Ok(MoveOutcome::Draw)
        } else {
            self.current_player = player.opponent();
            Ok(MoveOutcome::Continue)
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================
