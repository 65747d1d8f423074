//! oxo Core - Tic-tac-toe engine and computer player
//!
//! This crate provides the core game logic for oxo:
//! - Board representation and the 8 winning lines
//! - Game state with turn sequencing and win/draw detection
//! - Tiered heuristic computer player with injectable RNG
//! - Session controller: modes, scores, events, deferred computer moves
//!
//! The crate is UI-free: any front end (terminal, DOM, network) drives it
//! through [`Session`] and reacts to the [`GameEvent`]s it returns.

pub mod ai;
pub mod board;
pub mod game;
pub mod session;

// Re-exports for convenient access
pub use ai::HeuristicAi;
pub use board::{Board, Line, Player, CELL_COUNT, CENTER, CORNERS, WINNING_LINES};
pub use game::{GameError, GameState, Mode, MoveOutcome};
pub use session::{GameEvent, PendingMove, Scores, Session};
