//! 3x3 board representation and winning-line geometry

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of cells on the board
pub const CELL_COUNT: usize = 9;

/// Index of the center cell
pub const CENTER: usize = 4;

/// Indices of the four corner cells
pub const CORNERS: [usize; 4] = [0, 2, 6, 8];

/// An index triple that wins the game when all three cells share a mark
pub type Line = [usize; 3];

/// The 8 winning lines, enumerated rows first, then columns, then diagonals.
/// `Board::winning_line` reports the first match in this order.
pub const WINNING_LINES: [Line; 8] = [
    [0, 1, 2], [3, 4, 5], [6, 7, 8], // Rows
    [0, 3, 6], [1, 4, 7], [2, 5, 8], // Columns
    [0, 4, 8], [2, 4, 6], // Diagonals
];

// ============================================================================
// PLAYER
// ============================================================================

/// Player mark
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::X => write!(f, "X"),
            Player::O => write!(f, "O"),
        }
    }
}

// ============================================================================
// BOARD
// ============================================================================

/// 3x3 board in row-major order; `None` is an empty cell.
///
/// A `Board` is a plain value with no rule knowledge of its own. Turn order
/// and write-once cell semantics are enforced by `GameState`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cells: [Option<Player>; CELL_COUNT],
}

impl Board {
    /// Empty board
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark at `index`, or `None` for an empty cell.
    ///
    /// Panics if `index >= CELL_COUNT`; callers validate indices at the
    /// boundary (see `GameState::apply_move`).
    pub fn get(&self, index: usize) -> Option<Player> {
        self.cells[index]
    }

    /// Place a mark unconditionally (no rule checking)
    pub fn set(&mut self, index: usize, player: Player) {
        self.cells[index] = Some(player);
    }

    /// All nine cells in row-major order
    pub fn cells(&self) -> &[Option<Player>; CELL_COUNT] {
        &self.cells
    }

    /// True when every cell holds a mark
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_some())
    }

    /// Indices of empty cells, ascending
    pub fn empty_cells(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_none())
            .map(|(index, _)| index)
    }

    /// First fully-matched winning line in fixed enumeration order
    pub fn winning_line(&self) -> Option<Line> {
        WINNING_LINES.into_iter().find(|&[a, b, c]| {
            self.cells[a].is_some() && self.cells[a] == self.cells[b] && self.cells[a] == self.cells[c]
        })
    }

    /// True iff some line has three equal marks
    pub fn has_winner(&self) -> bool {
        self.winning_line().is_some()
    }

    /// Owner of the first winning line, if any
    pub fn winner(&self) -> Option<Player> {
        self.winning_line().and_then(|[a, _, _]| self.cells[a])
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a board from a 9-char pattern ('X', 'O', anything else = empty)
    fn board(pattern: &str) -> Board {
        assert_eq!(pattern.len(), CELL_COUNT);
        let mut board = Board::new();
        for (index, ch) in pattern.chars().enumerate() {
            match ch {
                'X' => board.set(index, Player::X),
                'O' => board.set(index, Player::O),
                _ => {}
            }
        }
        board
    }

    #[test]
    fn test_empty_board() {
        let board = Board::new();
        assert!(!board.is_full());
        assert!(!board.has_winner());
        assert_eq!(board.empty_cells().count(), CELL_COUNT);
    }

    #[test]
    fn test_row_win() {
        let b = board("XXX.OO...");
        assert_eq!(b.winning_line(), Some([0, 1, 2]));
        assert_eq!(b.winner(), Some(Player::X));
    }

    #[test]
    fn test_column_win() {
        let b = board("O.XO.XO..");
        assert_eq!(b.winning_line(), Some([0, 3, 6]));
        assert_eq!(b.winner(), Some(Player::O));
    }

    #[test]
    fn test_diagonal_win() {
        let b = board("X.O.X.O.X");
        assert_eq!(b.winning_line(), Some([0, 4, 8]));
    }

    #[test]
    fn test_line_enumeration_order_prefers_rows() {
        // Both the top row and the left column are complete; rows come first
        let b = board("XXXX..X..");
        assert_eq!(b.winning_line(), Some([0, 1, 2]));
    }

    #[test]
    fn test_mixed_line_is_not_a_win() {
        let b = board("XOX......");
        assert!(!b.has_winner());
        assert_eq!(b.winner(), None);
    }

    #[test]
    fn test_full_board_without_winner() {
        let b = board("XXOOOXXOX");
        assert!(b.is_full());
        assert!(!b.has_winner());
    }

    #[test]
    fn test_empty_cells_ascending() {
        let b = board("X...O...X");
        let empties: Vec<usize> = b.empty_cells().collect();
        assert_eq!(empties, vec![1, 2, 3, 5, 6, 7]);
    }
}
