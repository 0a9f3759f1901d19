//! Board storage.
//!
//! A square N×N grid of cells addressed by plain `(row, col)` indices.
//! How a renderer tilts this grid into a hex rhombus is not this module's
//! concern; adjacency lives in [`crate::state::graph`].

use serde::{Deserialize, Serialize};

/// Board side used when no configuration is given.
pub const DEFAULT_BOARD_SIZE: usize = 11;

/// Smallest playable board side.
pub const MIN_BOARD_SIZE: usize = 2;

/// Largest board side a config may ask for.
pub const MAX_BOARD_SIZE: usize = 64;

/// Contents of a single board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cell {
    #[default]
    Empty,
    /// Seat one's mark (connects left to right)
    PlayerA,
    /// Seat two's mark (connects top to bottom)
    PlayerB,
}

impl Cell {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::PlayerA => "player_a",
            Self::PlayerB => "player_b",
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// Board position.
///
/// Serialized as a `[row, col]` pair, matching the move outcome message.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(from = "(usize, usize)", into = "(usize, usize)")]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Offset by a signed delta, returning `None` if the result would be negative.
    pub fn offset(&self, d_row: isize, d_col: isize) -> Option<Position> {
        let row = self.row.checked_add_signed(d_row)?;
        let col = self.col.checked_add_signed(d_col)?;
        Some(Position::new(row, col))
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}

impl From<Position> for (usize, usize) {
    fn from(pos: Position) -> Self {
        (pos.row, pos.col)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Why a mark could not be placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("position {0} is outside the board")]
    OutOfBounds(Position),
    #[error("position {0} is already occupied")]
    Occupied(Position),
    #[error("cannot mark a cell as empty")]
    EmptyMark,
}

/// Square grid of cells, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Create an empty board of side `size`.
    ///
    /// `size` is expected to be within `MIN_BOARD_SIZE..=MAX_BOARD_SIZE`, as
    /// `MatchConfig::validate` enforces; larger sides overflow `size * size`.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![Cell::Empty; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Check if position is within the board.
    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.size && pos.col < self.size
    }

    /// Get cell at position.
    pub fn get(&self, pos: Position) -> Option<Cell> {
        if self.contains(pos) {
            Some(self.cells[pos.row * self.size + pos.col])
        } else {
            None
        }
    }

    pub fn is_empty_at(&self, pos: Position) -> bool {
        self.get(pos) == Some(Cell::Empty)
    }

    /// Mark an empty cell.
    ///
    /// A cell only ever goes from `Empty` to a player mark; the board is left
    /// untouched on error.
    pub fn mark(&mut self, pos: Position, cell: Cell) -> Result<(), MoveError> {
        if cell.is_empty() {
            return Err(MoveError::EmptyMark);
        }
        if !self.contains(pos) {
            return Err(MoveError::OutOfBounds(pos));
        }
        let idx = pos.row * self.size + pos.col;
        if !self.cells[idx].is_empty() {
            return Err(MoveError::Occupied(pos));
        }
        self.cells[idx] = cell;
        Ok(())
    }

    /// Reset every cell to `Empty`.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::Empty);
    }

    /// Iterate rows as slices.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.size.max(1))
    }

    /// Number of cells holding `cell`.
    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|c| **c == cell).count()
    }

    pub fn is_full(&self) -> bool {
        !self.cells.iter().any(Cell::is_empty)
    }

    /// Convert board to JSON (array of rows of cell names).
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!(self.rows().collect::<Vec<_>>())
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(DEFAULT_BOARD_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new(4);
        assert_eq!(board.size(), 4);
        assert_eq!(board.count(Cell::Empty), 16);
        assert!(!board.is_full());
    }

    #[test]
    fn test_mark_and_get() {
        let mut board = Board::new(3);
        board.mark(Position::new(1, 2), Cell::PlayerA).unwrap();

        assert_eq!(board.get(Position::new(1, 2)), Some(Cell::PlayerA));
        assert_eq!(board.get(Position::new(2, 1)), Some(Cell::Empty));
        assert_eq!(board.get(Position::new(3, 0)), None);
    }

    #[test]
    fn test_mark_rejects_occupied_and_out_of_bounds() {
        let mut board = Board::new(3);
        board.mark(Position::new(0, 0), Cell::PlayerB).unwrap();

        assert_eq!(
            board.mark(Position::new(0, 0), Cell::PlayerA),
            Err(MoveError::Occupied(Position::new(0, 0)))
        );
        assert_eq!(
            board.mark(Position::new(0, 3), Cell::PlayerA),
            Err(MoveError::OutOfBounds(Position::new(0, 3)))
        );
        assert_eq!(
            board.mark(Position::new(1, 1), Cell::Empty),
            Err(MoveError::EmptyMark)
        );

        // Occupied cell kept its original owner
        assert_eq!(board.get(Position::new(0, 0)), Some(Cell::PlayerB));
        assert_eq!(board.count(Cell::PlayerA), 0);
    }

    #[test]
    fn test_clear() {
        let mut board = Board::new(2);
        board.mark(Position::new(0, 1), Cell::PlayerA).unwrap();
        board.mark(Position::new(1, 0), Cell::PlayerB).unwrap();
        board.clear();
        assert_eq!(board, Board::new(2));
    }

    #[test]
    fn test_is_full() {
        let mut board = Board::new(2);
        for (i, (row, col)) in [(0, 0), (0, 1), (1, 0), (1, 1)].into_iter().enumerate() {
            let cell = if i % 2 == 0 { Cell::PlayerA } else { Cell::PlayerB };
            board.mark(Position::new(row, col), cell).unwrap();
        }
        assert!(board.is_full());
    }

    #[test]
    fn test_position_offset() {
        let p = Position::new(0, 2);
        assert_eq!(p.offset(1, -1), Some(Position::new(1, 1)));
        assert_eq!(p.offset(-1, 0), None);
    }

    #[test]
    fn test_position_serializes_as_pair() {
        let json = serde_json::to_string(&Position::new(3, 7)).unwrap();
        assert_eq!(json, "[3,7]");
        let back: Position = serde_json::from_str("[4,1]").unwrap();
        assert_eq!(back, Position::new(4, 1));
    }

    #[test]
    fn test_board_json() {
        let mut board = Board::new(2);
        board.mark(Position::new(1, 0), Cell::PlayerB).unwrap();
        assert_eq!(
            board.to_json(),
            serde_json::json!([["empty", "empty"], ["player_b", "empty"]])
        );
    }
}
