//! Players and seats.
//!
//! A match has exactly two seats. Seat one plays `Cell::PlayerA` and must
//! connect the left and right edges; seat two plays `Cell::PlayerB` and must
//! connect top and bottom. Turn tracking uses the seat, never the player
//! record itself.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::board::Cell;
use super::graph::Orientation;

/// Player identity, built by whoever arranges the match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Display name
    pub name: String,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!(self)
    }
}

/// One of the two player slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Seat {
    One,
    Two,
}

impl Seat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::One => "one",
            Self::Two => "two",
        }
    }

    /// The opposing seat.
    pub fn other(&self) -> Seat {
        match self {
            Self::One => Self::Two,
            Self::Two => Self::One,
        }
    }

    /// Mark this seat places on the board.
    pub fn cell(&self) -> Cell {
        match self {
            Self::One => Cell::PlayerA,
            Self::Two => Cell::PlayerB,
        }
    }

    /// Edge pair this seat must connect.
    pub fn orientation(&self) -> Orientation {
        match self {
            Self::One => Orientation::LeftRight,
            Self::Two => Orientation::TopBottom,
        }
    }

    /// Seat owning a board mark, if any.
    pub fn from_cell(cell: Cell) -> Option<Seat> {
        match cell {
            Cell::PlayerA => Some(Self::One),
            Cell::PlayerB => Some(Self::Two),
            Cell::Empty => None,
        }
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seat_other() {
        assert_eq!(Seat::One.other(), Seat::Two);
        assert_eq!(Seat::Two.other(), Seat::One);
        assert_eq!(Seat::One.other().other(), Seat::One);
    }

    #[test]
    fn test_seat_edges() {
        assert_eq!(Seat::One.cell(), Cell::PlayerA);
        assert_eq!(Seat::One.orientation(), Orientation::LeftRight);
        assert_eq!(Seat::Two.cell(), Cell::PlayerB);
        assert_eq!(Seat::Two.orientation(), Orientation::TopBottom);
    }

    #[test]
    fn test_seat_from_cell() {
        assert_eq!(Seat::from_cell(Cell::PlayerA), Some(Seat::One));
        assert_eq!(Seat::from_cell(Cell::PlayerB), Some(Seat::Two));
        assert_eq!(Seat::from_cell(Cell::Empty), None);
    }

    #[test]
    fn test_player_json() {
        let player = Player::new("Alice");
        assert_eq!(player.to_json(), serde_json::json!({"name": "Alice"}));
    }
}
