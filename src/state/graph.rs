//! Hex connectivity over the square board.
//!
//! The board is stored as a square grid, but each cell has six neighbours:
//! the eight rectangular neighbours minus the `(-1, -1)` and `(+1, +1)`
//! diagonals. Excluding the other diagonal pair gives a different (wrong)
//! topology, so [`HEX_DIRECTIONS`] is the single source of truth.
//!
//! [`BoardGraph::check_winner`] runs a multi-source breadth-first search from
//! every owned cell on the start edge and stops at the first dequeued cell on
//! the goal edge. Seeds are taken in increasing edge index and the queue is
//! FIFO, so a given board always yields the same path.

use std::collections::{HashMap, HashSet, VecDeque};

use serde::{Deserialize, Serialize};

use super::board::{Board, Cell, Position};

/// Neighbour deltas `(d_row, d_col)` in enumeration order.
pub const HEX_DIRECTIONS: [(isize, isize); 6] = [
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
];

/// Which pair of opposite edges a side must connect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// Column 0 to column N-1
    LeftRight,
    /// Row 0 to row N-1
    TopBottom,
}

impl Orientation {
    /// The `index`-th cell of the start edge.
    fn start_cell(&self, index: usize) -> Position {
        match self {
            Self::LeftRight => Position::new(index, 0),
            Self::TopBottom => Position::new(0, index),
        }
    }

    /// The `index`-th cell of the goal edge.
    fn goal_cell(&self, index: usize, size: usize) -> Position {
        match self {
            Self::LeftRight => Position::new(index, size - 1),
            Self::TopBottom => Position::new(size - 1, index),
        }
    }
}

/// A connected chain of same-owner cells joining two opposite edges.
///
/// Ordered from the start edge (first) to the goal edge (last); each
/// consecutive pair is hex-adjacent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WinningPath(Vec<Position>);

impl WinningPath {
    pub fn new(cells: Vec<Position>) -> Self {
        Self(cells)
    }

    pub fn cells(&self) -> &[Position] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Cell on the start edge.
    pub fn start(&self) -> Option<Position> {
        self.0.first().copied()
    }

    /// Cell on the goal edge.
    pub fn goal(&self) -> Option<Position> {
        self.0.last().copied()
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.0.contains(&pos)
    }

    /// Check every consecutive pair is hex-adjacent.
    pub fn is_contiguous(&self) -> bool {
        self.0.windows(2).all(|w| are_adjacent(w[0], w[1]))
    }
}

impl From<WinningPath> for Vec<Position> {
    fn from(path: WinningPath) -> Self {
        path.0
    }
}

/// Check if two positions are hex neighbours.
pub fn are_adjacent(a: Position, b: Position) -> bool {
    let d_row = b.row as isize - a.row as isize;
    let d_col = b.col as isize - a.col as isize;
    HEX_DIRECTIONS.contains(&(d_row, d_col))
}

/// Read-only graph view of a board.
#[derive(Debug, Clone, Copy)]
pub struct BoardGraph<'a> {
    board: &'a Board,
}

impl<'a> BoardGraph<'a> {
    pub fn new(board: &'a Board) -> Self {
        Self { board }
    }

    /// On-board hex neighbours of `pos`, in [`HEX_DIRECTIONS`] order.
    pub fn neighbors(&self, pos: Position) -> impl Iterator<Item = Position> + 'a {
        let board = self.board;
        HEX_DIRECTIONS
            .into_iter()
            .filter_map(move |(d_row, d_col)| pos.offset(d_row, d_col))
            .filter(move |p| board.contains(*p))
    }

    /// Start-edge cells holding `cell`, in increasing edge index.
    pub fn frontier_seeds(&self, cell: Cell, orientation: Orientation) -> Vec<Position> {
        (0..self.board.size())
            .map(|i| orientation.start_cell(i))
            .filter(|p| self.board.get(*p) == Some(cell))
            .collect()
    }

    /// Goal-edge cells holding `cell`.
    pub fn goal_set(&self, cell: Cell, orientation: Orientation) -> HashSet<Position> {
        let size = self.board.size();
        (0..size)
            .map(|i| orientation.goal_cell(i, size))
            .filter(|p| self.board.get(*p) == Some(cell))
            .collect()
    }

    /// Search for a chain of `cell` joining the edges of `orientation`.
    ///
    /// Returns `None` without searching when either edge holds no `cell`.
    pub fn check_winner(&self, cell: Cell, orientation: Orientation) -> Option<WinningPath> {
        if cell.is_empty() || self.board.size() == 0 {
            return None;
        }

        let seeds = self.frontier_seeds(cell, orientation);
        let goal = self.goal_set(cell, orientation);
        if seeds.is_empty() || goal.is_empty() {
            return None;
        }

        let mut visited: HashSet<Position> = seeds.iter().copied().collect();
        let mut parents: HashMap<Position, Position> = HashMap::new();
        let mut queue: VecDeque<Position> = seeds.into_iter().collect();

        while let Some(current) = queue.pop_front() {
            if goal.contains(&current) {
                return Some(Self::reconstruct(&parents, current));
            }

            for next in self.neighbors(current) {
                if self.board.get(next) == Some(cell) && visited.insert(next) {
                    parents.insert(next, current);
                    queue.push_back(next);
                }
            }
        }

        None
    }

    /// Walk parent links back to the seed, then flip to seed-first order.
    fn reconstruct(parents: &HashMap<Position, Position>, end: Position) -> WinningPath {
        let mut cells = vec![end];
        let mut current = end;
        while let Some(&prev) = parents.get(&current) {
            cells.push(prev);
            current = prev;
        }
        cells.reverse();
        WinningPath::new(cells)
    }
}
