//! State management module for Hex matches.
//!
//! This module provides the core state types:
//!
//! - `board` - Square cell grid with `(row, col)` addressing
//! - `graph` - Hex adjacency and edge-to-edge win detection
//! - `player` - Player identities and the two seats
//! - `phase` - Match lifecycle state machine
//! - `outcome` - Move outcome messages exchanged between peers
//! - `game` - The match itself: turns, local and remote moves
//! - `config` - Match settings
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                          MatchState                          │
//! │                                                              │
//! │  ┌──────────────┐   ┌──────────────┐   ┌─────────────────┐  │
//! │  │ PhaseMachine │   │    Board     │   │  Seat One / Two │  │
//! │  │              │   │              │   │                 │  │
//! │  │ Waiting      │   │ N × N Cell   │   │ Arc<Player>     │  │
//! │  │ Running      │   │              │   │ current turn    │  │
//! │  │ Ended        │   └──────┬───────┘   │ local seat      │  │
//! │  │ Withdrawn    │          │           └─────────────────┘  │
//! │  └──────────────┘          ▼                                │
//! │                     ┌──────────────┐                        │
//! │                     │  BoardGraph  │──▶ WinningPath         │
//! │                     └──────────────┘                        │
//! └──────────────────────────────────────────────────────────────┘
//!         │ MoveOutcome / OutcomeMessage          ▲
//!         ▼                                       │
//!    network layer ─────────────────────▶ apply_remote_move
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use hex_state::state::{MatchConfig, MatchState, Player, Seat};
//!
//! let mut game = MatchState::new(MatchConfig::with_board_size(7))?;
//! game.start(alice, bob, Seat::One, Seat::One)?;
//!
//! if let Some(outcome) = game.apply_local_move(3, 0) {
//!     transport.send(outcome.to_message().to_json_string()?);
//! }
//! ```

pub mod board;
pub mod config;
pub mod game;
pub mod graph;
pub mod outcome;
pub mod phase;
pub mod player;

// Re-export commonly used types
pub use board::{
    Board, Cell, MoveError, Position, DEFAULT_BOARD_SIZE, MAX_BOARD_SIZE, MIN_BOARD_SIZE,
};
pub use config::{ConfigError, MatchConfig};
pub use game::{MatchEvent, MatchState};
pub use graph::{are_adjacent, BoardGraph, Orientation, WinningPath, HEX_DIRECTIONS};
pub use outcome::{MatchStatus, MoveOutcome, OutcomeError, OutcomeMessage};
pub use phase::{InvalidTransition, MatchPhase, PhaseEvent, PhaseMachine};
pub use player::{Player, Seat};
