//! Hex State Library
//!
//! This crate provides the game core for two-player Hex matches.
//!
//! # Overview
//!
//! The state module provides:
//!
//! - **Board** - A square grid of cells addressed by `(row, col)`. How a
//!   renderer lays the grid out as hexagons is up to the renderer.
//!
//! - **Win Detection** - Breadth-first search over hex adjacency from a seat's
//!   start edge to its goal edge, returning the connecting path.
//!
//! - **Match Lifecycle** - Waiting, running, ended or withdrawn, with
//!   validated transitions.
//!
//! - **Move Outcomes** - The message a local move produces and the opponent
//!   replays, serializable to JSON.
//!
//! # Design Principles
//!
//! 1. **Seats, not identities** - Seat one connects left to right, seat two
//!    top to bottom. Turn order is tracked by seat.
//!
//! 2. **Return values, not callbacks** - Mutations return outcomes and queue
//!    [`MatchEvent`]s; hosts poll them.
//!
//! 3. **No networking or rendering** - Pure in-memory state. Hosts serialize
//!    calls; nothing blocks.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use hex_state::state::{
//!     MatchConfig, MatchPhase, MatchState, MoveOutcome, Player, Seat,
//! };
//!
//! let alice = Arc::new(Player::new("Alice"));
//! let bob = Arc::new(Player::new("Bob"));
//!
//! // Alice's side of the match: she sits in seat one and moves first
//! let mut game = MatchState::new(MatchConfig::with_board_size(2)).unwrap();
//! game.start(alice, bob, Seat::One, Seat::One).unwrap();
//!
//! let outcome = game.apply_local_move(0, 0).unwrap();
//! let wire = outcome.to_message().to_json_string().unwrap();
//! assert_eq!(wire, r#"{"status":"next","marked_cell":[0,0]}"#);
//!
//! // Bob's reply arrives over the network
//! let reply = hex_state::state::OutcomeMessage::from_json_str(
//!     r#"{"status":"next","marked_cell":[1,0]}"#,
//! )
//! .unwrap();
//! game.apply_remote_move(&reply).unwrap();
//!
//! // Alice completes the top row and connects left to right
//! let outcome = game.apply_local_move(0, 1).unwrap();
//! assert!(matches!(outcome, MoveOutcome::Finished { .. }));
//! assert_eq!(game.phase(), MatchPhase::Ended);
//! assert_eq!(game.winner(), Some(Seat::One));
//! ```

pub mod state;

// Re-export everything from state module at crate root
pub use state::*;
