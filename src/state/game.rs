//! Match state management.
//!
//! Owns the board, the two seats, whose turn it is and the lifecycle phase.
//! Local moves are validated here and produce the [`MoveOutcome`] that the
//! network layer relays; the opponent's outcome comes back through
//! [`MatchState::apply_remote_move`].
//!
//! Calls must be serialized by the host. Nothing here locks, blocks or does
//! I/O.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::board::{Board, Cell, Position};
use super::config::{ConfigError, MatchConfig};
use super::graph::{BoardGraph, WinningPath};
use super::outcome::{MoveOutcome, OutcomeError, OutcomeMessage};
use super::phase::{InvalidTransition, MatchPhase, PhaseEvent, PhaseMachine};
use super::player::{Player, Seat};

/// Notification pushed after every accepted mutation.
///
/// Hosts poll these with [`MatchState::drain_events`] to refresh whatever
/// they display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchEvent {
    Started { first_turn: Seat, local_seat: Seat },
    CellMarked { seat: Seat, position: Position },
    Ended { winner: Seat, winning_path: WinningPath },
    Withdrawn,
    Reset,
}

/// A single two-player match.
#[derive(Debug, Clone)]
pub struct MatchState {
    config: MatchConfig,

    board: Board,

    phase: PhaseMachine,

    /// Seat one, left to right
    player_one: Option<Arc<Player>>,

    /// Seat two, top to bottom
    player_two: Option<Arc<Player>>,

    /// Seat driven by this process
    local_seat: Option<Seat>,

    current_turn: Option<Seat>,

    winner: Option<Seat>,

    winning_path: Option<WinningPath>,

    /// Cells marked since start
    move_count: usize,

    started_at: Option<DateTime<Utc>>,

    ended_at: Option<DateTime<Utc>>,

    /// Undrained notifications
    events: Vec<MatchEvent>,
}

impl MatchState {
    /// Create a waiting match with an empty board.
    pub fn new(config: MatchConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_config(config))
    }

    fn with_config(config: MatchConfig) -> Self {
        Self {
            config,
            board: Board::new(config.board_size),
            phase: PhaseMachine::new(),
            player_one: None,
            player_two: None,
            local_seat: None,
            current_turn: None,
            winner: None,
            winning_path: None,
            move_count: 0,
            started_at: None,
            ended_at: None,
            events: Vec::new(),
        }
    }

    /// Seat both players and begin play.
    ///
    /// Only valid while waiting; a second start (duplicate notification,
    /// double click) is rejected and changes nothing.
    pub fn start(
        &mut self,
        player_one: Arc<Player>,
        player_two: Arc<Player>,
        first_turn: Seat,
        local_seat: Seat,
    ) -> Result<(), InvalidTransition> {
        if let Err(err) = self.phase.apply_mut(PhaseEvent::Start) {
            tracing::debug!("Ignoring start: {}", err);
            return Err(err);
        }

        tracing::info!(
            "Match started: {} vs {}, first turn {}, local seat {}",
            player_one.name,
            player_two.name,
            first_turn,
            local_seat
        );

        self.board.clear();
        self.player_one = Some(player_one);
        self.player_two = Some(player_two);
        self.local_seat = Some(local_seat);
        self.current_turn = Some(first_turn);
        self.winner = None;
        self.winning_path = None;
        self.move_count = 0;
        self.started_at = Some(Utc::now());
        self.ended_at = None;
        self.events.push(MatchEvent::Started {
            first_turn,
            local_seat,
        });

        Ok(())
    }

    /// Place the local player's mark at `(row, col)`.
    ///
    /// Returns `None` and leaves everything untouched if the match is not
    /// running, it is not the local seat's turn, or the cell is off the board
    /// or taken. Otherwise returns the outcome to relay to the opponent.
    pub fn apply_local_move(&mut self, row: usize, col: usize) -> Option<MoveOutcome> {
        if !self.phase.phase().is_running() {
            return None;
        }
        let seat = self.current_turn?;
        if self.local_seat != Some(seat) {
            return None;
        }

        let position = Position::new(row, col);
        if let Err(err) = self.board.mark(position, seat.cell()) {
            tracing::debug!("Rejected local move for seat {}: {}", seat, err);
            return None;
        }
        self.record_mark(seat, position);

        let found = BoardGraph::new(&self.board).check_winner(seat.cell(), seat.orientation());
        let outcome = match found {
            Some(winning_path) => {
                self.finish(seat, winning_path.clone());
                MoveOutcome::Finished {
                    marked_cell: Some(position),
                    winning_path,
                }
            }
            None => {
                self.switch_turn();
                MoveOutcome::Next {
                    marked_cell: position,
                }
            }
        };

        Some(outcome)
    }

    /// Replay the opponent's relayed outcome.
    ///
    /// The remote side already ran the win check, so a `"finished"` tag and
    /// its path are taken as given. Messages missing required fields, naming
    /// cells off the board, or naming cells the local seat holds are protocol
    /// errors and leave the match untouched. Outcomes arriving when the
    /// opponent is not to move are ignored with `Ok(None)`.
    pub fn apply_remote_move(
        &mut self,
        message: &OutcomeMessage,
    ) -> Result<Option<MoveOutcome>, OutcomeError> {
        let outcome = MoveOutcome::try_from(message.clone()).map_err(|err| {
            tracing::warn!("Malformed remote outcome: {}", err);
            err
        })?;

        let mover = match self.current_turn {
            Some(seat) if self.phase.phase().is_running() && self.local_seat != Some(seat) => {
                seat
            }
            _ => {
                tracing::debug!(
                    "Ignoring remote {} outcome in phase {}",
                    outcome.status().as_str(),
                    self.phase.phase()
                );
                return Ok(None);
            }
        };

        let to_mark = outcome.cells_to_mark();
        let path_cells = outcome.winning_path().map(WinningPath::cells).unwrap_or(&[]);
        for &pos in to_mark.iter().chain(path_cells) {
            self.check_remote_cell(pos, mover).map_err(|err| {
                tracing::warn!("Rejected remote outcome: {}", err);
                err
            })?;
        }

        for pos in to_mark {
            if self.board.is_empty_at(pos) {
                self.board.mark(pos, mover.cell())?;
                self.record_mark(mover, pos);
            }
        }

        match outcome.winning_path() {
            Some(path) => self.finish(mover, path.clone()),
            None => self.switch_turn(),
        }

        Ok(Some(outcome))
    }

    /// End the match without a winner because a player left.
    ///
    /// Returns `false` (and does nothing) when the match is already over.
    pub fn withdraw(&mut self) -> bool {
        if let Err(err) = self.phase.apply_mut(PhaseEvent::Withdraw) {
            tracing::debug!("Ignoring withdraw: {}", err);
            return false;
        }

        tracing::info!("Match withdrawn");
        self.winner = None;
        self.winning_path = None;
        self.ended_at = Some(Utc::now());
        self.events.push(MatchEvent::Withdrawn);
        true
    }

    /// Opponent disconnected or forfeited.
    pub fn remote_withdraw(&mut self) -> bool {
        self.withdraw()
    }

    /// Back to waiting with an empty board and no players.
    pub fn reset(&mut self) {
        self.phase = PhaseMachine::new();

        self.board.clear();
        self.player_one = None;
        self.player_two = None;
        self.local_seat = None;
        self.current_turn = None;
        self.winner = None;
        self.winning_path = None;
        self.move_count = 0;
        self.started_at = None;
        self.ended_at = None;
        self.events.push(MatchEvent::Reset);
    }

    fn check_remote_cell(&self, pos: Position, mover: Seat) -> Result<(), OutcomeError> {
        match self.board.get(pos) {
            None => Err(OutcomeError::OutOfBounds(pos)),
            Some(cell) => match Seat::from_cell(cell) {
                Some(owner) if owner != mover => Err(OutcomeError::CellConflict(pos)),
                _ => Ok(()),
            },
        }
    }

    fn record_mark(&mut self, seat: Seat, position: Position) {
        tracing::debug!("Seat {} marked {}", seat, position);
        self.move_count += 1;
        self.events.push(MatchEvent::CellMarked { seat, position });
    }

    fn switch_turn(&mut self) {
        self.current_turn = self.current_turn.map(|seat| seat.other());
    }

    fn finish(&mut self, winner: Seat, winning_path: WinningPath) {
        if let Err(err) = self.phase.apply_mut(PhaseEvent::End) {
            tracing::debug!("Ignoring end: {}", err);
            return;
        }

        tracing::info!(
            "Match ended: seat {} connected in {} cells after {} moves",
            winner,
            winning_path.len(),
            self.move_count
        );
        self.winner = Some(winner);
        self.winning_path = Some(winning_path.clone());
        self.ended_at = Some(Utc::now());
        self.events.push(MatchEvent::Ended {
            winner,
            winning_path,
        });
    }

    /// Take all pending notifications.
    pub fn drain_events(&mut self) -> Vec<MatchEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn phase(&self) -> MatchPhase {
        self.phase.phase()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<Cell> {
        self.board.get(Position::new(row, col))
    }

    /// Get the player in a seat.
    pub fn player(&self, seat: Seat) -> Option<&Arc<Player>> {
        match seat {
            Seat::One => self.player_one.as_ref(),
            Seat::Two => self.player_two.as_ref(),
        }
    }

    pub fn local_seat(&self) -> Option<Seat> {
        self.local_seat
    }

    pub fn current_turn(&self) -> Option<Seat> {
        self.current_turn
    }

    /// Get the player to move.
    pub fn current_player(&self) -> Option<&Arc<Player>> {
        self.current_turn.and_then(|seat| self.player(seat))
    }

    /// Check if the local seat may move now.
    pub fn is_local_turn(&self) -> bool {
        self.phase().is_running()
            && self.current_turn.is_some()
            && self.current_turn == self.local_seat
    }

    pub fn winner(&self) -> Option<Seat> {
        self.winner
    }

    pub fn winner_player(&self) -> Option<&Arc<Player>> {
        self.winner.and_then(|seat| self.player(seat))
    }

    pub fn winning_path(&self) -> Option<&WinningPath> {
        self.winning_path.as_ref()
    }

    pub fn move_count(&self) -> usize {
        self.move_count
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    pub fn ended_at(&self) -> Option<DateTime<Utc>> {
        self.ended_at
    }

    /// Convert full match state to JSON snapshot.
    pub fn to_json(&self) -> serde_json::Value {
        let players: Vec<serde_json::Value> = [Seat::One, Seat::Two]
            .into_iter()
            .filter_map(|seat| {
                self.player(seat).map(|p| {
                    let mut obj = p.to_json();
                    obj["seat"] = serde_json::json!(seat.as_str());
                    obj["is_local"] = serde_json::json!(self.local_seat == Some(seat));
                    obj
                })
            })
            .collect();

        serde_json::json!({
            "phase": self.phase().as_str(),
            "board_size": self.board.size(),
            "board": self.board.to_json(),
            "players": players,
            "current_turn": self.current_turn.map(|s| s.as_str()),
            "winner": self.winner.map(|s| s.as_str()),
            "winning_path": self.winning_path,
            "move_count": self.move_count
        })
    }
}

impl Default for MatchState {
    fn default() -> Self {
        Self::with_config(MatchConfig::default())
    }
}
