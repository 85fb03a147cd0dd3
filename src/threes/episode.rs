//! Episode bookkeeping: one game from an empty board to termination

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use super::{
    action::Action,
    board::{Board, Rank, Reward},
};
use crate::Result;

/// A single game in progress, with its history
#[derive(Debug, Clone)]
pub struct Episode {
    board: Board,
    score: Reward,
    actions: Vec<Action>,
    slides: usize,
    placements: usize,
    started: Instant,
    elapsed: Option<Duration>,
}

impl Episode {
    /// Start a new episode on an empty board
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            score: 0,
            actions: Vec::new(),
            slides: 0,
            placements: 0,
            started: Instant::now(),
            elapsed: None,
        }
    }

    /// Current board state
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Total reward collected so far
    pub fn score(&self) -> Reward {
        self.score
    }

    /// Every action that changed the board, in order
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Number of legal slides made by the player
    pub fn slides(&self) -> usize {
        self.slides
    }

    /// Number of tiles placed by the environment
    pub fn placements(&self) -> usize {
        self.placements
    }

    /// Apply an action to the board.
    ///
    /// Returns `Ok(false)` when the action did not change the board (an illegal
    /// slide or a no-op), which ends the player's turn sequence.
    ///
    /// # Errors
    ///
    /// Placement outside the board is a caller bug and is propagated.
    pub fn apply(&mut self, action: Action) -> Result<bool> {
        match action {
            Action::Slide(direction) => match self.board.slide(direction) {
                Some(reward) => {
                    self.score += reward;
                    self.slides += 1;
                }
                None => return Ok(false),
            },
            Action::Place { position, rank } => {
                self.board.place(position, rank)?;
                self.placements += 1;
            }
            Action::NoOp => return Ok(false),
        }
        self.actions.push(action);
        Ok(true)
    }

    /// Stop the episode clock. Calling it again keeps the first measurement.
    pub fn close(&mut self) {
        if self.elapsed.is_none() {
            self.elapsed = Some(self.started.elapsed());
        }
    }

    /// Wall time spent in the episode (up to now if still open)
    pub fn elapsed(&self) -> Duration {
        self.elapsed.unwrap_or_else(|| self.started.elapsed())
    }

    /// Compact summary for statistics
    pub fn record(&self) -> EpisodeRecord {
        EpisodeRecord {
            score: self.score,
            max_rank: self.board.max_rank(),
            slides: self.slides,
            placements: self.placements,
            duration_ms: self.elapsed().as_millis() as u64,
        }
    }
}

impl Default for Episode {
    fn default() -> Self {
        Self::new()
    }
}

/// Serializable summary of a finished episode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeRecord {
    pub score: Reward,
    pub max_rank: Rank,
    pub slides: usize,
    pub placements: usize,
    pub duration_ms: u64,
}
