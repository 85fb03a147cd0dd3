//! Actions exchanged between agents and the episode

use std::fmt;

use serde::{Deserialize, Serialize};

use super::board::{Direction, Rank};

/// A move produced by an agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Slide the whole board
    Slide(Direction),
    /// Put a tile of `rank` into `position`
    Place { position: usize, rank: Rank },
    /// The agent has nothing to do; ends the episode when it comes from the player
    NoOp,
}

impl Action {
    pub fn is_noop(&self) -> bool {
        matches!(self, Action::NoOp)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Slide(direction) => write!(f, "#{direction}"),
            Action::Place { position, rank } => write!(f, "{position}@{rank}"),
            Action::NoOp => f.write_str("??"),
        }
    }
}
