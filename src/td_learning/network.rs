//! Linear n-tuple value function
//!
//! `V(board) = sum_p weights[p][feature(board, p)]`

use crate::{
    Result,
    ntuple::PatternSet,
    td_learning::WeightTable,
    threes::{Board, Direction, Reward},
};

/// Best slide found by a one-ply lookahead
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lookahead {
    pub direction: Direction,
    pub reward: Reward,
    /// `reward + V(board after the slide)`
    pub score: f32,
}

/// A pattern set paired with its weight tables
#[derive(Debug, Clone, PartialEq)]
pub struct NTupleNetwork {
    patterns: PatternSet,
    weights: WeightTable,
}

impl NTupleNetwork {
    /// Fresh zero-valued network over `patterns`
    pub fn new(patterns: PatternSet) -> Self {
        Self {
            weights: WeightTable::zeroed(patterns.len()),
            patterns,
        }
    }

    /// Network over loaded weights; the table count selects the pattern prefix.
    pub fn from_weights(weights: WeightTable) -> Result<Self> {
        let patterns = PatternSet::first(weights.len())?;
        Ok(Self { patterns, weights })
    }

    pub fn patterns(&self) -> &PatternSet {
        &self.patterns
    }

    pub fn weights(&self) -> &WeightTable {
        &self.weights
    }

    pub fn features(&self, board: &Board) -> Vec<usize> {
        self.patterns.features(board)
    }

    /// Value estimate of a board
    pub fn value(&self, board: &Board) -> f32 {
        self.weights.sum(&self.features(board))
    }

    /// Add the same `delta` to the entry each pattern selects
    pub fn adjust(&mut self, features: &[usize], delta: f32) {
        for (pattern, &feature) in features.iter().enumerate() {
            self.weights.accumulate(pattern, feature, delta);
        }
    }

    /// Greedy one-ply lookahead from `board`.
    ///
    /// Each direction is simulated on a copy. Ties keep the earliest direction
    /// in canonical order. Returns `None` when no slide is legal.
    pub fn best_slide(&self, board: &Board) -> Option<Lookahead> {
        let mut best: Option<Lookahead> = None;
        for direction in Direction::ALL {
            let mut after = *board;
            let Some(reward) = after.slide(direction) else {
                continue;
            };
            let score = reward as f32 + self.value(&after);
            if best.is_none_or(|current| score > current.score) {
                best = Some(Lookahead {
                    direction,
                    reward,
                    score,
                });
            }
        }
        best
    }
}
