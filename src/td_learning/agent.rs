//! Greedy TD(0) player
//!
//! The player picks the slide maximising `reward + V(after-slide board)` and,
//! once the environment has answered, nudges `V(before)` toward the best
//! lookahead score available from the new board.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use log::error;

use crate::{
    Result,
    ports::{Agent, WeightRepository},
    td_learning::NTupleNetwork,
    threes::{Action, Board, Direction},
};

/// Learning rate used when none is configured
pub const DEFAULT_ALPHA: f32 = 0.1;

/// Where (and through what) the weights are written when the player is done.
struct SaveTarget {
    repository: Arc<dyn WeightRepository + Send + Sync>,
    path: PathBuf,
}

/// Weight-bearing player that learns online with TD(0)
///
/// If a save target is attached, the weights are written when the player is
/// dropped, so they survive early returns from the training loop.
pub struct TdPlayer {
    name: String,
    network: NTupleNetwork,
    alpha: f32,
    save_target: Option<SaveTarget>,
}

impl TdPlayer {
    /// Create a player over `network`
    ///
    /// # Arguments
    ///
    /// * `name` - Display name
    /// * `network` - Pattern set and weights
    /// * `alpha` - Learning rate; 0 disables learning
    pub fn new(name: impl Into<String>, network: NTupleNetwork, alpha: f32) -> Self {
        Self {
            name: name.into(),
            network,
            alpha,
            save_target: None,
        }
    }

    /// Save the weights to `path` through `repository` on [`TdPlayer::save`] and on drop.
    pub fn with_save_target(
        mut self,
        repository: Arc<dyn WeightRepository + Send + Sync>,
        path: impl Into<PathBuf>,
    ) -> Self {
        self.save_target = Some(SaveTarget {
            repository,
            path: path.into(),
        });
        self
    }

    pub fn network(&self) -> &NTupleNetwork {
        &self.network
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn save_path(&self) -> Option<&Path> {
        self.save_target.as_ref().map(|target| target.path.as_path())
    }

    /// Best legal slide from `board`, or `None` if the board is stuck
    pub fn select_direction(&self, board: &Board) -> Option<Direction> {
        self.network
            .best_slide(board)
            .map(|lookahead| lookahead.direction)
    }

    /// One TD(0) update from `before` toward the best lookahead from `after`.
    ///
    /// The target and the current estimate are both computed before any entry
    /// is touched, and every pattern receives the same delta. Returns the
    /// applied delta, or `None` when nothing was updated (learning disabled or
    /// `after` has no legal slide).
    pub fn td_update(&mut self, before: &Board, after: &Board) -> Option<f32> {
        if self.alpha == 0.0 {
            return None;
        }
        let target = self.network.best_slide(after)?.score;
        let features = self.network.features(before);
        let estimate = self.network.weights().sum(&features);
        let delta = self.alpha * (target - estimate);
        self.network.adjust(&features, delta);
        Some(delta)
    }

    /// Write the weights to the save target, if any.
    pub fn save(&self) -> Result<()> {
        if let Some(target) = &self.save_target {
            target
                .repository
                .save(self.network.weights(), &target.path)?;
        }
        Ok(())
    }

    /// Save once and detach the save target, so dropping the player writes nothing.
    pub fn finish(mut self) -> Result<()> {
        let result = self.save();
        self.save_target = None;
        result
    }
}

impl Agent for TdPlayer {
    fn take_action(&mut self, board: &Board) -> Action {
        match self.select_direction(board) {
            Some(direction) => Action::Slide(direction),
            None => Action::NoOp,
        }
    }

    fn learn(&mut self, before: &Board, after: &Board) -> Result<()> {
        self.td_update(before, after);
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn role(&self) -> &str {
        "player"
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

impl Drop for TdPlayer {
    fn drop(&mut self) {
        if let Err(err) = self.save() {
            error!("failed to save weights for {}: {err}", self.name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{adapters::InMemoryRepository, ntuple::PatternSet};

    fn player(alpha: f32) -> TdPlayer {
        TdPlayer::new("test", NTupleNetwork::new(PatternSet::default()), alpha)
    }

    #[test]
    fn test_take_action_on_stuck_board_is_noop() {
        let mut agent = player(0.1);
        assert_eq!(agent.take_action(&Board::new()), Action::NoOp);
    }

    #[test]
    fn test_ties_break_toward_lowest_direction() {
        let agent = player(0.1);
        // A lone 3 in the centre can move every way with no reward and zero value.
        let board = Board::from_cells([0, 0, 0, 0, 0, 3, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(agent.select_direction(&board), Some(Direction::Up));
    }

    #[test]
    fn test_td_update_uses_single_delta() {
        let mut agent = player(0.5);
        let before = Board::from_cells([1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
        let after = Board::from_cells([1, 2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);

        // target = 3 (merge reward), V(before) = 0
        let delta = agent.td_update(&before, &after).unwrap();
        assert_eq!(delta, 1.5);

        let features = agent.network().features(&before);
        for (pattern, &feature) in features.iter().enumerate() {
            assert_eq!(agent.network().weights().get(pattern, feature), 1.5);
        }
    }

    #[test]
    fn test_td_update_skips_terminal_after_state() {
        let mut agent = player(0.5);
        let before = Board::from_cells([1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(agent.td_update(&before, &Board::new()), None);
        assert_eq!(agent.network().weights().populated(), 0);
    }

    #[test]
    fn test_save_writes_through_repository() {
        let repo = InMemoryRepository::new();
        let agent = player(0.1).with_save_target(Arc::new(repo.clone()), "weights.bin");
        agent.save().unwrap();
        assert!(repo.contains(Path::new("weights.bin")));
    }

    #[test]
    fn test_drop_saves_weights() {
        let repo = InMemoryRepository::new();
        {
            let mut agent = player(0.5).with_save_target(Arc::new(repo.clone()), "dropped.bin");
            let before = Board::from_cells([1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
            let after = Board::from_cells([1, 2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
            agent.td_update(&before, &after);
        }
        let loaded = repo.load(Path::new("dropped.bin")).unwrap();
        assert_eq!(loaded.populated(), 8);
    }

    #[test]
    fn test_finish_saves_exactly_once() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        use crate::{Error, td_learning::WeightTable};

        struct CountingRepository(Arc<AtomicUsize>);

        impl WeightRepository for CountingRepository {
            fn save(&self, _weights: &WeightTable, _path: &Path) -> Result<()> {
                self.0.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }

            fn load(&self, path: &Path) -> Result<WeightTable> {
                Err(Error::MissingWeights {
                    path: path.display().to_string(),
                })
            }
        }

        let saves = Arc::new(AtomicUsize::new(0));
        let agent = player(0.1)
            .with_save_target(Arc::new(CountingRepository(Arc::clone(&saves))), "final.bin");
        agent.finish().unwrap();
        assert_eq!(saves.load(Ordering::SeqCst), 1);
    }
}
