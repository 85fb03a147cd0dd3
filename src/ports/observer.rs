//! Observer port - abstraction for training observation and data collection
//!
//! This port defines the interface for observing training events,
//! allowing composable data collection without coupling the training
//! loop to specific output formats or metrics.

use crate::{Result, pipeline::BlockSummary, threes::EpisodeRecord};

/// Observer trait for monitoring training
///
/// # Event Sequence
///
/// The observer methods are called in the following order:
/// 1. `on_training_start(total_episodes)` - Once at the beginning
/// 2. For each episode:
///    - `on_episode_start(episode_num)`
///    - `on_episode_end(episode_num, record)`
///    - `on_block_end(summary)` - When the episode completes a statistics block
/// 3. `on_training_end()` - Once at the end
///
/// # Examples
///
/// ```no_run
/// use threes_td::{ports::Observer, threes::EpisodeRecord};
///
/// struct BestScore {
///     best: u64,
/// }
///
/// impl Observer for BestScore {
///     fn on_episode_end(
///         &mut self,
///         _episode_num: usize,
///         record: &EpisodeRecord,
///     ) -> threes_td::Result<()> {
///         self.best = self.best.max(record.score);
///         Ok(())
///     }
/// }
/// ```
pub trait Observer: Send {
    /// Called when training starts.
    ///
    /// # Parameters
    ///
    /// * `total_episodes` - Number of episodes this run will play
    fn on_training_start(&mut self, _total_episodes: usize) -> Result<()> {
        Ok(())
    }

    /// Called when an episode starts (0-based index).
    fn on_episode_start(&mut self, _episode_num: usize) -> Result<()> {
        Ok(())
    }

    /// Called when an episode ends with its summary record.
    fn on_episode_end(&mut self, _episode_num: usize, _record: &EpisodeRecord) -> Result<()> {
        Ok(())
    }

    /// Called each time a block of episodes completes.
    fn on_block_end(&mut self, _summary: &BlockSummary) -> Result<()> {
        Ok(())
    }

    /// Called when training completes.
    ///
    /// Use this to finalize outputs or display summaries.
    fn on_training_end(&mut self) -> Result<()> {
        Ok(())
    }
}
