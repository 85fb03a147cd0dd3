//! Training pipeline: the player and the environment taking turns on one board

use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::statistics::{BlockSummary, TrainingResult};
use crate::{
    Error, Result,
    ports::{Agent, Observer},
    threes::{CELLS, Episode, EpisodeRecord},
};

/// Training configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Number of episodes the run should reach (including resumed ones)
    pub total: usize,

    /// Episodes per statistics block (0 = one block of `total`)
    pub block: usize,

    /// Maximum player slides per episode (0 = unlimited)
    pub limit: usize,

    /// Environment placements before the player's first move
    pub initial_tiles: usize,
}

impl TrainingConfig {
    /// Effective block length
    pub fn block_size(&self) -> usize {
        if self.block == 0 {
            self.total.max(1)
        } else {
            self.block
        }
    }

    fn validate(&self) -> Result<()> {
        if self.initial_tiles > CELLS {
            return Err(Error::InvalidConfiguration {
                message: format!(
                    "initial_tiles = {} exceeds the {CELLS} board cells",
                    self.initial_tiles
                ),
            });
        }
        Ok(())
    }
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            total: 1000,
            block: 0,
            limit: 0,
            initial_tiles: 9,
        }
    }
}

/// Training pipeline for the player against an environment
pub struct TrainingPipeline {
    config: TrainingConfig,
    observers: Vec<Box<dyn Observer>>,
    history: TrainingResult,
}

impl TrainingPipeline {
    /// Create a new training pipeline
    pub fn new(config: TrainingConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
            history: TrainingResult::new(),
        }
    }

    /// Add an observer to the pipeline
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Continue from earlier statistics; only the missing episodes are played.
    pub fn with_history(mut self, history: TrainingResult) -> Self {
        self.history = history;
        self
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Play episodes until the configured total is reached.
    ///
    /// The returned result includes any history the pipeline was resumed from.
    pub fn run(
        &mut self,
        player: &mut dyn Agent,
        environment: &mut dyn Agent,
    ) -> Result<TrainingResult> {
        self.config.validate()?;

        let mut result = std::mem::take(&mut self.history);
        let start = result.total_episodes();
        let remaining = self.config.total.saturating_sub(start);
        let block = self.config.block_size();

        // Notify observers of training start
        for observer in &mut self.observers {
            observer.on_training_start(remaining)?;
        }

        for episode_num in start..self.config.total {
            for observer in &mut self.observers {
                observer.on_episode_start(episode_num)?;
            }

            let record = self.play_episode(player, environment)?;
            debug!(
                "episode {} ({}:{}) score = {}, max rank = {}, slides = {}",
                episode_num + 1,
                player.name(),
                environment.name(),
                record.score,
                record.max_rank,
                record.slides
            );
            result.records.push(record);

            for observer in &mut self.observers {
                observer.on_episode_end(episode_num, &record)?;
            }

            let played = episode_num + 1;
            if played % block == 0 || played == self.config.total {
                let block_start = (played - 1) / block * block;
                let summary = BlockSummary::from_records(played, &result.records[block_start..]);
                info!(
                    "{} episodes: avg = {:.0}, max = {}, ops = {:.0}",
                    played, summary.average_score, summary.max_score, summary.moves_per_second
                );
                for observer in &mut self.observers {
                    observer.on_block_end(&summary)?;
                }
                result.blocks.push(summary);
            }
        }

        // Notify observers of training end
        for observer in &mut self.observers {
            observer.on_training_end()?;
        }

        Ok(result)
    }

    /// Play one episode to termination (or the slide limit).
    ///
    /// After each legal player slide the environment places a tile and the
    /// player learns from the board it acted on and the board it now faces.
    pub fn play_episode(
        &self,
        player: &mut dyn Agent,
        environment: &mut dyn Agent,
    ) -> Result<EpisodeRecord> {
        let mut episode = Episode::new();
        player.open_episode();
        environment.open_episode();

        for _ in 0..self.config.initial_tiles {
            let action = environment.take_action(episode.board());
            episode.apply(action)?;
        }

        loop {
            if self.config.limit > 0 && episode.slides() >= self.config.limit {
                break;
            }
            let before = *episode.board();
            let action = player.take_action(&before);
            if !episode.apply(action)? {
                break;
            }
            let placement = environment.take_action(episode.board());
            episode.apply(placement)?;
            player.learn(&before, episode.board())?;
        }

        episode.close();
        player.close_episode();
        environment.close_episode();
        Ok(episode.record())
    }
}
