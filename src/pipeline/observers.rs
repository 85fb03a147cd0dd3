//! Observer pattern for training pipelines
//!
//! Observers allow composable data collection during training without coupling
//! training logic to specific output formats.

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use super::statistics::BlockSummary;
use crate::{
    Result,
    ports::Observer,
    threes::{EpisodeRecord, Rank, Reward},
};

/// Progress bar observer - Shows training progress
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    completed: u64,
    last_average: f64,
}

impl ProgressObserver {
    /// Create a new progress observer
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            completed: 0,
            last_average: 0.0,
        }
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_training_start(&mut self, total_episodes: usize) -> Result<()> {
        let pb = ProgressBar::new(total_episodes as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} episodes ({msg})")
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_episode_end(&mut self, _episode_num: usize, record: &EpisodeRecord) -> Result<()> {
        self.completed += 1;
        if let Some(pb) = &self.progress_bar {
            pb.set_position(self.completed);
            pb.set_message(format!("last {} avg {:.0}", record.score, self.last_average));
        }
        Ok(())
    }

    fn on_block_end(&mut self, summary: &BlockSummary) -> Result<()> {
        self.last_average = summary.average_score;
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(format!("avg {:.0}", self.last_average));
        }
        Ok(())
    }
}

/// Metrics observer - Tracks running training metrics
pub struct MetricsObserver {
    total_episodes: usize,
    total_score: Reward,
    best_score: Reward,
    best_rank: Rank,
    slide_counts: Vec<usize>,
    blocks: usize,
}

impl MetricsObserver {
    /// Create a new metrics observer
    pub fn new() -> Self {
        Self {
            total_episodes: 0,
            total_score: 0,
            best_score: 0,
            best_rank: 0,
            slide_counts: Vec::new(),
            blocks: 0,
        }
    }

    /// Get current average score
    pub fn average_score(&self) -> f64 {
        if self.total_episodes == 0 {
            0.0
        } else {
            self.total_score as f64 / self.total_episodes as f64
        }
    }

    /// Get average episode length in player slides
    pub fn avg_episode_length(&self) -> f64 {
        if self.slide_counts.is_empty() {
            0.0
        } else {
            self.slide_counts.iter().sum::<usize>() as f64 / self.slide_counts.len() as f64
        }
    }

    /// Get metrics summary
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            total_episodes: self.total_episodes,
            average_score: self.average_score(),
            best_score: self.best_score,
            best_rank: self.best_rank,
            avg_episode_length: self.avg_episode_length(),
            blocks: self.blocks,
        }
    }
}

/// Summary of training metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub total_episodes: usize,
    pub average_score: f64,
    pub best_score: Reward,
    pub best_rank: Rank,
    pub avg_episode_length: f64,
    pub blocks: usize,
}

impl Default for MetricsObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for MetricsObserver {
    fn on_episode_end(&mut self, _episode_num: usize, record: &EpisodeRecord) -> Result<()> {
        self.total_episodes += 1;
        self.total_score += record.score;
        self.best_score = self.best_score.max(record.score);
        self.best_rank = self.best_rank.max(record.max_rank);
        self.slide_counts.push(record.slides);
        Ok(())
    }

    fn on_block_end(&mut self, _summary: &BlockSummary) -> Result<()> {
        self.blocks += 1;
        Ok(())
    }
}
