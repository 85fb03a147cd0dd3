//! Episode statistics: per-block summaries and whole-run results

use std::{collections::BTreeMap, fmt, fs::File, io::BufWriter, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    threes::{EpisodeRecord, Rank, Reward, tile_score},
};

/// Aggregate over one block of consecutive episodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockSummary {
    /// Number of episodes played when the block closed (1-based)
    pub end_episode: usize,
    /// Episodes in this block
    pub episodes: usize,
    pub average_score: f64,
    pub max_score: Reward,
    /// Slides plus placements per second of episode wall time
    pub moves_per_second: f64,
    /// How many episodes finished with each max rank
    pub max_rank_counts: BTreeMap<Rank, usize>,
}

impl BlockSummary {
    /// Summarise `records`, the block ending at episode `end_episode`.
    pub fn from_records(end_episode: usize, records: &[EpisodeRecord]) -> Self {
        let episodes = records.len();
        let total_score: Reward = records.iter().map(|r| r.score).sum();
        let max_score = records.iter().map(|r| r.score).max().unwrap_or(0);
        let moves: usize = records.iter().map(|r| r.slides + r.placements).sum();
        let duration_ms: u64 = records.iter().map(|r| r.duration_ms).sum();

        let mut max_rank_counts = BTreeMap::new();
        for record in records {
            *max_rank_counts.entry(record.max_rank).or_insert(0) += 1;
        }

        Self {
            end_episode,
            episodes,
            average_score: if episodes > 0 {
                total_score as f64 / episodes as f64
            } else {
                0.0
            },
            max_score,
            moves_per_second: if duration_ms > 0 {
                moves as f64 * 1000.0 / duration_ms as f64
            } else {
                0.0
            },
            max_rank_counts,
        }
    }

    /// Per max rank, ascending: (rank, share reaching at least it, share ending exactly on it)
    pub fn reach_distribution(&self) -> Vec<(Rank, f64, f64)> {
        if self.episodes == 0 {
            return Vec::new();
        }
        let total = self.episodes as f64;
        let mut at_least = self.episodes;
        let mut rows = Vec::with_capacity(self.max_rank_counts.len());
        for (&rank, &count) in &self.max_rank_counts {
            rows.push((rank, at_least as f64 / total, count as f64 / total));
            at_least -= count;
        }
        rows
    }
}

impl fmt::Display for BlockSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{}\tavg = {:.0}, max = {}, ops = {:.0}",
            self.end_episode, self.average_score, self.max_score, self.moves_per_second
        )?;
        for (rank, reached, exact) in self.reach_distribution() {
            writeln!(
                f,
                "\t{}\t{:.1}%\t({:.1}%)",
                tile_score(rank),
                reached * 100.0,
                exact * 100.0
            )?;
        }
        Ok(())
    }
}

/// Result of a training run
///
/// Saved as JSON so a later run can pick up where this one stopped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingResult {
    /// Every finished episode, in order
    pub records: Vec<EpisodeRecord>,
    /// Every closed statistics block, in order
    pub blocks: Vec<BlockSummary>,
}

impl TrainingResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of finished episodes
    pub fn total_episodes(&self) -> usize {
        self.records.len()
    }

    pub fn average_score(&self) -> f64 {
        if self.records.is_empty() {
            0.0
        } else {
            self.records.iter().map(|r| r.score as f64).sum::<f64>() / self.records.len() as f64
        }
    }

    pub fn max_score(&self) -> Reward {
        self.records.iter().map(|r| r.score).max().unwrap_or(0)
    }

    /// Highest rank reached in any episode
    pub fn max_rank(&self) -> Rank {
        self.records.iter().map(|r| r.max_rank).max().unwrap_or(0)
    }

    /// Summary over every recorded episode
    pub fn overall(&self) -> BlockSummary {
        BlockSummary::from_records(self.records.len(), &self.records)
    }

    /// Append another run's episodes and blocks after this one's.
    pub fn merge(&mut self, other: TrainingResult) {
        let offset = self.records.len();
        self.records.extend(other.records);
        self.blocks.extend(other.blocks.into_iter().map(|mut block| {
            block.end_episode += offset;
            block
        }));
    }

    /// Save result to JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create statistics file {path:?}"),
            source,
        })?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        Ok(())
    }

    /// Load result from JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::Io {
            operation: format!("open statistics file {path:?}"),
            source,
        })?;
        let result = serde_json::from_reader(std::io::BufReader::new(file))?;
        Ok(result)
    }
}
