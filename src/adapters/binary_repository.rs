//! Binary file implementation of the weight repository.
//!
//! This adapter implements the WeightRepository port on top of the weight file
//! codec in `td_learning::serialization`.

use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::Path,
};

use log::info;

use crate::{
    Result,
    error::Error,
    ports::WeightRepository,
    td_learning::{WeightTable, serialization},
};

/// File-backed weight repository.
///
/// # Examples
///
/// ```no_run
/// use threes_td::adapters::BinaryWeightRepository;
/// use threes_td::ports::WeightRepository;
/// use threes_td::td_learning::WeightTable;
/// use std::path::Path;
///
/// let repo = BinaryWeightRepository;
/// let weights = WeightTable::zeroed(8);
///
/// repo.save(&weights, Path::new("weights.bin"))?;
/// let loaded = repo.load(Path::new("weights.bin"))?;
/// assert_eq!(loaded.len(), 8);
/// # Ok::<(), threes_td::Error>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct BinaryWeightRepository;

impl BinaryWeightRepository {
    /// Create a new binary repository.
    pub fn new() -> Self {
        Self
    }
}

impl WeightRepository for BinaryWeightRepository {
    fn save(&self, weights: &WeightTable, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create file {path:?}"),
            source,
        })?;
        let mut writer = BufWriter::new(file);
        serialization::write_weights(&mut writer, weights)?;
        info!("saved {} weight tables to {}", weights.len(), path.display());
        Ok(())
    }

    fn load(&self, path: &Path) -> Result<WeightTable> {
        let file = File::open(path).map_err(|source| Error::Io {
            operation: format!("open file {path:?}"),
            source,
        })?;
        let mut reader = BufReader::new(file);
        let weights = serialization::read_weights(&mut reader)?;
        info!("loaded {} weight tables from {}", weights.len(), path.display());
        Ok(weights)
    }
}
