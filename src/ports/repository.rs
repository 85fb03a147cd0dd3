//! Repository port for weight persistence.
//!
//! This module defines the trait boundary between the learning agent and the
//! storage backing its weight tables.

use std::path::Path;

use crate::{Result, td_learning::WeightTable};

/// Port for persisting and loading weight tables.
///
/// # Examples
///
/// ```no_run
/// use threes_td::ports::WeightRepository;
/// use threes_td::td_learning::WeightTable;
/// use std::path::Path;
///
/// fn save_weights<R: WeightRepository>(
///     repo: &R,
///     weights: &WeightTable,
///     path: &Path,
/// ) -> threes_td::Result<()> {
///     repo.save(weights, path)
/// }
/// ```
pub trait WeightRepository {
    /// Save weight tables to persistent storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the location cannot be written.
    fn save(&self, weights: &WeightTable, path: &Path) -> Result<()>;

    /// Load weight tables from persistent storage.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Nothing is stored at `path`
    /// - The stored data is malformed (no partial load is attempted)
    fn load(&self, path: &Path) -> Result<WeightTable>;
}
