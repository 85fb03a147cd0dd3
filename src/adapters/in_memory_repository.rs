//! In-memory weight repository for testing.
//!
//! This adapter provides a pure in-memory implementation of WeightRepository,
//! enabling fast tests without any file system I/O. Tables are stored in their
//! encoded binary form so the codec is exercised on every round-trip.

use std::{
    collections::HashMap,
    path::Path,
    sync::{Arc, Mutex},
};

use crate::{
    Result,
    error::Error,
    ports::WeightRepository,
    td_learning::{WeightTable, serialization},
};

/// In-memory repository for testing.
///
/// # Examples
///
/// ```
/// use threes_td::adapters::InMemoryRepository;
/// use threes_td::ports::WeightRepository;
/// use threes_td::td_learning::WeightTable;
/// use std::path::Path;
///
/// let repo = InMemoryRepository::new();
/// let weights = WeightTable::zeroed(8);
///
/// repo.save(&weights, Path::new("weights"))?;
/// let loaded = repo.load(Path::new("weights"))?;
/// assert_eq!(loaded, weights);
/// # Ok::<(), threes_td::Error>(())
/// ```
///
/// # Thread Safety
///
/// All clones share the same underlying storage.
#[derive(Clone)]
pub struct InMemoryRepository {
    storage: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl InMemoryRepository {
    /// Create a new empty in-memory repository.
    pub fn new() -> Self {
        Self {
            storage: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Get the number of weight files currently stored.
    pub fn count(&self) -> usize {
        self.storage.lock().unwrap().len()
    }

    /// Clear all stored weights.
    pub fn clear(&self) {
        self.storage.lock().unwrap().clear();
    }

    /// Check if weights exist at the given path.
    pub fn contains(&self, path: &Path) -> bool {
        let key = path.to_string_lossy().to_string();
        self.storage.lock().unwrap().contains_key(&key)
    }

    /// Store raw bytes at `path`, bypassing the encoder.
    pub fn insert_raw(&self, path: &Path, bytes: Vec<u8>) {
        let key = path.to_string_lossy().to_string();
        self.storage.lock().unwrap().insert(key, bytes);
    }
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl WeightRepository for InMemoryRepository {
    fn save(&self, weights: &WeightTable, path: &Path) -> Result<()> {
        let bytes = serialization::encode_weights(weights)?;
        self.insert_raw(path, bytes);
        Ok(())
    }

    fn load(&self, path: &Path) -> Result<WeightTable> {
        let key = path.to_string_lossy().to_string();
        let storage = self.storage.lock().unwrap();

        let bytes = storage.get(&key).ok_or_else(|| Error::MissingWeights {
            path: key.clone(),
        })?;

        serialization::decode_weights(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_save_and_load() {
        let repo = InMemoryRepository::new();
        let mut weights = WeightTable::zeroed(4);
        weights.accumulate(1, 10, 2.5);

        let path = Path::new("weights");

        assert_eq!(repo.count(), 0);
        assert!(!repo.contains(path));

        repo.save(&weights, path).unwrap();
        assert_eq!(repo.count(), 1);
        assert!(repo.contains(path));

        let loaded = repo.load(path).unwrap();
        assert_eq!(loaded.get(1, 10), 2.5);
    }

    #[test]
    fn test_load_nonexistent_returns_error() {
        let repo = InMemoryRepository::new();
        let result = repo.load(Path::new("nonexistent"));
        assert!(matches!(result, Err(Error::MissingWeights { .. })));
    }

    #[test]
    fn test_clear_removes_all() {
        let repo = InMemoryRepository::new();
        let weights = WeightTable::zeroed(1);

        repo.save(&weights, Path::new("w1")).unwrap();
        repo.save(&weights, Path::new("w2")).unwrap();
        assert_eq!(repo.count(), 2);

        repo.clear();
        assert_eq!(repo.count(), 0);
    }

    #[test]
    fn test_clone_shares_storage() {
        let repo1 = InMemoryRepository::new();
        let repo2 = repo1.clone();

        let weights = WeightTable::zeroed(2);
        let path = Path::new("shared");

        repo1.save(&weights, path).unwrap();
        let loaded = repo2.load(path).unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(repo2.count(), 1);
    }
}
