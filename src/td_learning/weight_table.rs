//! Weight table: one dense array of learned values per tuple pattern

use crate::ntuple::TABLE_SIZE;

/// Per-pattern lookup arrays indexed by feature index
///
/// Entries never written read as zero.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightTable {
    tables: Vec<Vec<f32>>,
}

impl WeightTable {
    /// Create `count` zero-initialised tables of [`TABLE_SIZE`] entries
    pub fn zeroed(count: usize) -> Self {
        Self {
            tables: vec![vec![0.0; TABLE_SIZE]; count],
        }
    }

    /// Wrap already-populated tables (used when loading from storage)
    pub fn from_tables(tables: Vec<Vec<f32>>) -> Self {
        Self { tables }
    }

    /// Number of pattern tables
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Value stored for `feature` in the table of `pattern`
    pub fn get(&self, pattern: usize, feature: usize) -> f32 {
        self.tables[pattern][feature]
    }

    /// Add `delta` to one entry
    pub fn accumulate(&mut self, pattern: usize, feature: usize, delta: f32) {
        self.tables[pattern][feature] += delta;
    }

    /// Sum of the entries selected by one feature index per pattern
    pub fn sum(&self, features: &[usize]) -> f32 {
        debug_assert_eq!(features.len(), self.tables.len());
        features
            .iter()
            .zip(&self.tables)
            .map(|(&feature, table)| table[feature])
            .sum()
    }

    /// Raw entries of one table
    pub fn table(&self, pattern: usize) -> &[f32] {
        &self.tables[pattern]
    }

    pub fn tables(&self) -> impl Iterator<Item = &[f32]> {
        self.tables.iter().map(Vec::as_slice)
    }

    /// Count of non-zero entries across all tables
    pub fn populated(&self) -> usize {
        self.tables
            .iter()
            .map(|table| table.iter().filter(|value| **value != 0.0).count())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zeroed_initialization() {
        let weights = WeightTable::zeroed(8);
        assert_eq!(weights.len(), 8);
        assert_eq!(weights.table(3).len(), TABLE_SIZE);
        assert_eq!(weights.get(7, 50624), 0.0);
        assert_eq!(weights.populated(), 0);
    }

    #[test]
    fn test_accumulate_and_get() {
        let mut weights = WeightTable::zeroed(2);
        weights.accumulate(1, 42, 1.5);
        weights.accumulate(1, 42, -0.5);
        assert_eq!(weights.get(1, 42), 1.0);
        assert_eq!(weights.get(0, 42), 0.0);
        assert_eq!(weights.populated(), 1);
    }

    #[test]
    fn test_sum_selects_one_entry_per_table() {
        let mut weights = WeightTable::zeroed(3);
        weights.accumulate(0, 1, 1.0);
        weights.accumulate(1, 2, 2.0);
        weights.accumulate(2, 3, 4.0);
        assert_eq!(weights.sum(&[1, 2, 3]), 7.0);
        assert_eq!(weights.sum(&[1, 0, 3]), 5.0);
    }
}
