//! N-tuple feature hashing
//!
//! A tuple pattern is a fixed list of four board cells. The ranks found in
//! those cells are read as the digits of a base-15 number, which becomes the
//! lookup index into that pattern's weight table.
//!
//! The canonical pattern list holds 17 patterns in a fixed order: the 4 rows,
//! the 4 columns, then the 9 overlapping 2x2 squares. A [`PatternSet`] is a
//! prefix of that list; the default uses the first 8 (rows and columns).
//!
//! ```
//! use threes_td::{ntuple::PatternSet, threes::Board};
//!
//! let patterns = PatternSet::default();
//! let mut board = Board::new();
//! board.place(0, 1).unwrap();
//!
//! let features = patterns.features(&board);
//! assert_eq!(features.len(), 8);
//! assert_eq!(features[0], 15 * 15 * 15); // row 0 reads 1,0,0,0
//! ```

use crate::{
    Error, Result,
    threes::{Board, CELLS},
};

/// Number of cells in a tuple pattern
pub const TUPLE_LENGTH: usize = 4;

/// Ranks are read as base-15 digits
pub const RANK_BASE: usize = 15;

/// Number of distinct feature indices, 15^4
pub const FEATURE_SPACE: usize = RANK_BASE * RANK_BASE * RANK_BASE * RANK_BASE;

/// Allocated entries per weight table
pub const TABLE_SIZE: usize = 1 << 16;

/// Patterns used when no count is configured (rows and columns)
pub const DEFAULT_PATTERN_COUNT: usize = 8;

pub type TuplePattern = [usize; TUPLE_LENGTH];

/// Every known pattern, in canonical order
pub const FULL_PATTERNS: [TuplePattern; 17] = [
    // rows
    [0, 1, 2, 3],
    [4, 5, 6, 7],
    [8, 9, 10, 11],
    [12, 13, 14, 15],
    // columns
    [0, 4, 8, 12],
    [1, 5, 9, 13],
    [2, 6, 10, 14],
    [3, 7, 11, 15],
    // squares
    [0, 1, 4, 5],
    [1, 2, 5, 6],
    [2, 3, 6, 7],
    [4, 5, 8, 9],
    [5, 6, 9, 10],
    [6, 7, 10, 11],
    [8, 9, 12, 13],
    [9, 10, 13, 14],
    [10, 11, 14, 15],
];

/// Feature index of one pattern on a board.
///
/// Ranks must stay below 15; a higher rank breaks injectivity (and past rank
/// 16 can overflow [`TABLE_SIZE`]).
pub fn feature_index(board: &Board, pattern: &TuplePattern) -> usize {
    pattern.iter().fold(0, |index, &position| {
        let rank = usize::from(board[position]);
        debug_assert!(
            rank < RANK_BASE,
            "rank {rank} at cell {position} exceeds the feature digit range"
        );
        index * RANK_BASE + rank
    })
}

/// The configured prefix of [`FULL_PATTERNS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternSet {
    patterns: &'static [TuplePattern],
}

impl PatternSet {
    /// Use the first `count` canonical patterns.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPatternCount`] unless `1 <= count <= 17`.
    pub fn first(count: usize) -> Result<Self> {
        if count == 0 || count > FULL_PATTERNS.len() {
            return Err(Error::InvalidPatternCount {
                count,
                max: FULL_PATTERNS.len(),
            });
        }
        Ok(Self {
            patterns: &FULL_PATTERNS[..count],
        })
    }

    /// All 17 patterns
    pub fn full() -> Self {
        Self {
            patterns: &FULL_PATTERNS,
        }
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn patterns(&self) -> &'static [TuplePattern] {
        self.patterns
    }

    /// Feature index of every pattern, in pattern order
    pub fn features(&self, board: &Board) -> Vec<usize> {
        self.patterns
            .iter()
            .map(|pattern| feature_index(board, pattern))
            .collect()
    }
}

impl Default for PatternSet {
    fn default() -> Self {
        Self {
            patterns: &FULL_PATTERNS[..DEFAULT_PATTERN_COUNT],
        }
    }
}

// Patterns must address real cells.
const _: () = {
    let mut p = 0;
    while p < FULL_PATTERNS.len() {
        let mut c = 0;
        while c < TUPLE_LENGTH {
            assert!(FULL_PATTERNS[p][c] < CELLS);
            c += 1;
        }
        p += 1;
    }
};
