//! Board state representation and slide/place semantics

use std::{fmt, ops::Index};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Tile tier stored in a cell; 0 means the cell is empty.
pub type Rank = u8;

/// Points awarded by a slide.
pub type Reward = u64;

/// Width and height of the board.
pub const SIDE: usize = 4;

/// Number of cells on the board.
pub const CELLS: usize = SIDE * SIDE;

/// The two ranks that only merge with each other.
pub const BASE_RANKS: [Rank; 2] = [1, 2];

/// Rank produced by merging the two base ranks.
pub const FIRST_MERGED_RANK: Rank = 3;

/// Point value of a tile of the given rank.
///
/// Base ranks are worth their face value (they are never awarded as a merge
/// reward), rank 3 is worth 3 and every further rank doubles the previous one.
///
/// ```
/// use threes_td::threes::tile_score;
///
/// assert_eq!(tile_score(0), 0);
/// assert_eq!(tile_score(3), 3);
/// assert_eq!(tile_score(4), 6);
/// assert_eq!(tile_score(14), 6144);
/// ```
pub fn tile_score(rank: Rank) -> Reward {
    match rank {
        0..=2 => Reward::from(rank),
        r => 3 << (r - FIRST_MERGED_RANK),
    }
}

fn is_base_rank(rank: Rank) -> bool {
    BASE_RANKS.contains(&rank)
}

/// A direction to slide the board in.
///
/// The discriminants fix the canonical enumeration order used for tie-breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up = 0,
    Right = 1,
    Down = 2,
    Left = 3,
}

impl Direction {
    /// All directions in canonical order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Canonical index (up=0, right=1, down=2, left=3)
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Direction> {
        Self::ALL.get(index).copied()
    }

    /// Cells on the edge opposite this direction.
    ///
    /// New tiles enter from the side the board was pushed away from.
    pub fn entry_edge(self) -> [usize; SIDE] {
        match self {
            Direction::Up => [12, 13, 14, 15],
            Direction::Right => [0, 4, 8, 12],
            Direction::Down => [0, 1, 2, 3],
            Direction::Left => [3, 7, 11, 15],
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Up => "up",
            Direction::Right => "right",
            Direction::Down => "down",
            Direction::Left => "left",
        };
        f.write_str(name)
    }
}

/// A 4x4 grid of ranks, row-major.
///
/// `Board` is `Copy`; hypothetical moves are evaluated on a copy so the real
/// game state is never touched during lookahead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Board {
    cells: [Rank; CELLS],
    last_slide: Option<Direction>,
}

impl Board {
    /// Create an empty board
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a board from raw cells, with no slide history.
    pub fn from_cells(cells: [Rank; CELLS]) -> Self {
        Self {
            cells,
            last_slide: None,
        }
    }

    pub fn cells(&self) -> &[Rank; CELLS] {
        &self.cells
    }

    /// Direction of the most recent legal slide, if any.
    pub fn last_slide(&self) -> Option<Direction> {
        self.last_slide
    }

    /// Positions of all empty cells in ascending order.
    pub fn empty_cells(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, rank)| **rank == 0)
            .map(|(pos, _)| pos)
            .collect()
    }

    /// Highest rank present on the board (0 for an empty board).
    pub fn max_rank(&self) -> Rank {
        self.cells.iter().copied().max().unwrap_or(0)
    }

    /// Write `rank` into `position`.
    ///
    /// The cell is overwritten whether or not it was empty; callers pick legal
    /// cells.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PositionOutOfRange`] if `position >= 16`.
    pub fn place(&mut self, position: usize, rank: Rank) -> Result<()> {
        let cell = self
            .cells
            .get_mut(position)
            .ok_or(Error::PositionOutOfRange { position })?;
        *cell = rank;
        Ok(())
    }

    /// Slide the whole board in `direction`.
    ///
    /// Returns the points scored by merges, or `None` if the slide changes no
    /// cell (an illegal move; the board is left untouched).
    ///
    /// ```
    /// use threes_td::threes::{Board, Direction};
    ///
    /// let mut board = Board::new();
    /// board.place(0, 1).unwrap();
    /// board.place(1, 2).unwrap();
    /// assert_eq!(board.slide(Direction::Left), Some(3));
    /// assert_eq!(board[0], 3);
    /// assert_eq!(board.slide(Direction::Left), None);
    /// ```
    pub fn slide(&mut self, direction: Direction) -> Option<Reward> {
        let reward = match direction {
            Direction::Up => self.slide_up(),
            Direction::Right => self.slide_right(),
            Direction::Down => self.slide_down(),
            Direction::Left => self.slide_left(),
        }?;
        self.last_slide = Some(direction);
        Some(reward)
    }

    fn slide_left(&mut self) -> Option<Reward> {
        let mut moved = self.cells;
        let reward: Reward = moved.chunks_exact_mut(SIDE).map(slide_row_left).sum();
        if moved == self.cells {
            return None;
        }
        self.cells = moved;
        Some(reward)
    }

    fn slide_right(&mut self) -> Option<Reward> {
        self.reflect_horizontal();
        let reward = self.slide_left();
        self.reflect_horizontal();
        reward
    }

    fn slide_up(&mut self) -> Option<Reward> {
        self.transpose();
        let reward = self.slide_left();
        self.transpose();
        reward
    }

    fn slide_down(&mut self) -> Option<Reward> {
        self.transpose();
        let reward = self.slide_right();
        self.transpose();
        reward
    }

    /// Mirror the board across its main diagonal
    pub fn transpose(&mut self) {
        self.remap(|row, col| col * SIDE + row);
    }

    /// Mirror each row left-to-right
    pub fn reflect_horizontal(&mut self) {
        self.remap(|row, col| row * SIDE + (SIDE - 1 - col));
    }

    /// Mirror each column top-to-bottom
    pub fn reflect_vertical(&mut self) {
        self.remap(|row, col| (SIDE - 1 - row) * SIDE + col);
    }

    /// Rotate clockwise by `quarter_turns` (negative values rotate counterclockwise).
    pub fn rotate(&mut self, quarter_turns: i32) {
        match quarter_turns.rem_euclid(4) {
            1 => self.rotate_right(),
            2 => self.reverse(),
            3 => self.rotate_left(),
            _ => {}
        }
    }

    /// Rotate one quarter turn clockwise
    pub fn rotate_right(&mut self) {
        self.transpose();
        self.reflect_horizontal();
    }

    /// Rotate one quarter turn counterclockwise
    pub fn rotate_left(&mut self) {
        self.transpose();
        self.reflect_vertical();
    }

    /// Rotate a half turn
    pub fn reverse(&mut self) {
        self.reflect_horizontal();
        self.reflect_vertical();
    }

    /// Rebuild the cells so that `new[row][col] = old[source(row, col)]`.
    fn remap(&mut self, source: impl Fn(usize, usize) -> usize) {
        let old = self.cells;
        for row in 0..SIDE {
            for col in 0..SIDE {
                self.cells[row * SIDE + col] = old[source(row, col)];
            }
        }
    }
}

/// Single forward pass over one row; an index is never revisited after a merge.
fn slide_row_left(row: &mut [Rank]) -> Reward {
    let mut reward = 0;
    for i in 0..SIDE - 1 {
        let (current, next) = (row[i], row[i + 1]);
        if current == 0 {
            if next != 0 {
                row[i] = next;
                row[i + 1] = 0;
            }
        } else if is_base_rank(current) {
            if is_base_rank(next) && next != current {
                row[i] = FIRST_MERGED_RANK;
                row[i + 1] = 0;
                reward += tile_score(FIRST_MERGED_RANK);
            }
        } else if current == next {
            row[i] += 1;
            row[i + 1] = 0;
            reward += tile_score(row[i]);
        }
    }
    reward
}

impl Index<usize> for Board {
    type Output = Rank;

    fn index(&self, position: usize) -> &Rank {
        &self.cells[position]
    }
}

impl From<[Rank; CELLS]> for Board {
    fn from(cells: [Rank; CELLS]) -> Self {
        Board::from_cells(cells)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let border = format!("+{}+", "-".repeat(SIDE * 6));
        writeln!(f, "{border}")?;
        for row in self.cells.chunks_exact(SIDE) {
            write!(f, "|")?;
            for &rank in row {
                write!(f, "{:6}", tile_score(rank))?;
            }
            writeln!(f, "|")?;
        }
        write!(f, "{border}")
    }
}
