//! Stochastic tile-inserting environment
//!
//! After every player slide the environment drops one new tile onto the edge
//! the board was pushed away from. Tile ranks come from a bag that is drawn
//! without replacement and refilled once empty, so every run of three draws
//! after a refill contains each of 1, 2 and 3 exactly once.

use rand::{Rng, SeedableRng, rngs::StdRng, seq::IndexedRandom};

use crate::{
    ports::Agent,
    threes::{Action, Board, Rank},
};

/// Ranks the bag is filled with
pub const BAG_RANKS: [Rank; 3] = [1, 2, 3];

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Without-replacement draw pool of tile ranks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileBag {
    remaining: Vec<Rank>,
}

impl TileBag {
    /// Create a full bag
    pub fn new() -> Self {
        Self {
            remaining: BAG_RANKS.to_vec(),
        }
    }

    /// Draw one rank, refilling first if the bag is empty
    pub fn draw<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Rank {
        if self.remaining.is_empty() {
            self.reset();
        }
        let index = rng.random_range(0..self.remaining.len());
        self.remaining.swap_remove(index)
    }

    /// Refill the bag to its full contents
    pub fn reset(&mut self) {
        self.remaining.clear();
        self.remaining.extend_from_slice(&BAG_RANKS);
    }

    /// Ranks still in the bag (unordered)
    pub fn remaining(&self) -> &[Rank] {
        &self.remaining
    }
}

impl Default for TileBag {
    fn default() -> Self {
        Self::new()
    }
}

/// Environment that inserts random tiles
///
/// Owns its random source; two environments never share RNG state.
#[derive(Debug, Clone)]
pub struct RandomEnvironment {
    name: String,
    rng: StdRng,
    bag: TileBag,
}

impl RandomEnvironment {
    /// Create an environment seeded from the thread RNG
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rng: build_rng(None),
            bag: TileBag::new(),
        }
    }

    /// Create an environment with a deterministic seed
    pub fn with_seed(name: impl Into<String>, seed: u64) -> Self {
        Self {
            name: name.into(),
            rng: build_rng(Some(seed)),
            bag: TileBag::new(),
        }
    }

    pub fn bag(&self) -> &TileBag {
        &self.bag
    }

    /// Cells a new tile may land on.
    ///
    /// All empty cells, narrowed to the entry edge once the board has slid.
    pub fn candidate_cells(board: &Board) -> Vec<usize> {
        let mut cells = board.empty_cells();
        if let Some(direction) = board.last_slide() {
            let edge = direction.entry_edge();
            cells.retain(|position| edge.contains(position));
        }
        cells
    }
}

impl Agent for RandomEnvironment {
    fn take_action(&mut self, board: &Board) -> Action {
        let candidates = Self::candidate_cells(board);
        let Some(&position) = candidates.choose(&mut self.rng) else {
            return Action::NoOp;
        };
        let rank = self.bag.draw(&mut self.rng);
        Action::Place { position, rank }
    }

    fn open_episode(&mut self) {
        self.bag.reset();
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn role(&self) -> &str {
        "environment"
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::threes::Direction;

    #[test]
    fn test_bag_windows_are_permutations() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut bag = TileBag::new();
        for _ in 0..50 {
            let mut window: Vec<Rank> = (0..3).map(|_| bag.draw(&mut rng)).collect();
            window.sort_unstable();
            assert_eq!(window, BAG_RANKS.to_vec());
        }
    }

    #[test]
    fn test_bag_reset_refills() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut bag = TileBag::new();
        bag.draw(&mut rng);
        assert_eq!(bag.remaining().len(), 2);
        bag.reset();
        assert_eq!(bag.remaining().len(), 3);
    }

    #[test]
    fn test_first_placements_use_any_empty_cell() {
        let board = Board::from_cells([1, 0, 2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 3]);
        let cells = RandomEnvironment::candidate_cells(&board);
        assert_eq!(cells.len(), 13);
        assert!(!cells.contains(&0));
    }

    #[test]
    fn test_candidates_restricted_to_entry_edge() {
        let mut board = Board::from_cells([0, 0, 0, 3, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
        assert!(board.slide(Direction::Left).is_some());
        assert_eq!(
            RandomEnvironment::candidate_cells(&board),
            vec![3, 7, 11, 15]
        );
    }

    #[test]
    fn test_full_edge_yields_noop() {
        let mut board = Board::from_cells([0, 0, 0, 3, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
        assert!(board.slide(Direction::Left).is_some());
        for position in Direction::Left.entry_edge() {
            board.place(position, 1).unwrap();
        }
        // Plenty of empty cells remain, just none on the entry edge.
        assert_eq!(board.empty_cells().len(), 11);

        let mut env = RandomEnvironment::with_seed("env", 1);
        assert_eq!(env.take_action(&board), Action::NoOp);
    }

    #[test]
    fn test_placement_lands_on_candidate() {
        let mut board = Board::from_cells([0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 3, 0]);
        assert!(board.slide(Direction::Up).is_some());
        let mut env = RandomEnvironment::with_seed("env", 5);
        for _ in 0..20 {
            match env.take_action(&board) {
                Action::Place { position, rank } => {
                    assert!([12, 13, 14, 15].contains(&position));
                    assert!(BAG_RANKS.contains(&rank));
                }
                other => panic!("expected a placement, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_seeded_environments_are_deterministic() {
        let board = Board::new();
        let mut a = RandomEnvironment::with_seed("a", 42);
        let mut b = RandomEnvironment::with_seed("b", 42);
        for _ in 0..10 {
            assert_eq!(a.take_action(&board), b.take_action(&board));
        }
    }
}
