//! Temporal difference learning over an n-tuple network
//!
//! This module holds the learned side of the system:
//!
//! - [`WeightTable`]: one dense table of values per tuple pattern
//! - [`NTupleNetwork`]: patterns plus weights, with value lookup and the
//!   greedy one-ply lookahead
//! - [`TdPlayer`]: the agent that plays greedily and applies TD(0) updates
//! - [`serialization`]: the binary weight file codec
//!
//! ## Update rule
//!
//! For the board the player acted on (`before`) and the board after both the
//! player and the environment moved (`after`):
//!
//! ```text
//! target = max_d [ r(after, d) + V(slide(after, d)) ]
//! V(before) entries += alpha * (target - V(before))
//! ```
//!
//! ## Usage Example
//!
//! ```
//! use threes_td::{
//!     ntuple::PatternSet,
//!     ports::Agent,
//!     td_learning::{NTupleNetwork, TdPlayer},
//!     threes::{Action, Board},
//! };
//!
//! let mut player = TdPlayer::new("td", NTupleNetwork::new(PatternSet::default()), 0.1);
//! let mut board = Board::new();
//! board.place(0, 1).unwrap();
//! board.place(1, 2).unwrap();
//!
//! assert!(matches!(player.take_action(&board), Action::Slide(_)));
//! ```

pub mod agent;
pub mod network;
pub mod serialization;
pub mod weight_table;

// Public re-exports
pub use agent::{DEFAULT_ALPHA, TdPlayer};
pub use network::{Lookahead, NTupleNetwork};
pub use weight_table::WeightTable;
