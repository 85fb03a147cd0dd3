//! Threes-style sliding tile puzzle

pub mod action;
pub mod board;
pub mod episode;

pub use action::Action;
pub use board::{
    BASE_RANKS, Board, CELLS, Direction, FIRST_MERGED_RANK, Rank, Reward, SIDE, tile_score,
};
pub use episode::{Episode, EpisodeRecord};
