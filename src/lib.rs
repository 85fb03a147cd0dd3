//! Threes-style sliding tile puzzle with an n-tuple TD(0) learner
//!
//! This crate provides:
//! - The 4x4 rank-merge board engine (ranks 1 and 2 combine into 3, equal
//!   ranks from 3 upward combine into the next rank)
//! - An n-tuple feature hasher and linear value function
//! - A greedy TD(0) player with binary weight persistence
//! - A bag-based random tile environment
//! - A training pipeline with block statistics and a CLI driver

pub mod adapters;
pub mod app;
pub mod cli;
pub mod environment;
pub mod error;
pub mod ntuple;
pub mod pipeline;
pub mod ports;
pub mod td_learning;
pub mod threes;

pub use error::{Error, Result};
