//! CLI infrastructure for the threes TD learner
//!
//! This module provides the command-line interface for training and
//! evaluating the n-tuple player.

pub mod commands;
pub mod output;
