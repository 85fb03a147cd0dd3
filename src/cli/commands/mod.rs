//! Subcommands of the `threes` binary

pub mod evaluate;
pub mod train;
