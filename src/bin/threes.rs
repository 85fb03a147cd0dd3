//! threes CLI - TD(0) n-tuple learning for a Threes-style puzzle
//!
//! This CLI provides a unified interface for:
//! - Training the player against the random tile environment
//! - Evaluating trained weights with learning disabled

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;

#[derive(Parser)]
#[command(name = "threes")]
#[command(version, about = "TD(0) n-tuple learning for a Threes-style puzzle", long_about = None)]
struct Cli {
    /// Log filter (env_logger syntax); RUST_LOG takes precedence
    #[arg(long, global = true, default_value = "info")]
    log: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train the player, optionally loading and saving weights
    Train(threes_td::cli::commands::train::TrainArgs),

    /// Evaluate trained weights with learning disabled
    Evaluate(threes_td::cli::commands::evaluate::EvaluateArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(Env::default().default_filter_or(cli.log.as_str())).init();
    log::debug!("threes {}", std::env::args().collect::<Vec<_>>().join(" "));

    match cli.command {
        Commands::Train(args) => threes_td::cli::commands::train::execute(args),
        Commands::Evaluate(args) => threes_td::cli::commands::evaluate::execute(args),
    }
}
