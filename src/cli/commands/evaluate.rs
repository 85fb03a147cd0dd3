//! Evaluate command - Play trained weights with learning disabled

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::warn;

use super::train::{Session, run_session, write_stats};
use crate::{
    app::{App, EnvironmentConfig, PlayerConfig},
    pipeline::{TrainingConfig, TrainingResult},
};

#[derive(Parser, Debug)]
#[command(about = "Evaluate trained weights")]
pub struct EvaluateArgs {
    /// Number of evaluation episodes
    #[arg(long, default_value_t = 1000)]
    pub total: usize,

    /// Episodes per statistics block (0 = total)
    #[arg(long, default_value_t = 0)]
    pub block: usize,

    /// Maximum player slides per episode (0 = unlimited)
    #[arg(long, default_value_t = 0)]
    pub limit: usize,

    /// Player options; `alpha` and `save` are ignored
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub play: String,

    /// Environment options, e.g. "seed=42"
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub evil: String,

    /// Export episode statistics to this file (JSON)
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Print per-block statistics when done
    #[arg(long, default_value_t = false)]
    pub summary: bool,

    /// Show progress bar
    #[arg(long, default_value_t = false)]
    pub progress: bool,
}

/// Strip everything that would change the weights or write them back.
fn frozen(mut player: PlayerConfig) -> PlayerConfig {
    if player.load.is_none() {
        warn!("evaluating {} without loaded weights", player.name);
    }
    if player.save.take().is_some() {
        warn!("ignoring save option during evaluation");
    }
    player.alpha = 0.0;
    player
}

pub fn execute(args: EvaluateArgs) -> Result<()> {
    let player: PlayerConfig = args
        .play
        .parse()
        .with_context(|| format!("invalid --play options '{}'", args.play))?;
    let environment: EnvironmentConfig = args
        .evil
        .parse()
        .with_context(|| format!("invalid --evil options '{}'", args.evil))?;

    let session = Session {
        title: "Evaluation",
        config: TrainingConfig {
            total: args.total,
            block: args.block,
            limit: args.limit,
            ..TrainingConfig::default()
        },
        player: frozen(player),
        environment,
        history: TrainingResult::new(),
        progress: args.progress,
        summary: args.summary,
    };

    let result = run_session(&App::new(), session)?;

    if let Some(path) = &args.export {
        write_stats(&result, path, "evaluation_stats.json")?;
    }

    Ok(())
}
