//! Train command - Train the TD player against the random environment

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    app::{App, EnvironmentConfig, PlayerConfig},
    cli::output::{format_number, print_block_summaries, print_section, print_stats_table},
    pipeline::{ProgressObserver, TrainingConfig, TrainingPipeline, TrainingResult},
    threes::tile_score,
};

#[derive(Parser, Debug)]
#[command(about = "Train the TD player")]
pub struct TrainArgs {
    /// Number of episodes to reach (including any loaded from --load)
    #[arg(long, default_value_t = 1000)]
    pub total: usize,

    /// Episodes per statistics block (0 = total)
    #[arg(long, default_value_t = 0)]
    pub block: usize,

    /// Maximum player slides per episode (0 = unlimited)
    #[arg(long, default_value_t = 0)]
    pub limit: usize,

    /// Player options, e.g. "init=8 alpha=0.1 save=weights.bin"
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub play: String,

    /// Environment options, e.g. "seed=42"
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub evil: String,

    /// Resume from statistics saved by an earlier run (JSON)
    #[arg(long)]
    pub load: Option<PathBuf>,

    /// Write episode statistics to this file (JSON)
    #[arg(long)]
    pub save: Option<PathBuf>,

    /// Print per-block statistics when done
    #[arg(long, default_value_t = false)]
    pub summary: bool,

    /// Show progress bar
    #[arg(long, default_value_t = false)]
    pub progress: bool,
}

/// Settings shared by the train and evaluate commands
pub(crate) struct Session<'a> {
    pub title: &'a str,
    pub config: TrainingConfig,
    pub player: PlayerConfig,
    pub environment: EnvironmentConfig,
    pub history: TrainingResult,
    pub progress: bool,
    pub summary: bool,
}

/// Treat a trailing separator or a missing file name as a directory and
/// default the extension to `.json`.
pub(crate) fn sanitize_stats_path(raw: &Path, default_name: &str) -> PathBuf {
    let mut normalized = raw.to_path_buf();
    let raw_str = raw.as_os_str().to_string_lossy();

    if raw_str.ends_with(std::path::MAIN_SEPARATOR) || normalized.file_name().is_none() {
        normalized.push(default_name);
        return normalized;
    }

    match normalized.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => normalized,
        _ => {
            normalized.set_extension("json");
            normalized
        }
    }
}

/// Write statistics, creating parent directories as needed.
pub(crate) fn write_stats(result: &TrainingResult, raw: &Path, default_name: &str) -> Result<()> {
    let path = sanitize_stats_path(raw, default_name);
    if path != raw {
        println!("\n⚠️  Normalizing statistics path to {}", path.display());
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
    }
    result
        .save(&path)
        .with_context(|| format!("failed to write statistics to {}", path.display()))?;
    println!("\nStatistics written to {}", path.display());
    Ok(())
}

/// Build both agents, play the session, and report on it.
pub(crate) fn run_session(app: &App, session: Session<'_>) -> Result<TrainingResult> {
    print_section(session.title);
    let resumed = session.history.total_episodes();
    print_stats_table(&[
        ("Player", session.player.name.as_str()),
        ("Environment", session.environment.name.as_str()),
        ("Alpha", session.player.alpha.to_string().as_str()),
        ("Episodes", format_number(session.config.total as u64).as_str()),
        ("Resumed episodes", format_number(resumed as u64).as_str()),
    ]);

    let mut player = app
        .create_player(session.player)
        .context("failed to create player")?;
    let mut environment = app.create_environment(session.environment);

    let mut pipeline = TrainingPipeline::new(session.config).with_history(session.history);
    if session.progress {
        pipeline = pipeline.with_observer(Box::new(ProgressObserver::new()));
    }

    let result = pipeline.run(&mut player, &mut environment)?;
    player.finish().context("failed to save weights")?;

    print_section("Results");
    print_stats_table(&[
        ("Episodes", format_number(result.total_episodes() as u64).as_str()),
        ("Average score", format!("{:.1}", result.average_score()).as_str()),
        ("Max score", format_number(result.max_score()).as_str()),
        ("Largest tile", tile_score(result.max_rank()).to_string().as_str()),
    ]);
    if session.summary {
        print_block_summaries(&result);
    }
    Ok(result)
}

pub fn execute(args: TrainArgs) -> Result<()> {
    let history = match &args.load {
        Some(path) => TrainingResult::load(path)
            .with_context(|| format!("failed to load statistics from {}", path.display()))?,
        None => TrainingResult::new(),
    };
    // A finished run loaded from disk has nothing left to play; show it instead.
    let summary = args.summary || history.total_episodes() >= args.total;

    let player: PlayerConfig = args
        .play
        .parse()
        .with_context(|| format!("invalid --play options '{}'", args.play))?;
    let environment: EnvironmentConfig = args
        .evil
        .parse()
        .with_context(|| format!("invalid --evil options '{}'", args.evil))?;

    let session = Session {
        title: "Training",
        config: TrainingConfig {
            total: args.total,
            block: args.block,
            limit: args.limit,
            ..TrainingConfig::default()
        },
        player,
        environment,
        history,
        progress: args.progress,
        summary,
    };

    let result = run_session(&App::new(), session)?;

    if let Some(path) = &args.save {
        write_stats(&result, path, "training_stats.json")?;
    }

    Ok(())
}
