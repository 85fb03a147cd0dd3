//! Integration tests for dependency injection.
//!
//! These tests demonstrate the benefits of the DI app:
//! - Easy testing with in-memory repositories (no file I/O)
//! - Deterministic behavior with fixed seeds
//! - Centralized dependency management

use std::path::Path;

use threes_td::{
    Error,
    adapters::InMemoryRepository,
    app::{App, EnvironmentConfig, PlayerConfig},
    pipeline::{TrainingConfig, TrainingPipeline},
};

#[test]
fn test_app_with_in_memory_repository() {
    let repo = InMemoryRepository::new();
    let app = App::for_testing()
        .with_repository(repo.clone())
        .with_default_seed(42)
        .build();

    // Train briefly and save to "memory" (not disk)
    {
        let mut player = app
            .create_player("name=learner init=8 save=trained".parse().unwrap())
            .unwrap();
        let mut env = app.create_environment(EnvironmentConfig::default());
        TrainingPipeline::new(TrainingConfig {
            total: 3,
            ..TrainingConfig::default()
        })
        .run(&mut player, &mut env)
        .unwrap();
        player.finish().unwrap();
    }
    assert!(repo.contains(Path::new("trained")));

    // Load from "memory"
    let loaded = app
        .create_player(PlayerConfig::new("reader").with_load("trained"))
        .unwrap();
    assert!(loaded.network().weights().populated() > 0);
    assert_eq!(repo.count(), 1);
}

#[test]
fn test_seeded_runs_are_reproducible() {
    let run = || {
        let app = App::for_testing()
            .with_repository(InMemoryRepository::new())
            .with_default_seed(7)
            .build();
        let mut player = app.create_player(PlayerConfig::default()).unwrap();
        let mut env = app.create_environment(EnvironmentConfig::default());
        TrainingPipeline::new(TrainingConfig {
            total: 4,
            ..TrainingConfig::default()
        })
        .run(&mut player, &mut env)
        .unwrap()
    };

    let first = run();
    let second = run();
    let scores = |r: &threes_td::pipeline::TrainingResult| {
        r.records.iter().map(|e| (e.score, e.slides)).collect::<Vec<_>>()
    };
    assert_eq!(scores(&first), scores(&second));
}

#[test]
fn test_corrupt_stored_weights_fail_player_creation() {
    let repo = InMemoryRepository::new();
    repo.insert_raw(Path::new("broken"), vec![1, 0, 0]);
    let app = App::for_testing().with_repository(repo).build();

    let result = app.create_player(PlayerConfig::new("p").with_load("broken"));
    assert!(matches!(result, Err(Error::MalformedWeights { .. })));
}

#[test]
fn test_invalid_options_are_reported() {
    let result = "alpha=fast".parse::<PlayerConfig>();
    assert!(matches!(result, Err(Error::InvalidOption { key, .. }) if key == "alpha"));

    let result = "seed".parse::<EnvironmentConfig>();
    assert!(matches!(result, Err(Error::MissingOptionValue { .. })));
}
