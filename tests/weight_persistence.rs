//! Weight files on disk: exact round-trips and rejection of damaged files

use std::fs;

use tempfile::tempdir;
use threes_td::{
    Error,
    adapters::BinaryWeightRepository,
    app::{App, PlayerConfig},
    ntuple::{FEATURE_SPACE, TABLE_SIZE},
    ports::WeightRepository,
    td_learning::WeightTable,
};

#[test]
fn saved_weights_reload_bit_for_bit() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("weights.bin");
    let repo = BinaryWeightRepository::new();

    let mut weights = WeightTable::zeroed(17);
    weights.accumulate(0, 0, f32::MIN_POSITIVE);
    weights.accumulate(8, 777, -0.0);
    weights.accumulate(16, FEATURE_SPACE - 1, 12345.678);
    weights.accumulate(4, 31, f32::EPSILON);

    repo.save(&weights, &path).unwrap();
    let loaded = repo.load(&path).unwrap();

    assert_eq!(loaded.len(), 17);
    for pattern in 0..17 {
        let same = weights
            .table(pattern)
            .iter()
            .zip(loaded.table(pattern))
            .all(|(a, b)| a.to_bits() == b.to_bits());
        assert!(same, "table {pattern} changed on reload");
    }
    // Never-written entries come back as zero.
    assert_eq!(loaded.get(3, 100), 0.0);
}

#[test]
fn file_size_matches_layout() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("weights.bin");
    BinaryWeightRepository::new()
        .save(&WeightTable::zeroed(8), &path)
        .unwrap();

    let size = fs::metadata(&path).unwrap().len() as usize;
    assert_eq!(size, 8 + 8 * (8 + 4 * TABLE_SIZE));
}

#[test]
fn truncated_file_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("weights.bin");
    let repo = BinaryWeightRepository::new();
    repo.save(&WeightTable::zeroed(2), &path).unwrap();

    let bytes = fs::read(&path).unwrap();
    fs::write(&path, &bytes[..bytes.len() / 2]).unwrap();

    assert!(matches!(
        repo.load(&path),
        Err(Error::MalformedWeights { .. })
    ));
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempdir().unwrap();
    let result = BinaryWeightRepository::new().load(&dir.path().join("absent.bin"));
    assert!(matches!(result, Err(Error::Io { .. })));
}

#[test]
fn player_writes_weights_on_drop_and_reloads_them() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("player.bin");
    let app = App::new();

    {
        let player = app
            .create_player(PlayerConfig::new("writer").with_init(4).with_save(&path))
            .unwrap();
        assert_eq!(player.save_path(), Some(path.as_path()));
    }
    assert!(path.exists());

    let reloaded = app
        .create_player(PlayerConfig::new("reader").with_load(&path))
        .unwrap();
    assert_eq!(reloaded.network().patterns().len(), 4);
}
