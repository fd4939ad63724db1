//! Config file to running app.

use std::fs;

use tempfile::tempdir;

use crusher_engine::{App, CrusherConfig, Difficulty, GameSettings};

#[test]
fn config_file_shapes_the_app() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        "[app]\nascii_only = true\n\n[game]\ndifficulty = 5\ntick_interval_ms = 1200\n",
    )
    .unwrap();

    let config = CrusherConfig::load_from(&path).unwrap().unwrap();
    let settings = GameSettings::resolve_with_env(Some(&config), None);
    let app = App::new(settings, config.ascii_only());

    assert!(app.ascii_only());
    assert_eq!(app.difficulty(), Difficulty::Five);
    assert_eq!(app.draft().remaining(), 5);
    assert_eq!(app.tick_interval().as_millis(), 1200);
}

#[test]
fn environment_beats_the_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[game]\ntick_interval_ms = 1200\n").unwrap();

    let config = CrusherConfig::load_from(&path).unwrap();
    let settings = GameSettings::resolve_with_env(config.as_ref(), Some("300"));
    assert_eq!(settings.tick_interval.as_millis(), 300);
    assert_eq!(settings.difficulty, Difficulty::Seven);
}

#[test]
fn broken_file_is_reported_with_its_path() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[game\n").unwrap();

    let err = CrusherConfig::load_from(&path).unwrap_err();
    assert_eq!(err.path(), path.as_path());
    assert!(err.to_string().contains("config.toml"));
}
