// Tests for the persisted composite-score history: round trips, ordering
// and lenient loading.

use podium::ScoreHistory;
use std::fs;

#[test]
fn test_round_trip_preserves_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history.json");

    let mut history = ScoreHistory::load(&path);
    assert!(history.scores().is_empty());

    history.append(72).unwrap();
    history.append(85).unwrap();
    history.append(85).unwrap(); // duplicates are kept

    let reloaded = ScoreHistory::load(&path);
    assert_eq!(reloaded.scores(), &[72, 85, 85]);
}

#[test]
fn test_missing_file_is_an_empty_history() {
    let dir = tempfile::tempdir().unwrap();
    let history = ScoreHistory::load(dir.path().join("does-not-exist.json"));
    assert!(history.scores().is_empty());
}

#[test]
fn test_corrupt_file_is_ignored_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history.json");
    fs::write(&path, "{not valid json").unwrap();

    let mut history = ScoreHistory::load(&path);
    assert!(history.scores().is_empty());

    // Appending repairs the file
    history.append(60).unwrap();
    let reloaded = ScoreHistory::load(&path);
    assert_eq!(reloaded.scores(), &[60]);
}

#[test]
fn test_append_creates_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested/deeper/history.json");

    let mut history = ScoreHistory::load(&path);
    history.append(91).unwrap();

    assert!(path.exists());
    assert_eq!(ScoreHistory::load(&path).scores(), &[91]);
}
