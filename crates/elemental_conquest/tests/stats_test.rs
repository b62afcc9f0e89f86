//! JSON stats persistence tests.

use elemental_conquest::{JsonStatsStore, StatsStore};
use elemental_engine::Element;

#[test]
fn test_missing_file_reads_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonStatsStore::new(dir.path().join("stats.json"));
    let stats = store.stats().unwrap();
    assert_eq!(*stats.games_played(), 0);
    assert!(!store.path().exists());
}

#[test]
fn test_results_survive_reopening() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("stats.json");

    let mut store = JsonStatsStore::new(&path);
    store.record_result(Element::Wind, true).unwrap();
    store.record_result(Element::Wind, true).unwrap();
    store.record_result(Element::Fire, false).unwrap();
    assert!(path.exists());

    let reopened = JsonStatsStore::new(&path);
    let stats = reopened.stats().unwrap();
    assert_eq!(*stats.games_played(), 3);
    assert_eq!(stats.wins_with(Element::Wind), 2);
    assert_eq!(stats.losses_with(Element::Fire), 1);
    assert_eq!(*stats.current_streak(), 0);
    assert_eq!(*stats.best_streak(), 2);
}

#[test]
fn test_corrupt_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stats.json");
    std::fs::write(&path, "not json").unwrap();
    let err = JsonStatsStore::new(&path).stats().unwrap_err();
    assert!(err.message.starts_with("JSON error"));
}
