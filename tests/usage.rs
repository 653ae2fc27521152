use std::collections::HashMap;
use tempfile::tempdir;
use websearch::usage::{load_usage, save_usage, UsageTracker};

#[test]
fn save_then_load_usage() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("usage.json");
    let mut usage = HashMap::new();
    usage.insert("first".to_string(), 3);
    usage.insert("second".to_string(), 1);
    save_usage(&path, &usage).unwrap();

    let loaded = load_usage(&path).unwrap();
    assert_eq!(loaded.get("first"), Some(&3));
    assert_eq!(loaded.get("second"), Some(&1));
    assert_eq!(loaded.len(), 2);
}

#[test]
fn missing_file_loads_empty() {
    let dir = tempdir().unwrap();
    assert!(load_usage(dir.path().join("none.json")).unwrap().is_empty());
}

#[test]
fn tracker_survives_corrupt_file_and_records() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("usage.json");
    std::fs::write(&path, "[oops").unwrap();

    let mut tracker = UsageTracker::load(&path, 0.5);
    assert_eq!(tracker.count("abc"), 0);
    assert_eq!(tracker.record("abc").unwrap(), 1);
    assert_eq!(tracker.record("abc").unwrap(), 2);

    let reloaded = UsageTracker::load(&path, 0.5);
    assert_eq!(reloaded.count("abc"), 2);
}
