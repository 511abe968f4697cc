use std::fs;

use pretty_assertions::assert_eq;
use rotator_core::QueueState;
use rotator_engine::QueueStore;
use tempfile::TempDir;

fn init_logging() {
    rotator_logging::initialize_for_tests();
}

#[test]
fn missing_file_loads_empty() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let store = QueueStore::new(temp.path().join("job_queue.ron"));
    assert!(store.load().is_empty());
}

#[test]
fn corrupt_file_loads_empty() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("job_queue.ron");
    fs::write(&path, "\u{0}\u{1}not ron at all [[[").unwrap();
    assert!(QueueStore::new(path).load().is_empty());
}

#[test]
fn saved_queue_loads_back_in_order() {
    let temp = TempDir::new().unwrap();
    let store = QueueStore::new(temp.path().join("job_queue.ron"));
    let state = QueueState::from(vec![5, 3, 9, 1]);

    let written = store.save(&state).unwrap();
    assert_eq!(written, temp.path().join("job_queue.ron"));
    assert_eq!(store.load(), state);

    let rotated = QueueState::from(vec![9, 1, 5, 3]);
    store.save(&rotated).unwrap();
    assert_eq!(store.load(), rotated);
}

#[test]
fn save_creates_parent_directories() {
    let temp = TempDir::new().unwrap();
    let store = QueueStore::new(temp.path().join("data").join("job_queue.ron"));
    store.save(&QueueState::from(vec![1])).unwrap();
    assert_eq!(store.load().as_slice(), &[1]);
}

#[test]
fn malformed_entries_are_dropped() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("job_queue.ron");
    fs::write(&path, r#"JobQueue(queue: [4, "seven", -2, 8, 1.5, 2])"#).unwrap();

    let state = QueueStore::new(path).load();
    assert_eq!(state.as_slice(), &[4, 8, 2]);
}

#[test]
fn save_into_unwritable_location_fails() {
    let temp = TempDir::new().unwrap();
    let blocker = temp.path().join("blocker");
    fs::write(&blocker, "x").unwrap();

    let store = QueueStore::new(blocker.join("job_queue.ron"));
    assert!(store.save(&QueueState::from(vec![1, 2])).is_err());
}
