use std::sync::Mutex;

use once_cell::sync::Lazy;
use pocketlog::storage::TextStorage;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates a storage backend over a fresh transaction file path in a
/// unique temporary directory. The file itself does not exist yet.
pub fn setup_store() -> TextStorage {
    let temp = TempDir::new().expect("create temp dir");
    let path = temp.path().join("transactions.csv");
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    TextStorage::new(path)
}

/// Creates a storage backend whose file is seeded with `contents` verbatim.
pub fn seeded_store(contents: &str) -> TextStorage {
    let store = setup_store();
    std::fs::write(store.path(), contents).expect("seed transaction file");
    store
}
