use super::*;

// =============================================================
// MemoryStorage
// =============================================================

#[test]
fn memory_storage_starts_empty() {
    let storage = MemoryStorage::new();
    assert_eq!(storage.load().unwrap(), None);
}

#[test]
fn memory_storage_store_then_load() {
    let storage = MemoryStorage::new();
    storage.store("abc.def.ghi").unwrap();
    assert_eq!(storage.load().unwrap().as_deref(), Some("abc.def.ghi"));
}

#[test]
fn memory_storage_store_replaces_previous() {
    let storage = MemoryStorage::with_token("old");
    storage.store("new").unwrap();
    assert_eq!(storage.load().unwrap().as_deref(), Some("new"));
}

#[test]
fn memory_storage_clear_is_idempotent() {
    let storage = MemoryStorage::with_token("t");
    storage.clear().unwrap();
    storage.clear().unwrap();
    assert_eq!(storage.load().unwrap(), None);
}

// =============================================================
// FileStorage
// =============================================================

#[test]
fn file_storage_missing_file_is_none() {
    let dir = tempfile::tempdir().unwrap();
    let storage = FileStorage::in_dir(dir.path());
    assert_eq!(storage.load().unwrap(), None);
}

#[test]
fn file_storage_in_dir_uses_token_key() {
    let storage = FileStorage::in_dir("/tmp/wallet-test");
    assert!(storage.path().ends_with(TOKEN_KEY));
}

#[test]
fn file_storage_round_trips_and_creates_parent() {
    let dir = tempfile::tempdir().unwrap();
    let storage = FileStorage::new(dir.path().join("nested").join("token"));
    storage.store("abc.def.ghi").unwrap();
    assert_eq!(storage.load().unwrap().as_deref(), Some("abc.def.ghi"));
}

#[test]
fn file_storage_trims_whitespace() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("token");
    std::fs::write(&path, "  tok\n").unwrap();
    let storage = FileStorage::new(&path);
    assert_eq!(storage.load().unwrap().as_deref(), Some("tok"));
}

#[test]
fn file_storage_blank_file_is_none() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("token");
    std::fs::write(&path, "\n").unwrap();
    assert_eq!(FileStorage::new(&path).load().unwrap(), None);
}

#[test]
fn file_storage_clear_removes_file() {
    let dir = tempfile::tempdir().unwrap();
    let storage = FileStorage::in_dir(dir.path());
    storage.store("t").unwrap();
    storage.clear().unwrap();
    assert!(!storage.path().exists());
    storage.clear().unwrap();
}

#[test]
fn file_storage_read_error_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    // A directory where the file should be makes read_to_string fail.
    let storage = FileStorage::new(dir.path());
    let err = storage.load().unwrap_err().to_string();
    assert!(err.contains("token storage io failed"));
}
