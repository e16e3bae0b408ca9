use super::*;

#[test]
fn test_memory_store_roundtrip() {
    let mut store = MemoryStore::new();

    assert_eq!(store.get("credential").unwrap(), None);

    store.set("credential", "value").unwrap();
    assert_eq!(store.get("credential").unwrap().as_deref(), Some("value"));

    store.set("credential", "replaced").unwrap();
    assert_eq!(store.get("credential").unwrap().as_deref(), Some("replaced"));

    store.remove("credential").unwrap();
    assert_eq!(store.get("credential").unwrap(), None);

    // Removing an absent key is not an error
    store.remove("credential").unwrap();
}

#[test]
fn test_memory_store_clear_removes_everything() {
    let mut store = MemoryStore::new();
    store.set("credential", "a").unwrap();
    store.set("security_config", "b").unwrap();

    store.clear().unwrap();

    assert_eq!(store.get("credential").unwrap(), None);
    assert_eq!(store.get("security_config").unwrap(), None);
}

#[test]
fn test_file_store_persists_across_instances() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");

    {
        let mut store = FileStore::open(&path).unwrap();
        store.set("credential", "persisted").unwrap();
    }

    let store = FileStore::open(&path).unwrap();
    assert_eq!(store.get("credential").unwrap().as_deref(), Some("persisted"));
}

#[test]
fn test_file_store_clear_removes_backing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");

    let mut store = FileStore::open(&path).unwrap();
    store.set("credential", "a").unwrap();
    store.set("security_config", "b").unwrap();
    assert!(path.exists());

    store.clear().unwrap();
    assert!(!path.exists());
    assert_eq!(store.get("credential").unwrap(), None);

    // A fresh open after clear starts from nothing
    let store = FileStore::open(&path).unwrap();
    assert_eq!(store.get("security_config").unwrap(), None);
}

#[test]
fn test_file_store_tolerates_corrupted_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");
    std::fs::write(&path, "{not json at all").unwrap();

    let store = FileStore::open(&path).unwrap();
    assert_eq!(store.get("credential").unwrap(), None);
}

#[test]
fn test_file_store_creates_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("deeper").join("store.json");

    let mut store = FileStore::open(&path).unwrap();
    store.set("credential", "value").unwrap();
    assert!(path.exists());
}
