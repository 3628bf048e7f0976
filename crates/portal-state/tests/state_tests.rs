use std::collections::BTreeSet;
use std::fs;
use tempfile::TempDir;

use portal_core::traits::StateStore;
use portal_core::types::ExpansionMap;
use portal_state::{reconcile, FileStateStore, MemoryStateStore};

fn ids(names: &[&str]) -> BTreeSet<String> {
    names.iter().map(|s| (*s).to_string()).collect()
}

#[test]
fn load_missing_file_yields_empty_map() {
    let tmp = TempDir::new().unwrap();
    let store = FileStateStore::new(tmp.path().join("absent.json"));
    assert!(store.load().is_empty());
}

#[test]
fn load_corrupt_file_yields_empty_map() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("portal-state.json");
    fs::write(&path, "{{{not json").unwrap();
    let store = FileStateStore::new(path);
    assert!(store.load().is_empty());
}

#[test]
fn save_then_load_round_trips() {
    let tmp = TempDir::new().unwrap();
    let store = FileStateStore::new(tmp.path().join("portal-state.json"));
    let mut state = ExpansionMap::new();
    state.insert("item-0-".to_string(), true);
    state.insert("item-1-".to_string(), false);
    store.save(&state).expect("save");
    assert_eq!(store.load(), state);
}

#[test]
fn save_overwrites_wholesale_not_merge() {
    let tmp = TempDir::new().unwrap();
    let store = FileStateStore::new(tmp.path().join("portal-state.json"));

    let mut first = ExpansionMap::new();
    first.insert("item-0-".to_string(), true);
    first.insert("item-1-".to_string(), true);
    store.save(&first).expect("save");

    let mut second = ExpansionMap::new();
    second.insert("item-2-".to_string(), true);
    store.save(&second).expect("save");

    let loaded = store.load();
    assert_eq!(loaded, second);
    assert!(!loaded.contains_key("item-0-"), "prior snapshot replaced");
}

#[test]
fn save_creates_missing_parent_directory() {
    let tmp = TempDir::new().unwrap();
    let store = FileStateStore::new(tmp.path().join("nested/dir/portal-state.json"));
    store.save(&ExpansionMap::new()).expect("save");
    assert!(store.path().exists());
}

#[test]
fn reconcile_drops_unknown_ids() {
    let mut saved = ExpansionMap::new();
    saved.insert("item-0-".to_string(), true);
    let applied = reconcile(&saved, &ids(&["item-1-"]));
    assert!(applied.is_empty(), "no nodes expanded, no error");
}

#[test]
fn reconcile_applies_only_true_entries() {
    let mut saved = ExpansionMap::new();
    saved.insert("item-0-".to_string(), true);
    saved.insert("item-1-".to_string(), false);
    let applied = reconcile(&saved, &ids(&["item-0-", "item-1-"]));
    assert_eq!(applied.len(), 1);
    assert_eq!(applied.get("item-0-"), Some(&true));
}

#[test]
fn memory_store_round_trips() {
    let store = MemoryStateStore::new();
    let mut state = ExpansionMap::new();
    state.insert("item-0-".to_string(), true);
    store.save(&state).expect("save");
    assert_eq!(store.load(), state);
}
