#![cfg(not(target_arch = "wasm32"))]

use std::sync::{Arc, Mutex};

use nskv::{MemBackend, NamespaceStore, SharedBackend, StorageBackend, StoreContext};
use proptest::prelude::*;
use serde_json::{json, Value};

fn shared_mem() -> SharedBackend {
    Arc::new(Mutex::new(Box::new(MemBackend::new()) as Box<dyn StorageBackend>))
}

fn raw_entry(backend: &SharedBackend, key: &str) -> Option<String> {
    backend.lock().unwrap().get(key)
}

fn seed_entry(backend: &SharedBackend, key: &str, raw: &str) {
    backend.lock().unwrap().set(key, raw).unwrap();
}

#[test]
fn round_trips_every_json_shape() {
    let store = NamespaceStore::new("ns", shared_mem());

    let values = [
        json!("a string"),
        json!(true),
        json!(false),
        json!(0),
        json!(-17),
        json!(3.5),
        json!([1, "two", [3]]),
        json!({"nested": {"deeply": ["yes", null]}}),
    ];

    for (i, value) in values.iter().enumerate() {
        let key = format!("k{i}");
        store.set(&key, value.clone()).unwrap();
        assert_eq!(store.get(&key), Some(value.clone()), "value {value}");
    }
}

#[test]
fn stored_null_is_distinct_from_absent() {
    let store = NamespaceStore::new("ns", shared_mem());

    store.set("present", Value::Null).unwrap();
    assert_eq!(store.get("present"), Some(Value::Null));
    assert_eq!(store.get("missing"), None);
}

#[test]
fn malformed_blobs_read_as_empty() {
    let malformed = [
        "",
        "not json at all",
        "{truncated",
        "42",
        "3.14",
        "true",
        "null",
        "[1,2,3]",
        "\"just a string\"",
    ];

    for raw in malformed {
        let backend = shared_mem();
        seed_entry(&backend, "ns", raw);
        let store = NamespaceStore::new("ns", backend);

        assert!(store.get_all().is_empty(), "blob {raw:?} should read as empty");
        assert_eq!(store.get("anything"), None, "blob {raw:?}");
    }
}

#[test]
fn set_merges_with_existing_entries() {
    let backend = shared_mem();
    let store = NamespaceStore::new("ns", Arc::clone(&backend));

    store.set("foo", "bar").unwrap();
    store.set("derp", "flerp").unwrap();

    let raw = raw_entry(&backend, "ns").unwrap();
    let blob: Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(blob, json!({"foo": "bar", "derp": "flerp"}));
}

#[test]
fn set_overwrites_same_key() {
    let store = NamespaceStore::new("ns", shared_mem());

    store.set("k", "old").unwrap();
    store.set("k", "new").unwrap();
    assert_eq!(store.get("k"), Some(json!("new")));
}

#[test]
fn clear_removes_only_its_key() {
    let store = NamespaceStore::new("ns", shared_mem());

    store.set("keep", 1).unwrap();
    store.set("drop", 2).unwrap();
    store.clear("drop").unwrap();

    assert_eq!(store.get("drop"), None);
    assert_eq!(store.get("keep"), Some(json!(1)));
}

#[test]
fn clear_of_absent_key_leaves_blob_unchanged() {
    let backend = shared_mem();
    let store = NamespaceStore::new("ns", Arc::clone(&backend));

    store.set("keep", 1).unwrap();
    let before = raw_entry(&backend, "ns").unwrap();

    store.clear("never-set").unwrap();
    assert_eq!(raw_entry(&backend, "ns").unwrap(), before);
}

#[test]
fn clear_all_drops_the_whole_entry() {
    let backend = shared_mem();
    let store = NamespaceStore::new("ns", Arc::clone(&backend));

    store.set("a", 1).unwrap();
    store.set("b", 2).unwrap();
    store.clear_all().unwrap();

    assert_eq!(raw_entry(&backend, "ns"), None);
    assert_eq!(store.get("a"), None);
    assert_eq!(store.get("b"), None);
}

#[test]
fn context_memoizes_one_store_per_namespace() {
    let context = StoreContext::new(Box::new(MemBackend::new()));

    let first = context.resolve("settings");
    let second = context.resolve("settings");
    let other = context.resolve("session");

    assert!(Arc::ptr_eq(&first, &second));
    assert!(!Arc::ptr_eq(&first, &other));

    first.set("theme", "dark").unwrap();
    assert_eq!(second.get("theme"), Some(json!("dark")));
}

#[test]
fn namespaces_do_not_leak_into_each_other() {
    let context = StoreContext::new(Box::new(MemBackend::new()));

    let a = context.resolve("a");
    let b = context.resolve("b");

    a.set("shared-name", "from a").unwrap();
    b.set("shared-name", "from b").unwrap();

    assert_eq!(a.get("shared-name"), Some(json!("from a")));
    assert_eq!(b.get("shared-name"), Some(json!("from b")));

    a.clear_all().unwrap();
    assert_eq!(b.get("shared-name"), Some(json!("from b")));
}

fn json_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| Value::Number(n.into())),
        "[a-zA-Z0-9 ]{0,12}".prop_map(Value::String),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map("[a-z]{1,6}", inner, 0..4)
                .prop_map(|map| Value::Object(map.into_iter().collect())),
        ]
    })
}

proptest! {
    // Round-trip law: set followed by get yields a deep-equal value, for any
    // JSON-serializable value and any sub-key.
    #[test]
    fn set_then_get_round_trips(key in "[a-zA-Z0-9_-]{1,12}", value in json_value()) {
        let store = NamespaceStore::new("prop", shared_mem());
        store.set(&key, value.clone()).unwrap();
        prop_assert_eq!(store.get(&key), Some(value));
    }

    // Whatever garbage is persisted, reads normalize instead of erroring.
    #[test]
    fn arbitrary_blobs_never_error(raw in ".{0,64}") {
        let backend = shared_mem();
        seed_entry(&backend, "prop", &raw);
        let store = NamespaceStore::new("prop", backend);

        let all = store.get_all();
        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(map)) => prop_assert_eq!(all, map),
            _ => prop_assert!(all.is_empty()),
        }
    }
}
