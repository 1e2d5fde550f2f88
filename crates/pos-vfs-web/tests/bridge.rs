//! `PosStorage` bridge tests against a real IndexedDB.
//!
//! Run with `wasm-pack test --headless --chrome crates/pos-vfs-web`.
#![cfg(target_arch = "wasm32")]

use js_sys::{Array, Function, Object, Reflect};
use pos_vfs::{FsNode, ManualClock, NodeStore, Vfs, VfsConfig};
use pos_vfs_web::convert::node_to_js;
use pos_vfs_web::{bindings, IndexedDbStore};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::wasm_bindgen_test;

wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

const BRIDGE: &str = include_str!("../js/pos-storage.js");

fn load_bridge() {
    if !bindings::storage_available() {
        Function::new_no_args(BRIDGE)
            .call0(&JsValue::UNDEFINED)
            .unwrap();
    }
}

/// A database name no earlier run has used.
fn fresh_db(tag: &str) -> String {
    format!("pos-vfs-test-{}-{}", tag, js_sys::Date::now())
}

fn config(database_name: &str, store_name: &str) -> VfsConfig {
    VfsConfig {
        database_name: String::from(database_name),
        store_name: String::from(store_name),
        ..VfsConfig::default()
    }
}

async fn open(database_name: &str, store_name: &str) -> IndexedDbStore {
    load_bridge();
    IndexedDbStore::open(&config(database_name, store_name))
        .await
        .unwrap()
}

#[wasm_bindgen_test]
async fn move_rekeys_subtree_in_indexeddb() {
    let store = open(&fresh_db("move"), "nodes").await;
    let vfs = Vfs::new(store, ManualClock::new(1_000));
    vfs.initialize_drive('C').await.unwrap();

    vfs.mkdir("C:\\A").await.unwrap();
    vfs.mkdir("C:\\A\\B").await.unwrap();
    vfs.write_file("C:\\A\\B\\f.txt", b"deep").await.unwrap();
    vfs.write_file("C:\\AB", b"sibling").await.unwrap();

    vfs.rename("C:\\A", "C:\\System\\A").await.unwrap();

    assert!(!vfs.exists("C:\\A").await.unwrap());
    assert!(!vfs.exists("C:\\A\\B\\f.txt").await.unwrap());
    assert_eq!(
        vfs.read_file("C:\\System\\A\\B\\f.txt").await.unwrap(),
        Some(b"deep".to_vec())
    );
    let moved = vfs.stat("C:\\System\\A\\B").await.unwrap().unwrap();
    assert_eq!(moved.parent, "C:\\System\\A");

    // The key range stops at the separator: `C:\AB` is not under `C:\A`
    let sibling = vfs.stat("C:\\AB").await.unwrap().unwrap();
    assert_eq!(sibling.parent, "C:\\");

    let subtree = vfs.store().list_subtree("C:\\System\\A").await.unwrap();
    let mut paths: Vec<String> = subtree.into_iter().map(|node| node.path).collect();
    paths.sort();
    assert_eq!(paths, vec!["C:\\System\\A\\B", "C:\\System\\A\\B\\f.txt"]);
}

#[wasm_bindgen_test]
async fn apply_batch_is_all_or_nothing() {
    let store = open(&fresh_db("batch"), "nodes").await;
    let node = FsNode::new_directory(String::from("C:\\"), String::new(), String::new(), 1);

    let put: JsValue = Object::new().into();
    Reflect::set(&put, &"op".into(), &"put".into()).unwrap();
    Reflect::set(&put, &"node".into(), &node_to_js(&node)).unwrap();
    let bogus: JsValue = Object::new().into();
    Reflect::set(&bogus, &"op".into(), &"rename".into()).unwrap();

    let result = bindings::apply_batch(Array::of2(&put, &bogus).into()).await;
    assert!(result.is_err());
    assert!(store.get("C:\\").await.unwrap().is_none());
    assert_eq!(store.count().await.unwrap(), 0);

    bindings::apply_batch(Array::of1(&put).into()).await.unwrap();
    assert_eq!(store.get("C:\\").await.unwrap(), Some(node));
}

#[wasm_bindgen_test]
async fn new_store_name_upgrades_existing_database() {
    let db = fresh_db("upgrade");

    let store = open(&db, "nodes").await;
    let vfs = Vfs::new(store, ManualClock::new(1));
    vfs.initialize_drive('C').await.unwrap();
    assert_eq!(vfs.store().count().await.unwrap(), 4);

    let store = open(&db, "nodes-v2").await;
    assert_eq!(store.count().await.unwrap(), 0);
    let vfs = Vfs::new(store, ManualClock::new(1));
    vfs.mkdir("C:\\").await.unwrap();
    assert!(vfs.exists("C:\\").await.unwrap());

    // The old collection is still there, untouched
    let store = open(&db, "nodes").await;
    assert_eq!(store.count().await.unwrap(), 4);
}

#[wasm_bindgen_test]
async fn reinit_switches_database() {
    let first = fresh_db("first");
    let second = fresh_db("second");

    let store = open(&first, "nodes").await;
    Vfs::new(store, ManualClock::new(1)).mkdir("C:\\").await.unwrap();

    let store = open(&second, "nodes").await;
    assert_eq!(store.database_name(), second);
    assert_eq!(store.count().await.unwrap(), 0);

    let store = open(&first, "nodes").await;
    assert_eq!(store.count().await.unwrap(), 1);
}

#[cfg(feature = "tracing-wasm")]
#[wasm_bindgen_test]
fn hooks_install_console_subscriber() {
    pos_vfs_web::install_hooks();
    pos_vfs_web::install_hooks();
    assert!(tracing::enabled!(tracing::Level::DEBUG));
}
