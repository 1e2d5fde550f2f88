//! PosStorage bindings - IndexedDB access from Rust
//!
//! `js/pos-storage.js` installs a global `PosStorage` object that owns the
//! IndexedDB connection. Every call is async on the JS side and may throw
//! (blocked upgrade, quota, aborted transaction), so each binding is
//! declared with `catch` and surfaces the exception as `Err`.

use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    /// Console.log binding for WASM
    #[wasm_bindgen(js_namespace = console)]
    pub fn log(s: &str);
}

#[wasm_bindgen]
extern "C" {
    /// Open (and upgrade if needed) the database. Resolves once ready.
    #[wasm_bindgen(catch, js_namespace = PosStorage, js_name = init)]
    pub async fn init(db_name: &str, store_name: &str, index_name: &str)
        -> Result<JsValue, JsValue>;

    /// Resolves to the node object, or `undefined`.
    #[wasm_bindgen(catch, js_namespace = PosStorage, js_name = getNode)]
    pub async fn get_node(path: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = PosStorage, js_name = putNode)]
    pub async fn put_node(node: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = PosStorage, js_name = deleteNode)]
    pub async fn delete_node(path: &str) -> Result<JsValue, JsValue>;

    /// Resolves to an array of the nodes whose `parent` equals `parent`.
    #[wasm_bindgen(catch, js_namespace = PosStorage, js_name = listByParent)]
    pub async fn list_by_parent(parent: &str) -> Result<JsValue, JsValue>;

    /// Resolves to an array of the nodes whose key starts with `prefix`.
    #[wasm_bindgen(catch, js_namespace = PosStorage, js_name = listByPrefix)]
    pub async fn list_by_prefix(prefix: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = PosStorage, js_name = getAllNodes)]
    pub async fn get_all_nodes() -> Result<JsValue, JsValue>;

    /// Run an array of `{op: "put", node}` / `{op: "delete", path}` in one
    /// readwrite transaction.
    #[wasm_bindgen(catch, js_namespace = PosStorage, js_name = applyBatch)]
    pub async fn apply_batch(ops: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = PosStorage, js_name = getNodeCount)]
    pub async fn get_node_count() -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = PosStorage, js_name = clear)]
    pub async fn clear() -> Result<JsValue, JsValue>;
}

/// Check that `window.PosStorage` has been installed.
pub fn storage_available() -> bool {
    web_sys::window()
        .and_then(|window| js_sys::Reflect::get(&window, &"PosStorage".into()).ok())
        .map_or(false, |storage| !storage.is_undefined())
}
