//! IndexedDB-backed node store.

use async_trait::async_trait;
use pos_vfs::core::subtree_prefix;
use pos_vfs::{FsNode, NodeStore, StoreError, StoreOp, VfsConfig};
use wasm_bindgen::JsValue;

use crate::bindings;
use crate::convert::{batch_to_js, js_error_to_store, js_to_node, js_to_nodes, node_to_js};

/// `NodeStore` over the `PosStorage` bridge.
///
/// One object store keyed by `path`, with a `by-parent` index. Subtree
/// queries use the key range `[prefix, prefix + '\uffff')`.
#[derive(Debug)]
pub struct IndexedDbStore {
    database_name: String,
}

impl IndexedDbStore {
    /// Open the database named in `config`, creating its schema on first use.
    pub async fn open(config: &VfsConfig) -> Result<Self, StoreError> {
        if !bindings::storage_available() {
            bindings::log("[pos-vfs] PosStorage is not installed on window");
            return Err(StoreError::Unavailable);
        }

        bindings::init(&config.database_name, &config.store_name, &config.parent_index)
            .await
            .map_err(js_error_to_store)?;

        bindings::log(&format!(
            "[pos-vfs] Opened IndexedDB '{}' (store '{}')",
            config.database_name, config.store_name
        ));
        Ok(Self {
            database_name: config.database_name.clone(),
        })
    }

    /// Name of the open database.
    pub fn database_name(&self) -> &str {
        &self.database_name
    }
}

#[async_trait(?Send)]
impl NodeStore for IndexedDbStore {
    async fn get(&self, path: &str) -> Result<Option<FsNode>, StoreError> {
        let value = bindings::get_node(path).await.map_err(js_error_to_store)?;
        if value.is_undefined() || value.is_null() {
            return Ok(None);
        }
        js_to_node(&value).map(Some)
    }

    async fn put(&self, node: FsNode) -> Result<(), StoreError> {
        bindings::put_node(node_to_js(&node))
            .await
            .map_err(js_error_to_store)?;
        Ok(())
    }

    async fn delete(&self, path: &str) -> Result<(), StoreError> {
        bindings::delete_node(path).await.map_err(js_error_to_store)?;
        Ok(())
    }

    async fn list_by_parent(&self, parent: &str) -> Result<Vec<FsNode>, StoreError> {
        let value = bindings::list_by_parent(parent)
            .await
            .map_err(js_error_to_store)?;
        js_to_nodes(&value)
    }

    async fn list_subtree(&self, path: &str) -> Result<Vec<FsNode>, StoreError> {
        let value = bindings::list_by_prefix(&subtree_prefix(path))
            .await
            .map_err(js_error_to_store)?;
        js_to_nodes(&value)
    }

    async fn get_all(&self) -> Result<Vec<FsNode>, StoreError> {
        let value = bindings::get_all_nodes().await.map_err(js_error_to_store)?;
        js_to_nodes(&value)
    }

    async fn apply(&self, batch: Vec<StoreOp>) -> Result<(), StoreError> {
        if batch.is_empty() {
            return Ok(());
        }
        bindings::apply_batch(batch_to_js(&batch))
            .await
            .map_err(js_error_to_store)?;
        Ok(())
    }

    async fn count(&self) -> Result<usize, StoreError> {
        let value = bindings::get_node_count()
            .await
            .map_err(js_error_to_store)?;
        count_from_js(&value)
    }

    async fn clear(&self) -> Result<(), StoreError> {
        bindings::clear().await.map_err(js_error_to_store)?;
        Ok(())
    }
}

fn count_from_js(value: &JsValue) -> Result<usize, StoreError> {
    value
        .as_f64()
        .filter(|n| n.is_finite() && *n >= 0.0)
        .map(|n| n as usize)
        .ok_or_else(|| StoreError::backend("getNodeCount did not return a number"))
}
