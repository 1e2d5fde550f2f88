//! JavaScript-facing VFS.
//!
//! Exposes the filesystem operations with camelCase names. Failures reject
//! the returned promise with an `Error` whose `name` is the VFS error kind
//! (`AlreadyExists`, `MissingParent`, `StorageError`, ...) and whose
//! `message` is the human-readable text.

use js_sys::{Array, Uint8Array};
use pos_vfs::bootstrap;
use pos_vfs::{FileAttributes, NodeStore, SortConfig, TransferMode, Vfs, VfsConfig, VfsError};
use wasm_bindgen::prelude::*;

use crate::bindings::log;
use crate::clock::DateClock;
use crate::convert::node_to_js;
use crate::store::IndexedDbStore;

/// Convert a VFS error into a JS `Error`.
pub fn to_js_error(err: VfsError) -> JsValue {
    tracing::debug!(kind = err.kind(), %err, "vfs call failed");
    let error = js_sys::Error::new(&err.to_string());
    error.set_name(err.kind());
    error.into()
}

fn drive_letter(letter: &str) -> Result<char, VfsError> {
    let mut chars = letter.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(VfsError::invalid_path(format!(
            "'{}' is not a single drive letter",
            letter
        ))),
    }
}

/// Install the panic hook and the console `tracing` subscriber.
///
/// Safe to call more than once; the first subscriber stays installed.
pub fn install_hooks() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    #[cfg(feature = "tracing-wasm")]
    {
        if tracing_wasm::try_set_as_global_default().is_ok() {
            tracing::info!("console tracing enabled");
        }
    }
}

/// Entries of a JS array, all of which must be strings.
fn string_list(values: &Array) -> Result<Vec<String>, VfsError> {
    collect_strings(values.iter().map(|value| value.as_string()))
}

fn collect_strings(
    entries: impl Iterator<Item = Option<String>>,
) -> Result<Vec<String>, VfsError> {
    entries
        .enumerate()
        .map(|(index, entry)| {
            entry.ok_or_else(|| {
                VfsError::invalid_argument(format!("entry {} is not a string", index))
            })
        })
        .collect()
}

fn parse_config(config_json: Option<String>) -> Result<VfsConfig, VfsError> {
    match config_json {
        Some(json) if !json.trim().is_empty() => VfsConfig::from_json(&json),
        _ => Ok(VfsConfig::default()),
    }
}

fn parse_sort(sort_json: Option<String>) -> Result<Option<SortConfig>, VfsError> {
    match sort_json {
        Some(json) => serde_json::from_str(&json)
            .map(Some)
            .map_err(|e| VfsError::invalid_argument(format!("sort JSON: {}", e))),
        None => Ok(None),
    }
}

/// Browser VFS over IndexedDB.
#[wasm_bindgen]
pub struct WebVfs {
    vfs: Vfs<IndexedDbStore, DateClock>,
}

#[wasm_bindgen]
impl WebVfs {
    /// Open the database and bootstrap the default drive.
    ///
    /// `config_json` is an optional JSON `VfsConfig`; missing fields take
    /// their defaults.
    #[wasm_bindgen(js_name = init)]
    pub async fn init(config_json: Option<String>) -> Result<WebVfs, JsValue> {
        install_hooks();

        let config = parse_config(config_json).map_err(to_js_error)?;
        let store = IndexedDbStore::open(&config)
            .await
            .map_err(|e| to_js_error(e.into()))?;

        let vfs = Vfs::new(store, DateClock).with_default_drive(config.drive());
        bootstrap::bootstrap(&vfs, &config)
            .await
            .map_err(to_js_error)?;

        log(&format!(
            "[pos-vfs] Ready on {}:\\ ({} nodes)",
            config.drive(),
            vfs.store().count().await.unwrap_or(0)
        ));
        Ok(WebVfs { vfs })
    }

    // ========== Queries ==========

    #[wasm_bindgen]
    pub async fn exists(&self, path: String) -> Result<bool, JsValue> {
        self.vfs.exists(&path).await.map_err(to_js_error)
    }

    /// The node at `path` (without following symlinks), or `undefined`.
    #[wasm_bindgen]
    pub async fn stat(&self, path: String) -> Result<JsValue, JsValue> {
        let node = self.vfs.stat(&path).await.map_err(to_js_error)?;
        Ok(node.as_ref().map_or(JsValue::UNDEFINED, node_to_js))
    }

    /// File content, or `undefined` for anything that is not a file.
    #[wasm_bindgen(js_name = readFile)]
    pub async fn read_file(&self, path: String) -> Result<JsValue, JsValue> {
        let content = self.vfs.read_file(&path).await.map_err(to_js_error)?;
        Ok(content.map_or(JsValue::UNDEFINED, |bytes| {
            Uint8Array::from(bytes.as_slice()).into()
        }))
    }

    /// Children of a directory, optionally sorted by a JSON `SortConfig`.
    #[wasm_bindgen]
    pub async fn readdir(&self, path: String, sort_json: Option<String>) -> Result<Array, JsValue> {
        let sort = parse_sort(sort_json).map_err(to_js_error)?;
        let mut nodes = self.vfs.readdir(&path).await.map_err(to_js_error)?;
        if let Some(sort) = sort {
            sort.sort_nodes(&mut nodes);
        }
        Ok(nodes.iter().map(node_to_js).collect())
    }

    #[wasm_bindgen(js_name = resolveSymlink)]
    pub async fn resolve_symlink(&self, path: String) -> Result<String, JsValue> {
        self.vfs.resolve_symlink(&path).await.map_err(to_js_error)
    }

    // ========== Mutations ==========

    #[wasm_bindgen(js_name = writeFile)]
    pub async fn write_file(&self, path: String, content: Vec<u8>) -> Result<(), JsValue> {
        self.vfs
            .write_file(&path, &content)
            .await
            .map_err(to_js_error)
    }

    #[wasm_bindgen]
    pub async fn mkdir(&self, path: String) -> Result<(), JsValue> {
        self.vfs.mkdir(&path).await.map_err(to_js_error)
    }

    #[wasm_bindgen(js_name = createSymlink)]
    pub async fn create_symlink(&self, link_path: String, target: String) -> Result<(), JsValue> {
        self.vfs
            .create_symlink(&link_path, &target)
            .await
            .map_err(to_js_error)
    }

    #[wasm_bindgen]
    pub async fn rm(&self, path: String) -> Result<(), JsValue> {
        self.vfs.rm(&path).await.map_err(to_js_error)
    }

    #[wasm_bindgen]
    pub async fn unlink(&self, path: String) -> Result<(), JsValue> {
        self.vfs.unlink(&path).await.map_err(to_js_error)
    }

    /// Remove a directory; `recursive` defaults to false.
    #[wasm_bindgen]
    pub async fn rmdir(&self, path: String, recursive: Option<bool>) -> Result<(), JsValue> {
        self.vfs
            .rmdir(&path, recursive.unwrap_or(false))
            .await
            .map_err(to_js_error)
    }

    #[wasm_bindgen(js_name = "move")]
    pub async fn move_node(&self, from: String, to: String) -> Result<(), JsValue> {
        self.vfs.rename(&from, &to).await.map_err(to_js_error)
    }

    #[wasm_bindgen]
    pub async fn copy(&self, from: String, to: String) -> Result<(), JsValue> {
        self.vfs.copy(&from, &to).await.map_err(to_js_error)
    }

    #[wasm_bindgen(js_name = setAttributes)]
    pub async fn set_attributes(
        &self,
        path: String,
        read_only: bool,
        hidden: bool,
    ) -> Result<(), JsValue> {
        self.vfs
            .set_attributes(&path, FileAttributes { read_only, hidden })
            .await
            .map_err(to_js_error)
    }

    #[wasm_bindgen(js_name = initializeDrive)]
    pub async fn initialize_drive(&self, letter: String) -> Result<(), JsValue> {
        let letter = drive_letter(&letter).map_err(to_js_error)?;
        self.vfs.initialize_drive(letter).await.map_err(to_js_error)
    }

    // ========== File actions ==========

    #[wasm_bindgen(js_name = createFile)]
    pub async fn create_file(&self, dir: String, name: String) -> Result<(), JsValue> {
        self.vfs
            .actions()
            .create_file(&dir, &name)
            .await
            .map_err(to_js_error)
    }

    #[wasm_bindgen(js_name = createDirectory)]
    pub async fn create_directory(&self, dir: String, name: String) -> Result<(), JsValue> {
        self.vfs
            .actions()
            .create_directory(&dir, &name)
            .await
            .map_err(to_js_error)
    }

    #[wasm_bindgen(js_name = deleteItems)]
    pub async fn delete_items(&self, paths: Array) -> Result<(), JsValue> {
        let paths = string_list(&paths).map_err(to_js_error)?;
        self.vfs
            .actions()
            .delete_items(&paths)
            .await
            .map_err(to_js_error)
    }

    #[wasm_bindgen(js_name = renameItem)]
    pub async fn rename_item(&self, old_path: String, new_name: String) -> Result<(), JsValue> {
        self.vfs
            .actions()
            .rename_item(&old_path, &new_name)
            .await
            .map_err(to_js_error)
    }

    /// Copy (`is_move` false, names get " - Copy") or move items into `dest_dir`.
    #[wasm_bindgen(js_name = copyItems)]
    pub async fn copy_items(
        &self,
        sources: Array,
        dest_dir: String,
        is_move: bool,
    ) -> Result<(), JsValue> {
        let sources = string_list(&sources).map_err(to_js_error)?;
        let mode = if is_move {
            TransferMode::Move
        } else {
            TransferMode::Copy
        };
        self.vfs
            .actions()
            .copy_items(&sources, &dest_dir, mode)
            .await
            .map_err(to_js_error)
    }
}
