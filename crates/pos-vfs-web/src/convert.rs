//! Conversion between `FsNode` and the plain JS objects kept in IndexedDB.
//!
//! Record shape:
//!
//! ```text
//! {
//!   path, parent, name,               // strings
//!   type: "file" | "directory" | "symlink",
//!   createdAt, modifiedAt,            // ms since epoch (Date accepted on read)
//!   attributes: { readOnly, hidden },
//!   content?: Uint8Array,             // files (ArrayBuffer accepted on read)
//!   target?: string,                  // symlinks
//! }
//! ```

use js_sys::{Array, Object, Reflect, Uint8Array};
use pos_vfs::{FileAttributes, FsNode, NodeKind, StoreError, StoreOp};
use wasm_bindgen::{JsCast, JsValue};

fn set(obj: &Object, key: &str, value: &JsValue) {
    let _ = Reflect::set(obj, &JsValue::from_str(key), value);
}

fn get(obj: &JsValue, key: &str) -> JsValue {
    Reflect::get(obj, &JsValue::from_str(key)).unwrap_or(JsValue::UNDEFINED)
}

/// Build the JS record for a node.
pub fn node_to_js(node: &FsNode) -> JsValue {
    let obj = Object::new();
    set(&obj, "path", &JsValue::from_str(&node.path));
    set(&obj, "parent", &JsValue::from_str(&node.parent));
    set(&obj, "name", &JsValue::from_str(&node.name));
    set(&obj, "type", &JsValue::from_str(node.kind.type_name()));
    set(&obj, "createdAt", &JsValue::from_f64(node.created_at as f64));
    set(&obj, "modifiedAt", &JsValue::from_f64(node.modified_at as f64));

    let attrs = Object::new();
    set(&attrs, "readOnly", &JsValue::from_bool(node.attributes.read_only));
    set(&attrs, "hidden", &JsValue::from_bool(node.attributes.hidden));
    set(&obj, "attributes", &attrs);

    match &node.kind {
        NodeKind::File { content } => {
            set(&obj, "content", &Uint8Array::from(content.as_slice()));
        }
        NodeKind::Symlink { target } => {
            set(&obj, "target", &JsValue::from_str(target));
        }
        NodeKind::Directory => {}
    }

    obj.into()
}

/// Decode a JS record into a node, rejecting anything malformed.
pub fn js_to_node(value: &JsValue) -> Result<FsNode, StoreError> {
    if !value.is_object() {
        return Err(StoreError::corrupt("", "record is not an object"));
    }

    let path = get(value, "path")
        .as_string()
        .ok_or_else(|| StoreError::corrupt("", "missing 'path'"))?;
    let string_field = |key: &str| {
        get(value, key)
            .as_string()
            .ok_or_else(|| StoreError::corrupt(path.as_str(), format!("missing '{}'", key)))
    };

    let parent = string_field("parent")?;
    let name = string_field("name")?;
    let type_name = string_field("type")?;

    let kind = match type_name.as_str() {
        "file" => NodeKind::File {
            content: bytes_field(&get(value, "content"), &path)?,
        },
        "directory" => NodeKind::Directory,
        "symlink" => NodeKind::Symlink {
            target: string_field("target")?,
        },
        other => {
            return Err(StoreError::corrupt(
                path.as_str(),
                format!("unknown type '{}'", other),
            ))
        }
    };

    let attrs = get(value, "attributes");
    let attributes = FileAttributes {
        read_only: get(&attrs, "readOnly").is_truthy(),
        hidden: get(&attrs, "hidden").is_truthy(),
    };

    Ok(FsNode {
        created_at: timestamp_field(&get(value, "createdAt"), &path, "createdAt")?,
        modified_at: timestamp_field(&get(value, "modifiedAt"), &path, "modifiedAt")?,
        path,
        parent,
        name,
        kind,
        attributes,
    })
}

/// File content. A missing payload reads as an empty file.
fn bytes_field(value: &JsValue, path: &str) -> Result<Vec<u8>, StoreError> {
    if value.is_undefined() || value.is_null() {
        return Ok(Vec::new());
    }
    if let Some(bytes) = value.dyn_ref::<Uint8Array>() {
        return Ok(bytes.to_vec());
    }
    if let Some(buffer) = value.dyn_ref::<js_sys::ArrayBuffer>() {
        return Ok(Uint8Array::new(buffer).to_vec());
    }
    Err(StoreError::corrupt(path, "'content' is not binary data"))
}

/// Millisecond timestamp stored as a number or a `Date`.
fn timestamp_field(value: &JsValue, path: &str, key: &str) -> Result<u64, StoreError> {
    let millis = match value.dyn_ref::<js_sys::Date>() {
        Some(date) => date.get_time(),
        None => value
            .as_f64()
            .ok_or_else(|| StoreError::corrupt(path, format!("missing '{}'", key)))?,
    };
    if !millis.is_finite() {
        return Err(StoreError::corrupt(path, format!("invalid '{}'", key)));
    }
    Ok(millis.max(0.0) as u64)
}

/// Decode an array of records. `undefined` and `null` read as empty.
pub fn js_to_nodes(value: &JsValue) -> Result<Vec<FsNode>, StoreError> {
    if value.is_undefined() || value.is_null() {
        return Ok(Vec::new());
    }
    let array = value
        .dyn_ref::<Array>()
        .ok_or_else(|| StoreError::corrupt("", "expected an array of records"))?;
    array.iter().map(|item| js_to_node(&item)).collect()
}

/// Encode a batch for `PosStorage.applyBatch`.
pub fn batch_to_js(batch: &[StoreOp]) -> JsValue {
    let ops = Array::new();
    for op in batch {
        let entry = Object::new();
        match op {
            StoreOp::Put(node) => {
                set(&entry, "op", &JsValue::from_str("put"));
                set(&entry, "node", &node_to_js(node));
            }
            StoreOp::Delete(path) => {
                set(&entry, "op", &JsValue::from_str("delete"));
                set(&entry, "path", &JsValue::from_str(path));
            }
        }
        ops.push(&entry);
    }
    ops.into()
}

/// Map an exception thrown by the storage bridge.
pub fn js_error_to_store(err: JsValue) -> StoreError {
    let message = match err.dyn_ref::<js_sys::Error>() {
        Some(error) => format!("{}: {}", String::from(error.name()), String::from(error.message())),
        None => err.as_string().unwrap_or_else(|| format!("{:?}", err)),
    };
    StoreError::backend(message)
}
