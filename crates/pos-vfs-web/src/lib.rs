//! Browser binding for the Pseudo OS VFS
//!
//! Runs on the browser's main thread. Persists nodes to IndexedDB through
//! the `PosStorage` JavaScript object (`js/pos-storage.js`) and exports
//! `WebVfs` to the desktop UI.
//!
//! ## Module Structure
//!
//! - `bindings` - `PosStorage` and console externs
//! - `convert` - `FsNode` <-> JS record conversion
//! - `store` - `IndexedDbStore`, the `NodeStore` over `PosStorage`
//! - `clock` - `DateClock`, timestamps from `Date.now()`
//! - `web_vfs` - `WebVfs`, the exported camelCase API
//!
//! ## Usage
//!
//! ```text
//! <script src="pos-storage.js"></script>
//! const fs = await WebVfs.init();            // or WebVfs.init('{"default_drive":"D"}')
//! await fs.writeFile("C:\\System\\Desktop\\hi.txt", new TextEncoder().encode("hi"));
//! ```

// =============================================================================
// Module declarations
// =============================================================================

pub mod bindings;
pub mod clock;
pub mod convert;
pub mod store;
mod web_vfs;

// =============================================================================
// Public re-exports
// =============================================================================

pub use clock::DateClock;
pub use store::IndexedDbStore;
pub use web_vfs::{install_hooks, to_js_error, WebVfs};
