//! Node store trait and the in-memory implementation

mod memory;
mod trait_def;

pub use memory::MemoryStore;
pub use trait_def::{NodeStore, StoreOp};
