//! Key value store adapters.
//!
//! - `FileKeyValueStore` - JSON file on disk
//! - `InMemoryKeyValueStore` - Process memory, for tests

mod file_store;
mod in_memory_store;

pub use file_store::FileKeyValueStore;
pub use in_memory_store::InMemoryKeyValueStore;
