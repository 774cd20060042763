//! Key-value store adapters
//!
//! `JsonFileStore` persists across runs; `MemoryStore` lives only as long as
//! the process.

mod json_file;
mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
