//! Persistence collaborators. The engine itself never touches storage.

pub mod kv;
pub mod persistence;
pub mod repository;

pub use kv::{JsonFileStore, KeyValueStore, MemoryStore, StoredEntry};
pub use repository::ProgressionRepository;
