// src/repositories/mod.rs
//
// Repository layer
//
// CRITICAL RULES:
// - Repositories are DUMB data mappers
// - NO business logic
// - NO invariant enforcement
// - NO event emission

pub mod kv_storage;

pub use kv_storage::{KeyValueStorage, MemoryKeyValueStorage, SqliteKeyValueStorage};

#[cfg(test)]
pub use kv_storage::MockKeyValueStorage;
