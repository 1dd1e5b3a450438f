//! SQLite-backed storage.

pub mod kv;
pub mod pool;
