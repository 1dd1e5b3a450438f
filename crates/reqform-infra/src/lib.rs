//! Infrastructure layer for reqform.
//!
//! Contains implementations of the `KvStore` port defined in `reqform-core`
//! (SQLite and in-memory), the `config.toml` loader, and data directory
//! resolution.

pub mod config;
pub mod filesystem;
pub mod memory;
pub mod sqlite;
