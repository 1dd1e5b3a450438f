//! Persistence for reqform.
//!
//! `KvStore` is the port the infrastructure layer implements; `FormStorage`
//! is the adapter that maps form records onto it.

pub mod adapter;
pub mod kv_store;
