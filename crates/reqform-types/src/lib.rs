//! Shared domain types for reqform.
//!
//! This crate contains the records that flow between the form controller,
//! the storage adapter and the prompt generator: FormData, progress snapshots,
//! results records, validation rules, configuration, and their error types.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod config;
pub mod error;
pub mod form;
pub mod prompt;
pub mod validation;
