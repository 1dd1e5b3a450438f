//! Form logic for reqform.
//!
//! This crate defines the storage "port" (`KvStore`) that the infrastructure
//! layer implements, plus everything that does not touch I/O directly: the
//! step schema, field validation, prompt generation, the form controller and
//! the autosave session loop. It depends only on `reqform-types` -- never on
//! `reqform-infra` or any database crate.

pub mod form;
pub mod prompt;
pub mod schema;
pub mod storage;
pub mod validation;

#[cfg(test)]
pub(crate) mod testing;
