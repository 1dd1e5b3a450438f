//! The requirements form: controller state machine, presentation adapter
//! interface, and the autosave session loop that drives them.

pub mod controller;
pub mod presenter;
pub mod session;
