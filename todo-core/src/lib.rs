//! Core domain model for the to-do tracker: the task entity and the
//! in-memory store managing it.
pub mod store;
pub mod task;

pub use store::{TaskStore, TodoError};
pub use task::Task;
