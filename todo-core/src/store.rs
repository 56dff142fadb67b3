use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::task::{DEFAULT_STATUS, Task};

/// Error type for store operations that reject invalid input.
///
/// A missing task is never an error: lookups return `Option`/`bool` so
/// callers decide the user-facing messaging.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TodoError {
    #[error("Task description cannot be empty")]
    EmptyDescription,
    #[error("Task status cannot be empty")]
    EmptyStatus,
}

/// In-memory collection of tasks, insertion order preserved.
///
/// The store owns the ID counter: it starts at 1, advances after every
/// successful add, and never resets for the life of the store — deleted
/// IDs are not reused.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TaskStore {
    tasks: Vec<Task>,
    next_id: u32,
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskStore {
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            next_id: 1,
        }
    }

    /// Adds a new task with the given description.
    ///
    /// The description is trimmed before validation and storage. Returns
    /// the ID assigned to the new task, or [`TodoError::EmptyDescription`]
    /// if nothing is left after trimming.
    pub fn add(&mut self, description: &str) -> Result<u32, TodoError> {
        let description = description.trim();
        if description.is_empty() {
            return Err(TodoError::EmptyDescription);
        }

        let id = self.next_id;
        self.tasks.push(Task::new(
            id,
            description.to_string(),
            DEFAULT_STATUS.to_string(),
        ));
        self.next_id += 1;
        Ok(id)
    }

    /// Returns a snapshot of all tasks in insertion order. Mutating the
    /// returned tasks does not affect the store.
    pub fn all_tasks(&self) -> Vec<Task> {
        self.tasks.clone()
    }

    /// Finds a task by its ID.
    pub fn find_by_id(&self, id: u32) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id() == id)
    }

    fn find_by_id_mut(&mut self, id: u32) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|task| task.id() == id)
    }

    /// Replaces the description of the task with the given ID.
    ///
    /// Returns `Ok(true)` on success, `Ok(false)` if no task has that ID,
    /// or [`TodoError::EmptyDescription`] if the replacement is blank
    /// after trimming. The store is left untouched on error.
    pub fn update_description(
        &mut self,
        id: u32,
        new_description: &str,
    ) -> Result<bool, TodoError> {
        let new_description = new_description.trim();
        if new_description.is_empty() {
            return Err(TodoError::EmptyDescription);
        }

        match self.find_by_id_mut(id) {
            Some(task) => {
                task.set_description(new_description.to_string());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Replaces the status of the task with the given ID.
    ///
    /// Same contract as [`TaskStore::update_description`]; statuses are
    /// free-form text, so any non-blank string is accepted.
    pub fn update_status(&mut self, id: u32, new_status: &str) -> Result<bool, TodoError> {
        let new_status = new_status.trim();
        if new_status.is_empty() {
            return Err(TodoError::EmptyStatus);
        }

        match self.find_by_id_mut(id) {
            Some(task) => {
                task.set_status(new_status.to_string());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Marks the task with the given ID as completed, regardless of its
    /// prior status. Returns false if no task has that ID.
    pub fn mark_completed(&mut self, id: u32) -> bool {
        match self.find_by_id_mut(id) {
            Some(task) => {
                task.mark_completed();
                true
            }
            None => false,
        }
    }

    /// Deletes the task with the given ID, preserving the order of the
    /// remaining tasks. Returns false if no task has that ID.
    pub fn delete(&mut self, id: u32) -> bool {
        match self.tasks.iter().position(|task| task.id() == id) {
            Some(index) => {
                self.tasks.remove(index);
                true
            }
            None => false,
        }
    }

    /// Returns the number of tasks currently held.
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Removes every task. The ID counter is not reset.
    pub fn clear_all(&mut self) {
        self.tasks.clear();
    }

    /// Returns the ID that will be assigned to the next added task.
    pub fn next_id(&self) -> u32 {
        self.next_id
    }

    /// Advances the ID counter, for reconciliation against externally
    /// sourced tasks.
    pub fn set_next_id(&mut self, next_id: u32) {
        self.next_id = next_id;
    }
}
