use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Status assigned to every freshly created task.
pub const DEFAULT_STATUS: &str = "Pending";

/// Status set by [`Task::mark_completed`]. Comparisons against it are
/// case-insensitive.
pub const COMPLETED_STATUS: &str = "Completed";

/// A single to-do item with a unique ID, a description, and a free-form
/// status.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Task {
    id: u32,
    description: String,
    status: String,
}

impl Task {
    /// Creates a task from explicit parts, bypassing auto-ID assignment.
    /// Used when reconstructing tasks (e.g. imports); no validation is
    /// applied here.
    pub fn new(id: u32, description: String, status: String) -> Self {
        Self {
            id,
            description,
            status,
        }
    }

    /// Returns the ID of the task.
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Returns the description of the task.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the status of the task.
    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn set_description(&mut self, description: String) {
        self.description = description;
    }

    pub fn set_status(&mut self, status: String) {
        self.status = status;
    }

    /// Sets the status to `"Completed"`. Idempotent.
    pub fn mark_completed(&mut self) {
        self.status = COMPLETED_STATUS.to_string();
    }

    /// True when the status reads "completed" in any casing.
    pub fn is_completed(&self) -> bool {
        self.status.eq_ignore_ascii_case(COMPLETED_STATUS)
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID: {} | Description: {} | Status: {}",
            self.id, self.description, self.status
        )
    }
}
