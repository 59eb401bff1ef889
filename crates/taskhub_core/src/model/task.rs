//! Task domain model.
//!
//! # Responsibility
//! - Define the task record and its status lifecycle.
//! - Provide write-path validation for free-form text fields.
//!
//! # Invariants
//! - `id` is stable and never reused for another task.
//! - `owner` is set once at creation and never reassigned.
//! - `status` is always one of the closed [`TaskStatus`] enumeration.
//! - `title` and `description` are immutable after creation; only `status`
//!   changes over a task's lifetime.

use crate::model::account::AccountId;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a task.
pub type TaskId = Uuid;

/// Task lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Created but not started. Default at creation.
    Open,
    /// Work is in progress.
    InProgress,
    /// Completed.
    Done,
}

/// Validation error for task text fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskValidationError {
    EmptyTitle,
    EmptyDescription,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "task title must not be empty"),
            Self::EmptyDescription => write!(f, "task description must not be empty"),
        }
    }
}

impl Error for TaskValidationError {}

/// A unit of work owned by exactly one account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Stable global ID used for lookups and auditing.
    pub id: TaskId,
    /// Owning account. Every read/write path is scoped by this field.
    pub owner: AccountId,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
}

impl Task {
    /// Creates a new task with a generated stable ID and status `Open`.
    pub fn new(
        owner: AccountId,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self::with_id(Uuid::new_v4(), owner, title, description)
    }

    /// Creates a task with a caller-provided stable ID.
    ///
    /// Used by persistence paths where identity already exists.
    pub fn with_id(
        id: TaskId,
        owner: AccountId,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id,
            owner,
            title: title.into(),
            description: description.into(),
            status: TaskStatus::Open,
        }
    }

    /// Checks text-field invariants.
    ///
    /// Repositories call this before every SQL mutation.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.title.trim().is_empty() {
            return Err(TaskValidationError::EmptyTitle);
        }
        if self.description.trim().is_empty() {
            return Err(TaskValidationError::EmptyDescription);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_task_defaults_to_open() {
        let owner = Uuid::new_v4();
        let task = Task::new(owner, "Buy milk", "2%");
        assert_eq!(task.status, TaskStatus::Open);
        assert_eq!(task.owner, owner);
    }

    #[test]
    fn validate_rejects_blank_text_fields() {
        let owner = Uuid::new_v4();
        let no_title = Task::new(owner, "   ", "body");
        assert_eq!(no_title.validate(), Err(TaskValidationError::EmptyTitle));

        let no_description = Task::new(owner, "title", "");
        assert_eq!(
            no_description.validate(),
            Err(TaskValidationError::EmptyDescription)
        );

        let valid = Task::new(owner, "title", "body");
        assert_eq!(valid.validate(), Ok(()));
    }
}
