//! Owner-scoped task use-cases.
//!
//! # Responsibility
//! - Provide stable CRUD and filter-query entry points for core callers.
//! - Delegate persistence to the task repository.
//!
//! # Invariants
//! - Every operation takes the resolved owner identity as an explicit
//!   argument; there is no ambient "current user".
//! - All lookups go through the repository's owner scope, so a foreign task
//!   surfaces as `RepoError::NotFound`, never as a permission error.

use crate::model::account::AccountId;
use crate::model::task::{Task, TaskId, TaskStatus};
use crate::repo::task_repo::TaskRepository;
use crate::repo::{RepoError, RepoResult};
use log::{debug, error};

/// Optional constraints for [`TaskService::get_tasks`].
///
/// Both fields are independent; when both are set a task must satisfy both.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    /// Exact status match.
    pub status: Option<TaskStatus>,
    /// Case-insensitive substring over title or description. Empty strings
    /// are treated as absent.
    pub search: Option<String>,
}

impl TaskFilter {
    /// The filter predicate, applied in core rather than interpolated into
    /// engine query strings so that it stays identical across back-ends.
    pub fn matches(&self, task: &Task) -> bool {
        if let Some(status) = self.status {
            if task.status != status {
                return false;
            }
        }

        match self.search.as_deref() {
            None | Some("") => true,
            Some(search) => {
                let needle = search.to_lowercase();
                task.title.to_lowercase().contains(&needle)
                    || task.description.to_lowercase().contains(&needle)
            }
        }
    }
}

/// Use-case service wrapper for owner-scoped task operations.
pub struct TaskService<R: TaskRepository> {
    repo: R,
}

impl<R: TaskRepository> TaskService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists the owner's tasks matching `filter`.
    ///
    /// With an empty filter this returns every task the owner has, in an
    /// order that is stable across repeated calls with no intervening
    /// mutation.
    pub fn get_tasks(&self, owner: AccountId, filter: &TaskFilter) -> RepoResult<Vec<Task>> {
        debug!(
            "event=task_list module=tasks owner={owner} status_filter={:?} search={:?}",
            filter.status, filter.search
        );
        self.repo
            .list_tasks_where(owner, &|task| filter.matches(task))
            .map_err(|err| {
                error!("event=task_list module=tasks status=error owner={owner} error={err}");
                err
            })
    }

    /// Gets one task by id.
    ///
    /// Fails with [`RepoError::NotFound`] when no task with `id` exists for
    /// this owner.
    pub fn get_task_by_id(&self, owner: AccountId, id: TaskId) -> RepoResult<Task> {
        debug!("event=task_get module=tasks owner={owner} task={id}");
        self.repo
            .get_task(owner, id)?
            .ok_or(RepoError::NotFound(id))
    }

    /// Creates a task owned by `owner` with status `Open` and a fresh id.
    pub fn create_task(
        &self,
        owner: AccountId,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> RepoResult<Task> {
        let task = Task::new(owner, title, description);
        debug!(
            "event=task_create module=tasks owner={owner} task={}",
            task.id
        );
        self.repo.insert_task(&task)?;
        Ok(task)
    }

    /// Permanently deletes one of the owner's tasks.
    pub fn delete_task(&self, owner: AccountId, id: TaskId) -> RepoResult<()> {
        debug!("event=task_delete module=tasks owner={owner} task={id}");
        self.repo.delete_task(owner, id)
    }

    /// Sets the status of one of the owner's tasks and returns the updated
    /// record. Idempotent for an unchanged status.
    ///
    /// The get-then-update pair is not atomic: when a concurrent delete wins
    /// the race, the update's `NotFound` is surfaced, not swallowed.
    pub fn update_task_status(
        &self,
        owner: AccountId,
        id: TaskId,
        new_status: TaskStatus,
    ) -> RepoResult<Task> {
        debug!(
            "event=task_update_status module=tasks owner={owner} task={id} new_status={new_status:?}"
        );
        let mut task = self.get_task_by_id(owner, id)?;
        task.status = new_status;
        self.repo.update_task(owner, &task)?;
        Ok(task)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn task(title: &str, description: &str, status: TaskStatus) -> Task {
        let mut task = Task::new(Uuid::new_v4(), title, description);
        task.status = status;
        task
    }

    #[test]
    fn empty_filter_matches_everything() {
        let filter = TaskFilter::default();
        assert!(filter.matches(&task("Buy milk", "2%", TaskStatus::Open)));
        assert!(filter.matches(&task("Ship crate", "publish", TaskStatus::Done)));
    }

    #[test]
    fn status_filter_is_exact() {
        let filter = TaskFilter {
            status: Some(TaskStatus::Done),
            search: None,
        };
        assert!(filter.matches(&task("a", "b", TaskStatus::Done)));
        assert!(!filter.matches(&task("a", "b", TaskStatus::Open)));
        assert!(!filter.matches(&task("a", "b", TaskStatus::InProgress)));
    }

    #[test]
    fn search_is_case_insensitive_across_title_and_description() {
        let filter = TaskFilter {
            status: None,
            search: Some("MILK".to_string()),
        };
        assert!(filter.matches(&task("Buy milk", "2%", TaskStatus::Open)));
        assert!(filter.matches(&task("groceries", "skimmed Milk", TaskStatus::Open)));
        assert!(!filter.matches(&task("Buy bread", "rye", TaskStatus::Open)));
    }

    #[test]
    fn both_fields_compose_with_and() {
        let filter = TaskFilter {
            status: Some(TaskStatus::Open),
            search: Some("milk".to_string()),
        };
        assert!(filter.matches(&task("Buy milk", "2%", TaskStatus::Open)));
        assert!(!filter.matches(&task("Buy milk", "2%", TaskStatus::Done)));
        assert!(!filter.matches(&task("Buy bread", "rye", TaskStatus::Open)));
    }

    #[test]
    fn empty_search_string_is_treated_as_absent() {
        let filter = TaskFilter {
            status: None,
            search: Some(String::new()),
        };
        assert!(filter.matches(&task("anything", "at all", TaskStatus::Open)));
    }
}
