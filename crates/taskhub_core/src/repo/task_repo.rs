//! Task repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide owner-scoped CRUD APIs over `tasks` storage.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Every read and write path appends the same owner scope clause; a task
//!   owned by another account is indistinguishable from a missing one.
//! - Write paths must call `Task::validate()` before SQL mutations.
//! - Read paths must reject invalid persisted state instead of masking it.

use crate::model::account::AccountId;
use crate::model::task::{Task, TaskId, TaskStatus};
use crate::repo::{ensure_connection_ready, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};
use uuid::Uuid;

const TASK_SELECT_SQL: &str = "SELECT
    id,
    owner_id,
    title,
    description,
    status
FROM tasks";

/// The single ownership predicate. Every statement in this module scopes by
/// it with the owner bound as `?1`, so isolation cannot be bypassed through
/// any individual entry point.
const OWNER_SCOPE_SQL: &str = "owner_id = ?1";

const TASK_COLUMNS: &[&str] = &[
    "id",
    "owner_id",
    "title",
    "description",
    "status",
    "created_at",
    "updated_at",
];

/// Repository interface for owner-scoped task CRUD operations.
///
/// `owner` is always the resolved identity of the caller, never credentials;
/// resolving a token to an identity happens outside this layer.
pub trait TaskRepository {
    /// Persists one new task and returns its stable id.
    fn insert_task(&self, task: &Task) -> RepoResult<TaskId>;
    /// Gets one task by id, visible only to its owner.
    fn get_task(&self, owner: AccountId, id: TaskId) -> RepoResult<Option<Task>>;
    /// Lists the owner's tasks matching `predicate`, in stable order.
    fn list_tasks_where(
        &self,
        owner: AccountId,
        predicate: &dyn Fn(&Task) -> bool,
    ) -> RepoResult<Vec<Task>>;
    /// Persists the mutable fields of an owned task. Only `status` is
    /// mutable after creation; title and description are never rewritten.
    fn update_task(&self, owner: AccountId, task: &Task) -> RepoResult<()>;
    /// Hard-deletes an owned task. No tombstone is kept.
    fn delete_task(&self, owner: AccountId, id: TaskId) -> RepoResult<()>;
}

/// SQLite-backed task repository.
pub struct SqliteTaskRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTaskRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, "tasks", TASK_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl TaskRepository for SqliteTaskRepository<'_> {
    fn insert_task(&self, task: &Task) -> RepoResult<TaskId> {
        task.validate()?;

        self.conn.execute(
            "INSERT INTO tasks (id, owner_id, title, description, status)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                task.id.to_string(),
                task.owner.to_string(),
                task.title.as_str(),
                task.description.as_str(),
                task_status_to_db(task.status),
            ],
        )?;

        Ok(task.id)
    }

    fn get_task(&self, owner: AccountId, id: TaskId) -> RepoResult<Option<Task>> {
        let mut stmt = self.conn.prepare(&format!(
            "{TASK_SELECT_SQL}
             WHERE {OWNER_SCOPE_SQL}
               AND id = ?2;"
        ))?;

        let mut rows = stmt.query(params![owner.to_string(), id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_task_row(row)?));
        }

        Ok(None)
    }

    fn list_tasks_where(
        &self,
        owner: AccountId,
        predicate: &dyn Fn(&Task) -> bool,
    ) -> RepoResult<Vec<Task>> {
        // Creation order with id tiebreak: stable across repeated calls and
        // unaffected by later status updates.
        let mut stmt = self.conn.prepare(&format!(
            "{TASK_SELECT_SQL}
             WHERE {OWNER_SCOPE_SQL}
             ORDER BY created_at ASC, id ASC;"
        ))?;

        let mut rows = stmt.query([owner.to_string()])?;
        let mut tasks = Vec::new();
        while let Some(row) = rows.next()? {
            let task = parse_task_row(row)?;
            if predicate(&task) {
                tasks.push(task);
            }
        }

        Ok(tasks)
    }

    fn update_task(&self, owner: AccountId, task: &Task) -> RepoResult<()> {
        task.validate()?;

        let changed = self.conn.execute(
            &format!(
                "UPDATE tasks
                 SET
                    status = ?3,
                    updated_at = (strftime('%s', 'now') * 1000)
                 WHERE {OWNER_SCOPE_SQL}
                   AND id = ?2;"
            ),
            params![
                owner.to_string(),
                task.id.to_string(),
                task_status_to_db(task.status),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(task.id));
        }

        Ok(())
    }

    fn delete_task(&self, owner: AccountId, id: TaskId) -> RepoResult<()> {
        let changed = self.conn.execute(
            &format!(
                "DELETE FROM tasks
                 WHERE {OWNER_SCOPE_SQL}
                   AND id = ?2;"
            ),
            params![owner.to_string(), id.to_string()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}

fn parse_task_row(row: &Row<'_>) -> RepoResult<Task> {
    let id = parse_uuid_column(row, "id")?;
    let owner = parse_uuid_column(row, "owner_id")?;

    let status_text: String = row.get("status")?;
    let status = parse_task_status(&status_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid task status `{status_text}` in tasks.status"))
    })?;

    let task = Task {
        id,
        owner,
        title: row.get("title")?,
        description: row.get("description")?,
        status,
    };
    task.validate()?;
    Ok(task)
}

fn parse_uuid_column(row: &Row<'_>, column: &str) -> RepoResult<Uuid> {
    let text: String = row.get(column)?;
    Uuid::parse_str(&text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{text}` in tasks.{column}"))
    })
}

fn task_status_to_db(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Open => "open",
        TaskStatus::InProgress => "in_progress",
        TaskStatus::Done => "done",
    }
}

fn parse_task_status(value: &str) -> Option<TaskStatus> {
    match value {
        "open" => Some(TaskStatus::Open),
        "in_progress" => Some(TaskStatus::InProgress),
        "done" => Some(TaskStatus::Done),
        _ => None,
    }
}
