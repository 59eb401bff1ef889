//! Core domain logic for TaskHub, a per-account task-tracking backend.
//! This crate is the single source of truth for business invariants:
//! ownership isolation, credential verification, and filter semantics.

pub mod auth;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use auth::token::{TokenClaims, TokenError, TokenSigner};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::account::{Account, AccountId};
pub use model::task::{Task, TaskId, TaskStatus, TaskValidationError};
pub use repo::account_repo::{AccountRepository, SqliteAccountRepository};
pub use repo::task_repo::{SqliteTaskRepository, TaskRepository};
pub use repo::{RepoError, RepoResult};
pub use service::auth_service::{AccessToken, AuthError, AuthService};
pub use service::task_service::{TaskFilter, TaskService};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
