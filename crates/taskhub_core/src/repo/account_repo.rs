//! Account repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist accounts and look them up by username for sign-in.
//!
//! # Invariants
//! - Username uniqueness is enforced by the `accounts.username` UNIQUE
//!   constraint (case-sensitive BINARY collation) and surfaced as
//!   `RepoError::Conflict`.
//! - Accounts are insert-only; the core never updates or deletes them.

use crate::model::account::{Account, AccountId};
use crate::repo::{ensure_connection_ready, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};
use uuid::Uuid;

const ACCOUNT_SELECT_SQL: &str = "SELECT
    id,
    username,
    password_hash
FROM accounts";

const ACCOUNT_COLUMNS: &[&str] = &["id", "username", "password_hash", "created_at"];

/// Repository interface for account persistence.
pub trait AccountRepository {
    /// Persists one new account. Fails with `RepoError::Conflict` when the
    /// username is already taken; the existing account is left unchanged.
    fn insert_account(&self, account: &Account) -> RepoResult<AccountId>;
    /// Looks an account up by exact username.
    fn find_by_username(&self, username: &str) -> RepoResult<Option<Account>>;
}

/// SQLite-backed account repository.
pub struct SqliteAccountRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAccountRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, "accounts", ACCOUNT_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl AccountRepository for SqliteAccountRepository<'_> {
    fn insert_account(&self, account: &Account) -> RepoResult<AccountId> {
        let inserted = self.conn.execute(
            "INSERT INTO accounts (id, username, password_hash)
             VALUES (?1, ?2, ?3);",
            params![
                account.id.to_string(),
                account.username.as_str(),
                account.password_hash.as_str(),
            ],
        );

        match inserted {
            Ok(_) => Ok(account.id),
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Err(RepoError::Conflict {
                    username: account.username.clone(),
                })
            }
            Err(err) => Err(err.into()),
        }
    }

    fn find_by_username(&self, username: &str) -> RepoResult<Option<Account>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ACCOUNT_SELECT_SQL} WHERE username = ?1;"))?;

        let mut rows = stmt.query([username])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_account_row(row)?));
        }

        Ok(None)
    }
}

fn parse_account_row(row: &Row<'_>) -> RepoResult<Account> {
    let id_text: String = row.get("id")?;
    let id = Uuid::parse_str(&id_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{id_text}` in accounts.id"))
    })?;

    Ok(Account {
        id,
        username: row.get("username")?,
        password_hash: row.get("password_hash")?,
    })
}
