//! Domain model for accounts and the tasks they own.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//!
//! # Invariants
//! - Every domain object is identified by a stable UUID.
//! - Every task references exactly one owning account.

pub mod account;
pub mod task;
