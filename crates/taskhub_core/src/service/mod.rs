//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository and credential-primitive calls into use-case
//!   level APIs.
//! - Keep transport layers decoupled from storage and crypto details.

pub mod auth_service;
pub mod task_service;
