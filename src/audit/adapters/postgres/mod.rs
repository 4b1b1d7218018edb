//! `PostgreSQL` adapter for the audit log.

mod models;
mod repository;
mod schema;

pub use repository::{AuditPgPool, PostgresAuditLogRepository};
