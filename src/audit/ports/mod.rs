//! Port contracts for the audit log.

pub mod repository;

pub use repository::{AuditLogRepository, AuditLogRepositoryError, AuditLogRepositoryResult};
