//! Domain model for the audit log.
//!
//! Entries are immutable records of actions taken against tasks. The task
//! reference is informational only: nothing checks that the task exists.

mod entry;
mod error;

pub use entry::{AuditAction, AuditEntryId, AuditLogEntry, NewAuditEntry, PersistedAuditEntry};
pub use error::AuditDomainError;
