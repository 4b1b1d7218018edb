//! Port contracts for the task board.
//!
//! Ports define infrastructure-agnostic interfaces used by task services.

pub mod audit;
pub mod repository;

pub use audit::{AuditDeliveryError, AuditEvent, AuditSink, TaskAuditAction, TaskSnapshot};
pub use repository::{PositionOverflow, TaskRepository, TaskRepositoryError, TaskRepositoryResult};
