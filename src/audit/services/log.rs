//! Append and list operations on the audit log.

use crate::audit::{
    domain::{AuditAction, AuditDomainError, AuditLogEntry, NewAuditEntry},
    ports::{AuditLogRepository, AuditLogRepositoryError},
};
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

/// Number of entries returned by a recent-entries listing.
pub const DEFAULT_RECENT_LIMIT: usize = 200;

/// Request payload for appending an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppendEntryRequest {
    task_id: Option<Uuid>,
    action: String,
    payload: Value,
}

impl AppendEntryRequest {
    /// Creates a request with no task reference and a null payload.
    #[must_use]
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            task_id: None,
            action: action.into(),
            payload: Value::Null,
        }
    }

    /// Sets the task reference. The task is not required to exist.
    #[must_use]
    pub const fn with_task_id(mut self, task_id: Uuid) -> Self {
        self.task_id = Some(task_id);
        self
    }

    /// Sets the event document.
    #[must_use]
    pub fn with_payload(mut self, payload: Value) -> Self {
        self.payload = payload;
        self
    }
}

/// Service-level errors for audit log operations.
#[derive(Debug, Error)]
pub enum AuditLogError {
    /// Input validation failed.
    #[error(transparent)]
    Domain(#[from] AuditDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] AuditLogRepositoryError),
}

/// Result type for audit log service operations.
pub type AuditLogResult<T> = Result<T, AuditLogError>;

/// Audit log service.
pub struct AuditLogService<R>
where
    R: AuditLogRepository,
{
    repository: Arc<R>,
}

impl<R> Clone for AuditLogService<R>
where
    R: AuditLogRepository,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R> AuditLogService<R>
where
    R: AuditLogRepository,
{
    /// Creates a new audit log service.
    #[must_use]
    pub const fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Appends an entry.
    ///
    /// # Errors
    ///
    /// Returns [`AuditLogError::Domain`] for a blank action and
    /// [`AuditLogError::Repository`] when storage fails.
    pub async fn append(&self, request: AppendEntryRequest) -> AuditLogResult<AuditLogEntry> {
        let action = AuditAction::new(request.action)?;
        let entry = self
            .repository
            .append(NewAuditEntry {
                task_id: request.task_id,
                action,
                payload: request.payload,
            })
            .await?;
        info!(entry_id = %entry.id(), action = %entry.action(), "audit entry recorded");
        Ok(entry)
    }

    /// Returns the most recent entries, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AuditLogError::Repository`] when storage fails.
    pub async fn list_recent(&self, limit: usize) -> AuditLogResult<Vec<AuditLogEntry>> {
        Ok(self.repository.list_recent(limit).await?)
    }
}
