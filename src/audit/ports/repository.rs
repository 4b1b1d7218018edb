//! Repository port for the append-only audit log.

use crate::audit::domain::{AuditLogEntry, NewAuditEntry};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for audit log repository operations.
pub type AuditLogRepositoryResult<T> = Result<T, AuditLogRepositoryError>;

/// Append-only audit log storage.
#[async_trait]
pub trait AuditLogRepository: Send + Sync {
    /// Inserts an entry and returns it with its store-assigned id and
    /// timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`AuditLogRepositoryError::Persistence`] when storage fails.
    async fn append(&self, entry: NewAuditEntry) -> AuditLogRepositoryResult<AuditLogEntry>;

    /// Returns up to `limit` entries, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AuditLogRepositoryError::Persistence`] when storage fails.
    async fn list_recent(&self, limit: usize) -> AuditLogRepositoryResult<Vec<AuditLogEntry>>;
}

/// Errors returned by audit log repository implementations.
#[derive(Debug, Clone, Error)]
pub enum AuditLogRepositoryError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl AuditLogRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
