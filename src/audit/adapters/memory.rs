//! In-memory audit log repository for tests and local runs.

use crate::audit::{
    domain::{AuditEntryId, AuditLogEntry, NewAuditEntry, PersistedAuditEntry},
    ports::{AuditLogRepository, AuditLogRepositoryError, AuditLogRepositoryResult},
};
use async_trait::async_trait;
use mockable::Clock;
use std::sync::{Arc, RwLock};

/// Thread-safe in-memory audit log.
///
/// Identifiers are assigned from a counter starting at 1 and timestamps
/// from the injected clock.
#[derive(Debug)]
pub struct InMemoryAuditLogRepository<C>
where
    C: Clock + Send + Sync,
{
    state: Arc<RwLock<InMemoryAuditState>>,
    clock: C,
}

#[derive(Debug, Default)]
struct InMemoryAuditState {
    entries: Vec<AuditLogEntry>,
    last_id: i64,
}

impl<C> InMemoryAuditLogRepository<C>
where
    C: Clock + Send + Sync,
{
    /// Creates an empty log stamped by `clock`.
    #[must_use]
    pub fn new(clock: C) -> Self {
        Self {
            state: Arc::new(RwLock::new(InMemoryAuditState::default())),
            clock,
        }
    }
}

fn lock_error<E: std::fmt::Display>(err: E) -> AuditLogRepositoryError {
    AuditLogRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl<C> AuditLogRepository for InMemoryAuditLogRepository<C>
where
    C: Clock + Send + Sync,
{
    async fn append(&self, entry: NewAuditEntry) -> AuditLogRepositoryResult<AuditLogEntry> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.last_id += 1;
        let stored = AuditLogEntry::from_persisted(PersistedAuditEntry {
            id: AuditEntryId::new(state.last_id),
            task_id: entry.task_id,
            action: entry.action,
            payload: entry.payload,
            created_at: self.clock.utc(),
        });
        state.entries.push(stored.clone());
        Ok(stored)
    }

    async fn list_recent(&self, limit: usize) -> AuditLogRepositoryResult<Vec<AuditLogEntry>> {
        let state = self.state.read().map_err(lock_error)?;
        let mut entries = state.entries.clone();
        entries.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then_with(|| b.id().cmp(&a.id()))
        });
        entries.truncate(limit);
        Ok(entries)
    }
}
