//! `PostgreSQL` repository implementation for the audit log.

use super::{
    models::{AuditRow, NewAuditRow},
    schema::audit_logs,
};
use crate::audit::{
    domain::{AuditAction, AuditEntryId, AuditLogEntry, NewAuditEntry, PersistedAuditEntry},
    ports::{AuditLogRepository, AuditLogRepositoryError, AuditLogRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use serde_json::Value;

/// `PostgreSQL` connection pool type used by audit adapters.
pub type AuditPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed audit log.
#[derive(Debug, Clone)]
pub struct PostgresAuditLogRepository {
    pool: AuditPgPool,
}

impl PostgresAuditLogRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: AuditPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> AuditLogRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> AuditLogRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(AuditLogRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(AuditLogRepositoryError::persistence)?
    }
}

#[async_trait]
impl AuditLogRepository for PostgresAuditLogRepository {
    async fn append(&self, entry: NewAuditEntry) -> AuditLogRepositoryResult<AuditLogEntry> {
        let new_row = NewAuditRow {
            task_id: entry.task_id,
            action_string: entry.action.as_str().to_owned(),
            payload: match entry.payload {
                Value::Null => None,
                payload => Some(payload),
            },
        };

        self.run_blocking(move |connection| {
            let row = diesel::insert_into(audit_logs::table)
                .values(&new_row)
                .returning(AuditRow::as_returning())
                .get_result::<AuditRow>(connection)
                .map_err(AuditLogRepositoryError::persistence)?;
            row_to_entry(row)
        })
        .await
    }

    async fn list_recent(&self, limit: usize) -> AuditLogRepositoryResult<Vec<AuditLogEntry>> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        self.run_blocking(move |connection| {
            audit_logs::table
                .order((audit_logs::created_at.desc(), audit_logs::id.desc()))
                .limit(limit)
                .select(AuditRow::as_select())
                .load::<AuditRow>(connection)
                .map_err(AuditLogRepositoryError::persistence)?
                .into_iter()
                .map(row_to_entry)
                .collect()
        })
        .await
    }
}

fn row_to_entry(row: AuditRow) -> AuditLogRepositoryResult<AuditLogEntry> {
    let action = AuditAction::new(row.action_string).map_err(AuditLogRepositoryError::persistence)?;
    Ok(AuditLogEntry::from_persisted(PersistedAuditEntry {
        id: AuditEntryId::new(row.id),
        task_id: row.task_id,
        action,
        payload: row.payload.unwrap_or(Value::Null),
        created_at: row.created_at,
    }))
}
