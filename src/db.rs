//! `PostgreSQL` pool construction and schema bootstrap.
//!
//! Services start before their database is guaranteed to be reachable, so
//! pool construction is retried until a deadline. Schema statements are
//! idempotent and applied on every start.

use crate::config::DatabaseArgs;
use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{info, warn};

/// Connection pool shared by the `PostgreSQL` adapters.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// Schema for the task service.
pub const TASK_SCHEMA: &[&str] =
    &[include_str!("../migrations/2026-10-01-000000_create_tasks/up.sql")];

/// Schema for the audit service.
pub const AUDIT_SCHEMA: &[&str] =
    &[include_str!("../migrations/2026-10-01-000001_create_audit_logs/up.sql")];

/// Pause between connection attempts.
const RETRY_INTERVAL: Duration = Duration::from_secs(2);

/// Time allowed for a single connection attempt.
const ATTEMPT_TIMEOUT: Duration = Duration::from_secs(5);

/// Errors raised while preparing the database.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// The database stayed unreachable until the deadline.
    #[error("database unreachable: {0}")]
    Connect(#[source] PoolError),

    /// A schema statement failed.
    #[error("schema setup failed: {0}")]
    Schema(#[source] diesel::result::Error),

    /// A blocking database task panicked or was cancelled.
    #[error("database task failed: {0}")]
    Task(#[source] tokio::task::JoinError),
}

/// Builds a connection pool, retrying until `args.connect_timeout()`
/// elapses.
///
/// # Errors
///
/// Returns [`DatabaseError::Connect`] with the last failure once the
/// deadline passes.
pub async fn connect_with_retry(args: &DatabaseArgs) -> Result<PgPool, DatabaseError> {
    let deadline = Instant::now() + args.connect_timeout();
    loop {
        let url = args.database_url.clone();
        let pool_size = args.pool_size;
        let attempt = tokio::task::spawn_blocking(move || build_pool(url, pool_size))
            .await
            .map_err(DatabaseError::Task)?;

        match attempt {
            Ok(pool) => {
                info!(pool_size, "database connected");
                return Ok(pool);
            }
            Err(err) if Instant::now() >= deadline => return Err(DatabaseError::Connect(err)),
            Err(err) => {
                warn!(error = %err, "database not ready, retrying");
                tokio::time::sleep(RETRY_INTERVAL).await;
            }
        }
    }
}

fn build_pool(url: String, pool_size: u32) -> Result<PgPool, PoolError> {
    let manager = ConnectionManager::<PgConnection>::new(url);
    Pool::builder()
        .max_size(pool_size)
        .connection_timeout(ATTEMPT_TIMEOUT)
        .build(manager)
}

/// Applies idempotent schema statements.
///
/// # Errors
///
/// Returns [`DatabaseError`] when a connection cannot be checked out or a
/// statement fails.
pub async fn ensure_schema(
    pool: &PgPool,
    statements: &'static [&'static str],
) -> Result<(), DatabaseError> {
    let pool = pool.clone();
    tokio::task::spawn_blocking(move || {
        let mut connection = pool.get().map_err(DatabaseError::Connect)?;
        for statement in statements {
            connection
                .batch_execute(statement)
                .map_err(DatabaseError::Schema)?;
        }
        Ok(())
    })
    .await
    .map_err(DatabaseError::Task)?
}
