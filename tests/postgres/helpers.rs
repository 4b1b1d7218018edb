//! Shared helpers for `PostgreSQL` integration tests.
//!
//! Tests use the database named by `TASKBOARD_TEST_DATABASE_URL` when it is
//! set and otherwise start one embedded cluster shared by the whole test
//! binary. Each test then works in its own throwaway schema.

use diesel::PgConnection;
use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool};
use postgresql_embedded::PostgreSQL;
use std::sync::OnceLock;
use taskboard::db::{self, PgPool};
use tokio::runtime::Runtime;
use uuid::Uuid;

/// Environment variable naming an external test database.
pub const DATABASE_URL_VAR: &str = "TASKBOARD_TEST_DATABASE_URL";

/// Error type for fallible test setup.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

static EMBEDDED: OnceLock<Result<EmbeddedCluster, String>> = OnceLock::new();

/// Embedded cluster kept alive for the lifetime of the test binary.
struct EmbeddedCluster {
    _runtime: Runtime,
    _postgres: PostgreSQL,
    url: String,
}

impl EmbeddedCluster {
    fn start() -> Result<Self, BoxError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;
        let mut postgres = PostgreSQL::default();
        runtime.block_on(async {
            postgres.setup().await?;
            postgres.start().await?;
            Ok::<(), postgresql_embedded::Error>(())
        })?;
        let url = postgres.settings().url("postgres");
        Ok(Self {
            _runtime: runtime,
            _postgres: postgres,
            url,
        })
    }
}

/// Returns the URL of the database the tests run against.
///
/// # Errors
///
/// Returns an error if no URL is configured and the embedded cluster fails
/// to start.
async fn database_url() -> Result<String, BoxError> {
    if let Ok(url) = std::env::var(DATABASE_URL_VAR) {
        return Ok(url);
    }
    let cluster = tokio::task::spawn_blocking(|| {
        EMBEDDED.get_or_init(|| {
            std::thread::spawn(|| EmbeddedCluster::start().map_err(|err| err.to_string()))
                .join()
                .unwrap_or_else(|_| Err("embedded cluster start panicked".to_owned()))
        })
    })
    .await?;
    match cluster {
        Ok(cluster) => Ok(cluster.url.clone()),
        Err(message) => Err(format!("embedded PostgreSQL unavailable: {message}").into()),
    }
}

/// Points every pooled connection at one schema.
#[derive(Debug)]
struct SearchPath(String);

impl CustomizeConnection<PgConnection, diesel::r2d2::Error> for SearchPath {
    fn on_acquire(&self, connection: &mut PgConnection) -> Result<(), diesel::r2d2::Error> {
        connection
            .batch_execute(&format!("SET search_path TO {}", self.0))
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Pool bound to a throwaway schema, dropped with the guard.
pub struct IsolatedSchema {
    pool: PgPool,
    schema: String,
}

impl IsolatedSchema {
    /// Returns the schema-bound pool.
    pub fn pool(&self) -> PgPool {
        self.pool.clone()
    }

    /// Runs raw SQL inside the schema.
    ///
    /// # Errors
    ///
    /// Returns an error if a connection cannot be checked out or the SQL
    /// fails.
    pub async fn execute(&self, sql: &'static str) -> Result<(), BoxError> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || -> Result<(), BoxError> {
            pool.get()?.batch_execute(sql)?;
            Ok(())
        })
        .await?
    }
}

impl Drop for IsolatedSchema {
    fn drop(&mut self) {
        if let Ok(mut connection) = self.pool.get() {
            let statement = format!("DROP SCHEMA IF EXISTS {} CASCADE", self.schema);
            if let Err(err) = connection.batch_execute(&statement) {
                tracing::warn!(error = %err, schema = %self.schema, "schema cleanup failed");
            }
        }
    }
}

/// Creates a fresh schema with `statements` applied.
///
/// # Errors
///
/// Returns an error if no database is reachable or the schema cannot be
/// created.
pub async fn isolated_schema(
    statements: &'static [&'static str],
) -> Result<IsolatedSchema, BoxError> {
    let url = database_url().await?;
    let schema = format!("taskboard_test_{}", Uuid::new_v4().simple());

    let create = format!("CREATE SCHEMA {schema}");
    let admin_url = url.clone();
    tokio::task::spawn_blocking(move || -> Result<(), BoxError> {
        let manager = ConnectionManager::<PgConnection>::new(admin_url);
        let pool = Pool::builder().max_size(1).build(manager)?;
        pool.get()?.batch_execute(&create)?;
        Ok(())
    })
    .await??;

    let search_path = SearchPath(schema.clone());
    let pool = tokio::task::spawn_blocking(move || {
        Pool::builder()
            .max_size(4)
            .connection_customizer(Box::new(search_path))
            .build(ConnectionManager::<PgConnection>::new(url))
    })
    .await??;

    db::ensure_schema(&pool, statements).await?;
    Ok(IsolatedSchema { pool, schema })
}
