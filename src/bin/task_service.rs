//! Task board HTTP service.
//!
//! Stores tasks in `PostgreSQL` and emits audit events to the audit service
//! named by `AUDIT_SERVICE_URL`. Run with `--help` for every option.

use clap::Parser;
use mockable::DefaultClock;
use std::sync::Arc;
use taskboard::{
    config::TaskServiceConfig,
    db, http, server,
    task::{
        adapters::{audit_client::HttpAuditClient, postgres::PostgresTaskRepository},
        services::{AuditDispatcher, TaskLifecycleService},
    },
    telemetry,
};
use tracing::info;

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = TaskServiceConfig::parse();
    telemetry::init(config.log_level)?;

    let pool = db::connect_with_retry(&config.database).await?;
    db::ensure_schema(&pool, db::TASK_SCHEMA).await?;

    let audit_client =
        HttpAuditClient::new(config.audit_service_url.as_deref(), config.audit_timeout())?;
    match audit_client.endpoint() {
        Some(endpoint) => info!(endpoint, "audit events enabled"),
        None => info!("audit service not configured, audit events are discarded"),
    }

    let service = TaskLifecycleService::new(
        Arc::new(PostgresTaskRepository::new(pool)),
        AuditDispatcher::new(Arc::new(audit_client)).with_budget(config.audit_timeout()),
        Arc::new(DefaultClock),
    );

    server::serve(config.listen_addr, http::task_app(service)).await?;
    Ok(())
}
