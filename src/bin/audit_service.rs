//! Audit log HTTP service.
//!
//! Appends and lists audit entries stored in `PostgreSQL`. Run with
//! `--help` for every option.

use clap::Parser;
use std::sync::Arc;
use taskboard::{
    audit::{adapters::postgres::PostgresAuditLogRepository, services::AuditLogService},
    config::AuditServiceConfig,
    db, http, server, telemetry,
};

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = AuditServiceConfig::parse();
    telemetry::init(config.log_level)?;

    let pool = db::connect_with_retry(&config.database).await?;
    db::ensure_schema(&pool, db::AUDIT_SCHEMA).await?;

    let service = AuditLogService::new(Arc::new(PostgresAuditLogRepository::new(pool)));
    server::serve(config.listen_addr, http::audit_app(service)).await?;
    Ok(())
}
