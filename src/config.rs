//! Command-line and environment configuration for both services.

use clap::{Args, Parser};
use std::net::SocketAddr;
use std::time::Duration;
use tracing::Level;

/// Database connection settings shared by both services.
#[derive(Debug, Clone, Args)]
pub struct DatabaseArgs {
    /// `PostgreSQL` connection URL.
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: String,

    /// Maximum number of pooled connections.
    #[arg(long = "pool-size", env = "DATABASE_POOL_SIZE", default_value_t = 10)]
    pub pool_size: u32,

    /// Seconds to keep retrying the initial connection.
    #[arg(long, env = "DATABASE_CONNECT_TIMEOUT_SECS", default_value_t = 30)]
    pub connect_timeout_secs: u64,
}

impl DatabaseArgs {
    /// Total time allowed for the database to become reachable.
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

/// Configuration of the task service.
#[derive(Debug, Clone, Parser)]
#[command(name = "task-service", about = "Kanban task board HTTP service")]
pub struct TaskServiceConfig {
    /// Database settings.
    #[command(flatten)]
    pub database: DatabaseArgs,

    /// Address to listen on.
    #[arg(long, env = "TASK_SERVICE_ADDR", default_value = "0.0.0.0:8080")]
    pub listen_addr: SocketAddr,

    /// Base URL of the audit service. Audit events are dropped when unset.
    #[arg(long, env = "AUDIT_SERVICE_URL")]
    pub audit_service_url: Option<String>,

    /// Milliseconds allowed for one audit delivery attempt.
    #[arg(long, env = "AUDIT_TIMEOUT_MS", default_value_t = 2000)]
    pub audit_timeout_ms: u64,

    /// Maximum log level.
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: Level,
}

impl TaskServiceConfig {
    /// Budget for one audit delivery attempt.
    #[must_use]
    pub const fn audit_timeout(&self) -> Duration {
        Duration::from_millis(self.audit_timeout_ms)
    }
}

/// Configuration of the audit service.
#[derive(Debug, Clone, Parser)]
#[command(name = "audit-service", about = "Append-only audit log HTTP service")]
pub struct AuditServiceConfig {
    /// Database settings.
    #[command(flatten)]
    pub database: DatabaseArgs,

    /// Address to listen on.
    #[arg(long, env = "AUDIT_SERVICE_ADDR", default_value = "0.0.0.0:8081")]
    pub listen_addr: SocketAddr,

    /// Maximum log level.
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: Level,
}
