//! Diesel row models for audit log persistence.

use super::schema::audit_logs;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Query result row for audit entries.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = audit_logs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AuditRow {
    /// Store-assigned identifier.
    pub id: i64,
    /// Weak task reference.
    pub task_id: Option<uuid::Uuid>,
    /// Event name.
    pub action_string: String,
    /// Event document.
    pub payload: Option<Value>,
    /// Insertion timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for audit entries. Id and timestamp use column defaults.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = audit_logs)]
pub struct NewAuditRow {
    /// Weak task reference.
    pub task_id: Option<uuid::Uuid>,
    /// Event name.
    pub action_string: String,
    /// Event document, `None` for JSON null.
    pub payload: Option<Value>,
}
