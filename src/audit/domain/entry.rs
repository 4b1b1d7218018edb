//! Audit log entries.

use super::AuditDomainError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use uuid::Uuid;

/// Store-assigned audit entry identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuditEntryId(i64);

impl AuditEntryId {
    /// Wraps a raw identifier.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for AuditEntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Free-text event name such as `task_created`, kept as received. Never
/// blank.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuditAction(String);

impl AuditAction {
    /// Creates a validated action name.
    ///
    /// # Errors
    ///
    /// Returns [`AuditDomainError::EmptyAction`] when the value is blank.
    pub fn new(value: impl Into<String>) -> Result<Self, AuditDomainError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(AuditDomainError::EmptyAction);
        }
        Ok(Self(raw))
    }

    /// Returns the action as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Entry awaiting insertion. The store assigns id and timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAuditEntry {
    /// Weak reference to the task the action concerns.
    pub task_id: Option<Uuid>,
    /// Event name.
    pub action: AuditAction,
    /// Untyped event document; `Value::Null` when absent.
    pub payload: Value,
}

/// Immutable audit log entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditLogEntry {
    id: AuditEntryId,
    task_id: Option<Uuid>,
    #[serde(rename = "action_string")]
    action: AuditAction,
    payload: Value,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a stored entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedAuditEntry {
    /// Store-assigned identifier.
    pub id: AuditEntryId,
    /// Weak task reference.
    pub task_id: Option<Uuid>,
    /// Event name.
    pub action: AuditAction,
    /// Event document.
    pub payload: Value,
    /// Store-assigned timestamp.
    pub created_at: DateTime<Utc>,
}

impl AuditLogEntry {
    /// Reconstructs an entry from storage.
    #[must_use]
    pub fn from_persisted(data: PersistedAuditEntry) -> Self {
        Self {
            id: data.id,
            task_id: data.task_id,
            action: data.action,
            payload: data.payload,
            created_at: data.created_at,
        }
    }

    /// Returns the entry identifier.
    #[must_use]
    pub const fn id(&self) -> AuditEntryId {
        self.id
    }

    /// Returns the referenced task, if any.
    #[must_use]
    pub const fn task_id(&self) -> Option<Uuid> {
        self.task_id
    }

    /// Returns the event name.
    #[must_use]
    pub const fn action(&self) -> &AuditAction {
        &self.action
    }

    /// Returns the event document.
    #[must_use]
    pub const fn payload(&self) -> &Value {
        &self.payload
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
