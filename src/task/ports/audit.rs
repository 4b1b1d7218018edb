//! Outbound port for audit events emitted after task mutations.

use crate::task::domain::{Position, Stage, Task, TaskId};
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

/// Action names recorded by the audit log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskAuditAction {
    /// A task was created.
    TaskCreated,
    /// A task was updated.
    TaskUpdated,
}

impl TaskAuditAction {
    /// Returns the wire name of the action.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TaskCreated => "task_created",
            Self::TaskUpdated => "task_updated",
        }
    }
}

/// Task fields captured in the event payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskSnapshot {
    /// Title after the mutation.
    pub title: String,
    /// Stage after the mutation.
    pub stage: Stage,
    /// Position after the mutation.
    pub position: Position,
}

/// Audit event describing one successful task mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditEvent {
    /// Task the event refers to.
    pub task_id: TaskId,
    /// What happened.
    pub action: TaskAuditAction,
    /// Task state after the mutation.
    pub payload: TaskSnapshot,
}

impl AuditEvent {
    /// Builds a `task_created` event.
    #[must_use]
    pub fn created(task: &Task) -> Self {
        Self::for_task(task, TaskAuditAction::TaskCreated)
    }

    /// Builds a `task_updated` event.
    #[must_use]
    pub fn updated(task: &Task) -> Self {
        Self::for_task(task, TaskAuditAction::TaskUpdated)
    }

    fn for_task(task: &Task, action: TaskAuditAction) -> Self {
        Self {
            task_id: task.id(),
            action,
            payload: TaskSnapshot {
                title: task.title().as_str().to_owned(),
                stage: task.stage(),
                position: task.position(),
            },
        }
    }
}

/// Destination for audit events.
///
/// Delivery is attempted once. Callers discard the outcome; the result
/// exists so that adapters can be tested and outcomes traced.
#[async_trait]
pub trait AuditSink: Send + Sync + 'static {
    /// Delivers one event.
    ///
    /// # Errors
    ///
    /// Returns [`AuditDeliveryError`] when the event could not be delivered.
    async fn deliver(&self, event: AuditEvent) -> Result<(), AuditDeliveryError>;
}

/// Reasons an audit event was not delivered.
#[derive(Debug, Clone, Error)]
pub enum AuditDeliveryError {
    /// The event could not be serialised or sent.
    #[error("audit transport failure: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),

    /// The audit service answered with a non-success status.
    #[error("audit service rejected event with status {0}")]
    Rejected(u16),

    /// Delivery did not finish within its budget.
    #[error("audit delivery timed out")]
    TimedOut,
}

impl AuditDeliveryError {
    /// Wraps a transport error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }
}
