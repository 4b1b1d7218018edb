//! Repository port for task persistence and transactional updates.

use crate::task::domain::{NewTask, Task, TaskId, TaskPatch};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
///
/// Implementations own all persisted task state. Callers never cache tasks
/// between operations.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Appends a new task to the end of its stage and returns the stored row.
    ///
    /// The position is `max(position in stage) + 1`, or `1` for an empty
    /// stage. The max-read and the insert are not serialised against other
    /// writers, so concurrent appends may share a position.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when storage fails.
    async fn append(&self, task: NewTask) -> TaskRepositoryResult<Task>;

    /// Applies `patch` to the task with `id` as one atomic read-modify-write.
    ///
    /// The current row is read, the patch planned against it, the next stage
    /// position computed when the stage changes without an explicit
    /// position, and the row written back. Any failure leaves the stored
    /// task untouched.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not
    /// exist, or [`TaskRepositoryError::Persistence`] when storage fails.
    async fn update(&self, id: TaskId, patch: &TaskPatch) -> TaskRepositoryResult<Task>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Returns every task in board order: stage order, ascending position,
    /// then newest first for equal positions.
    async fn list(&self) -> TaskRepositoryResult<Vec<Task>>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

/// Raised when the next position in a stage would overflow the column.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("position overflow in stage {0}")]
pub struct PositionOverflow(pub crate::task::domain::Stage);
