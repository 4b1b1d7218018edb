//! Service layer for task creation, listing and partial updates.

use super::AuditDispatcher;
use crate::task::{
    domain::{NewTask, Position, Stage, Task, TaskDomainError, TaskId, TaskPatch, TaskTitle},
    ports::{AuditEvent, AuditSink, TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    stage: Option<String>,
}

impl CreateTaskRequest {
    /// Creates a request for a task in the default stage.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            stage: None,
        }
    }

    /// Sets the target stage. Blank values select the default stage.
    #[must_use]
    pub fn with_stage(mut self, stage: impl Into<String>) -> Self {
        self.stage = Some(stage.into());
        self
    }
}

/// Request payload for a partial task update.
///
/// Blank title or stage strings count as absent. The target identifier is
/// kept as received and parsed only once the fields have validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    id: String,
    title: Option<String>,
    stage: Option<String>,
    position: Option<i32>,
}

impl UpdateTaskRequest {
    /// Creates an update for `id` with no fields set.
    #[must_use]
    pub fn new(id: TaskId) -> Self {
        Self::for_raw_id(id.to_string())
    }

    /// Creates an update for an identifier taken verbatim from a caller,
    /// such as a URL path segment.
    #[must_use]
    pub fn for_raw_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: None,
            stage: None,
            position: None,
        }
    }

    /// Sets the new title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the new stage.
    #[must_use]
    pub fn with_stage(mut self, stage: impl Into<String>) -> Self {
        self.stage = Some(stage.into());
        self
    }

    /// Sets an explicit position, stored verbatim.
    #[must_use]
    pub const fn with_position(mut self, position: i32) -> Self {
        self.position = Some(position);
        self
    }
}

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Input validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// The identifier cannot name any task.
    #[error("task not found: {0}")]
    MalformedId(String),
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task lifecycle orchestration service.
///
/// Validates input before touching storage, delegates each mutation to the
/// repository as one atomic operation, and after a successful mutation
/// hands an audit event to the dispatcher without waiting for it.
pub struct TaskLifecycleService<R, A, C>
where
    R: TaskRepository,
    A: AuditSink,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    audit: AuditDispatcher<A>,
    clock: Arc<C>,
}

impl<R, A, C> Clone for TaskLifecycleService<R, A, C>
where
    R: TaskRepository,
    A: AuditSink,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            audit: self.audit.clone(),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R, A, C> TaskLifecycleService<R, A, C>
where
    R: TaskRepository,
    A: AuditSink,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub const fn new(repository: Arc<R>, audit: AuditDispatcher<A>, clock: Arc<C>) -> Self {
        Self {
            repository,
            audit,
            clock,
        }
    }

    /// Creates a task at the end of its stage.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] for a blank title or unknown
    /// stage, and [`TaskLifecycleError::Repository`] when storage fails.
    pub async fn create_task(&self, request: CreateTaskRequest) -> TaskLifecycleResult<Task> {
        let title = TaskTitle::new(request.title)?;
        let stage = parse_optional_stage(request.stage.as_deref())?.unwrap_or_default();

        let task = self
            .repository
            .append(NewTask::new(title, stage, &*self.clock))
            .await?;

        info!(task_id = %task.id(), stage = %task.stage(), position = %task.position(), "task created");
        self.audit.dispatch(AuditEvent::created(&task));
        Ok(task)
    }

    /// Returns every task in board order.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when storage fails.
    pub async fn list_tasks(&self) -> TaskLifecycleResult<Vec<Task>> {
        Ok(self.repository.list().await?)
    }

    /// Retrieves a task by identifier.
    ///
    /// Returns `Ok(None)` when the task does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when storage fails.
    pub async fn find_by_id(&self, id: TaskId) -> TaskLifecycleResult<Option<Task>> {
        Ok(self.repository.find_by_id(id).await?)
    }

    /// Applies a partial update to an existing task.
    ///
    /// Title, stage and position change independently. Moving to another
    /// stage without an explicit position appends the task to that stage.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] when no field is given or the
    /// stage is unknown, [`TaskLifecycleError::MalformedId`] when the
    /// identifier is not a UUID, [`TaskRepositoryError::NotFound`] when the
    /// task does not exist, and [`TaskRepositoryError::Persistence`] when
    /// storage fails. The stored task is unchanged in every error case.
    pub async fn update_task(&self, request: UpdateTaskRequest) -> TaskLifecycleResult<Task> {
        let UpdateTaskRequest {
            id,
            title,
            stage,
            position,
        } = request;

        let stage = parse_optional_stage(stage.as_deref())?;
        let title = title
            .filter(|value| !value.trim().is_empty())
            .map(TaskTitle::new)
            .transpose()?;
        let patch = TaskPatch::new(title, stage, position.map(Position::new))?;
        let id = TaskId::parse(&id).ok_or(TaskLifecycleError::MalformedId(id))?;

        let task = self.repository.update(id, &patch).await?;

        info!(task_id = %task.id(), stage = %task.stage(), position = %task.position(), "task updated");
        self.audit.dispatch(AuditEvent::updated(&task));
        Ok(task)
    }
}

/// Parses an optional stage, treating blank input as absent.
fn parse_optional_stage(value: Option<&str>) -> Result<Option<Stage>, TaskDomainError> {
    value
        .map(str::trim)
        .filter(|stage| !stage.is_empty())
        .map(Stage::try_from)
        .transpose()
        .map_err(TaskDomainError::from)
}
