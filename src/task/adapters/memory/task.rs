//! In-memory task repository for tests and local runs.

use crate::task::{
    domain::{NewTask, Position, Stage, Task, TaskId, TaskPatch},
    ports::{PositionOverflow, TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Thread-safe in-memory task repository.
///
/// Each operation holds the state lock for its whole read-modify-write, so
/// updates are atomic. Write failures can be injected to exercise rollback
/// paths in callers.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: HashMap<TaskId, Task>,
    fail_writes: bool,
}

/// Error raised for injected write failures.
#[derive(Debug, Clone, thiserror::Error)]
#[error("injected write failure")]
pub struct InjectedWriteFailure;

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every later write step fail (or succeed again when `false`).
    ///
    /// Reads and position lookups are unaffected, so a failing update runs
    /// its full plan and is rejected only at the final write.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] if the lock is poisoned.
    pub fn inject_write_failures(&self, enabled: bool) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.fail_writes = enabled;
        Ok(())
    }
}

fn lock_error<E: std::fmt::Display>(err: E) -> TaskRepositoryError {
    TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

/// Computes `max(position in stage) + 1`.
fn next_position(tasks: &HashMap<TaskId, Task>, stage: Stage) -> TaskRepositoryResult<Position> {
    let max = tasks
        .values()
        .filter(|task| task.stage() == stage)
        .map(Task::position)
        .max();
    Position::after(max).ok_or_else(|| TaskRepositoryError::persistence(PositionOverflow(stage)))
}

fn check_writable(state: &InMemoryTaskState) -> TaskRepositoryResult<()> {
    if state.fail_writes {
        return Err(TaskRepositoryError::persistence(InjectedWriteFailure));
    }
    Ok(())
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn append(&self, task: NewTask) -> TaskRepositoryResult<Task> {
        let mut state = self.state.write().map_err(lock_error)?;
        let position = next_position(&state.tasks, task.stage())?;
        check_writable(&state)?;

        let placed = task.place(position);
        state.tasks.insert(placed.id(), placed.clone());
        Ok(placed)
    }

    async fn update(&self, id: TaskId, patch: &TaskPatch) -> TaskRepositoryResult<Task> {
        let mut state = self.state.write().map_err(lock_error)?;
        let current = state
            .tasks
            .get(&id)
            .cloned()
            .ok_or(TaskRepositoryError::NotFound(id))?;

        let changes = patch
            .plan(&current)
            .resolve(|stage| next_position(&state.tasks, stage))?;
        check_writable(&state)?;

        let updated = current.apply(changes);
        state.tasks.insert(id, updated.clone());
        Ok(updated)
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn list(&self) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(lock_error)?;
        let mut tasks: Vec<Task> = state.tasks.values().cloned().collect();
        tasks.sort_by(Task::board_order);
        Ok(tasks)
    }
}
