//! Partial task updates and their resolution against the stored task.
//!
//! Resolution is split in two so that stores can run it inside their own
//! transaction: [`TaskPatch::plan`] decides every field it can from the
//! current row, and [`PlannedUpdate::resolve`] asks the store for the next
//! position only when the task changes stage without an explicit position.

use super::{Position, Stage, Task, TaskDomainError, TaskTitle};

/// Validated partial update. At least one field is present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskPatch {
    title: Option<TaskTitle>,
    stage: Option<Stage>,
    position: Option<Position>,
}

impl TaskPatch {
    /// Creates a patch from already validated fields.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyUpdate`] when every field is absent.
    pub fn new(
        title: Option<TaskTitle>,
        stage: Option<Stage>,
        position: Option<Position>,
    ) -> Result<Self, TaskDomainError> {
        if title.is_none() && stage.is_none() && position.is_none() {
            return Err(TaskDomainError::EmptyUpdate);
        }
        Ok(Self {
            title,
            stage,
            position,
        })
    }

    /// Decides the new field values against the current task.
    #[must_use]
    pub fn plan(&self, current: &Task) -> PlannedUpdate {
        let title = self
            .title
            .clone()
            .unwrap_or_else(|| current.title().clone());
        let stage = self.stage.unwrap_or_else(|| current.stage());
        let position = match self.position {
            Some(explicit) => PositionPlan::Explicit(explicit),
            None if stage != current.stage() => PositionPlan::AppendTo(stage),
            None => PositionPlan::Keep(current.position()),
        };
        PlannedUpdate {
            title,
            stage,
            position,
        }
    }
}

/// How the position of an updated task is obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionPlan {
    /// Caller supplied the position; stored verbatim.
    Explicit(Position),
    /// Stage unchanged and no position supplied.
    Keep(Position),
    /// Stage changed without a position: append after the stage maximum.
    AppendTo(Stage),
}

/// Update decided up to the position lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedUpdate {
    /// Resolved title.
    pub title: TaskTitle,
    /// Resolved stage.
    pub stage: Stage,
    /// Position decision.
    pub position: PositionPlan,
}

impl PlannedUpdate {
    /// Completes the plan, calling `next_in_stage` only for
    /// [`PositionPlan::AppendTo`].
    ///
    /// # Errors
    ///
    /// Propagates any error returned by `next_in_stage`.
    pub fn resolve<E>(
        self,
        next_in_stage: impl FnOnce(Stage) -> Result<Position, E>,
    ) -> Result<TaskChanges, E> {
        let position = match self.position {
            PositionPlan::Explicit(position) | PositionPlan::Keep(position) => position,
            PositionPlan::AppendTo(stage) => next_in_stage(stage)?,
        };
        Ok(TaskChanges {
            title: self.title,
            stage: self.stage,
            position,
        })
    }
}

/// Final field values written back for an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskChanges {
    /// Title to store.
    pub title: TaskTitle,
    /// Stage to store.
    pub stage: Stage,
    /// Position to store.
    pub position: Position,
}
