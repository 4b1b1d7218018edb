//! Task aggregate root and creation types.

use super::{Position, Stage, TaskChanges, TaskId, TaskTitle};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A task awaiting placement on the board.
///
/// Identifier and timestamp are fixed at creation; the store assigns the
/// position when it appends the task to its stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    id: TaskId,
    title: TaskTitle,
    stage: Stage,
    created_at: DateTime<Utc>,
}

impl NewTask {
    /// Prepares a new task for the given stage.
    #[must_use]
    pub fn new(title: TaskTitle, stage: Stage, clock: &impl Clock) -> Self {
        Self {
            id: TaskId::new(),
            title,
            stage,
            created_at: clock.utc(),
        }
    }

    /// Returns the identifier the task will be stored under.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the stage the task is appended to.
    #[must_use]
    pub const fn stage(&self) -> Stage {
        self.stage
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Places the task at `position` within its stage.
    #[must_use]
    pub fn place(self, position: Position) -> Task {
        Task {
            id: self.id,
            title: self.title,
            stage: self.stage,
            position,
            created_at: self.created_at,
        }
    }
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: TaskTitle,
    stage: Stage,
    position: Position,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted stage.
    pub stage: Stage,
    /// Persisted position within the stage.
    pub position: Position,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            stage: data.stage,
            position: data.position,
            created_at: data.created_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the current stage.
    #[must_use]
    pub const fn stage(&self) -> Stage {
        self.stage
    }

    /// Returns the position within the current stage.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Applies fully resolved changes. Identifier and timestamp never change.
    #[must_use]
    pub fn apply(self, changes: TaskChanges) -> Self {
        Self {
            title: changes.title,
            stage: changes.stage,
            position: changes.position,
            ..self
        }
    }

    /// Board ordering: stage order, then ascending position, then newest
    /// first for equal positions.
    #[must_use]
    pub fn board_order(&self, other: &Self) -> std::cmp::Ordering {
        self.stage
            .cmp(&other.stage)
            .then_with(|| self.position.cmp(&other.position))
            .then_with(|| other.created_at.cmp(&self.created_at))
    }
}
