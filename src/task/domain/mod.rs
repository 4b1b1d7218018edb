//! Domain model for the task board.
//!
//! Tasks live in one of four stages and carry an integer position that
//! orders them within the stage. The domain decides how partial updates
//! resolve; stores decide positions for appended tasks.

mod error;
mod ids;
mod patch;
mod stage;
mod task;

pub use error::{ParseStageError, TaskDomainError};
pub use ids::{TaskId, TaskTitle};
pub use patch::{PlannedUpdate, PositionPlan, TaskChanges, TaskPatch};
pub use stage::{Position, Stage};
pub use task::{NewTask, PersistedTaskData, Task};
