//! Application services for the task board.

mod dispatch;
mod lifecycle;

pub use dispatch::{AuditDispatcher, DEFAULT_AUDIT_BUDGET};
pub use lifecycle::{
    CreateTaskRequest, TaskLifecycleError, TaskLifecycleResult, TaskLifecycleService,
    UpdateTaskRequest,
};
