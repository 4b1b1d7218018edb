//! Error types for audit entry validation.

use thiserror::Error;

/// Errors returned while constructing audit values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuditDomainError {
    /// The action name is empty after trimming.
    #[error("action is required")]
    EmptyAction,
}
