//! Error types for task domain validation and parsing.

use thiserror::Error;

/// Errors returned while validating task input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The title is empty after trimming.
    #[error("title is required")]
    EmptyTitle,

    /// The stage is not part of the board vocabulary.
    #[error("invalid stage")]
    InvalidStage(#[source] ParseStageError),

    /// An update named none of title, stage or position.
    #[error("title, stage, or position is required")]
    EmptyUpdate,
}

impl From<ParseStageError> for TaskDomainError {
    fn from(err: ParseStageError) -> Self {
        Self::InvalidStage(err)
    }
}

/// Error returned while parsing stages from input or persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown stage: {0}")]
pub struct ParseStageError(pub String);
