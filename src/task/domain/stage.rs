//! Board stages and the per-stage ordering key.

use super::ParseStageError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Board column a task occupies.
///
/// Variants are declared in board order, so the derived [`Ord`] sorts
/// `todo` before `in_progress` before `review` before `done`. Any stage may
/// move to any other stage.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Work not yet started. The default for new tasks.
    #[default]
    Todo,
    /// Work under way.
    InProgress,
    /// Work awaiting review.
    Review,
    /// Completed work.
    Done,
}

impl Stage {
    /// Every stage in board order.
    pub const ALL: [Self; 4] = [Self::Todo, Self::InProgress, Self::Review, Self::Done];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in_progress",
            Self::Review => "review",
            Self::Done => "done",
        }
    }
}

impl TryFrom<&str> for Stage {
    type Error = ParseStageError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "todo" => Ok(Self::Todo),
            "in_progress" => Ok(Self::InProgress),
            "review" => Ok(Self::Review),
            "done" => Ok(Self::Done),
            _ => Err(ParseStageError(value.to_owned())),
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordering key of a task inside its stage. Lower values sort first.
///
/// Positions are neither contiguous nor unique: explicit positions are
/// stored verbatim and concurrent appends may compute the same value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Position(i32);

impl Position {
    /// Creates a position from a raw value.
    #[must_use]
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    /// Returns the position assigned when appending after `max`, the highest
    /// position currently in the target stage (`None` for an empty stage).
    ///
    /// Returns `None` when the result does not fit the storage column.
    #[must_use]
    pub fn after(max: Option<Self>) -> Option<Self> {
        max.map_or(0, Self::value).checked_add(1).map(Self)
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn value(self) -> i32 {
        self.0
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
