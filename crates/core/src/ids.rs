#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};
use std::fmt;

/// Storage-assigned task identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(i64);

impl TaskId {
    /// Wraps a raw identifier coming from a request. Zero means "missing".
    pub fn try_new(value: i64) -> Result<Self, TaskIdError> {
        if value == 0 {
            return Err(TaskIdError::Zero);
        }
        Ok(Self(value))
    }

    /// Wraps an identifier read back from storage.
    pub fn from_row(value: i64) -> Self {
        Self(value)
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TaskIdError {
    Zero,
}
