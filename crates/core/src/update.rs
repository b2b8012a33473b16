#![forbid(unsafe_code)]

use crate::{Day, StatusLog, TaskId, TaskStatus};

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("missing task_id")]
    MissingTaskId,
    #[error("invalid status")]
    InvalidStatus,
}

#[derive(Debug, thiserror::Error)]
pub enum UpdateError<E> {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("storage: {0}")]
    Storage(E),
}

/// A validated status change. The task id is not checked against the task store.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatusUpdate {
    pub task_id: TaskId,
    pub status: TaskStatus,
}

impl StatusUpdate {
    pub fn parse(task_id: i64, status: &str) -> Result<Self, ValidationError> {
        let task_id = TaskId::try_new(task_id).map_err(|_| ValidationError::MissingTaskId)?;
        let status = TaskStatus::parse(status).ok_or(ValidationError::InvalidStatus)?;
        Ok(Self { task_id, status })
    }

    pub fn apply<L: StatusLog>(self, log: &mut L, day: Day) -> Result<(), L::Error> {
        log.upsert(self.task_id, day, self.status)
    }
}

/// Validates then records a status change for `(task_id, day)`.
///
/// Validation failures never reach the log.
pub fn update<L: StatusLog>(
    log: &mut L,
    task_id: i64,
    status: &str,
    day: Day,
) -> Result<StatusUpdate, UpdateError<L::Error>> {
    let update = StatusUpdate::parse(task_id, status)?;
    update.apply(log, day).map_err(UpdateError::Storage)?;
    Ok(update)
}
