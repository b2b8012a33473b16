#![forbid(unsafe_code)]

use crate::{Day, Task, TaskId, TaskStatus};
use std::collections::HashMap;

/// Registry of task definitions.
///
/// Both listings order by owner, then `sort_order`, then id.
pub trait TaskStore {
    type Error: std::error::Error;

    fn list_all(&self) -> Result<Vec<Task>, Self::Error>;

    /// Exact, case-sensitive owner match. An unknown owner yields an empty list.
    fn list_by_owner(&self, owner: &str) -> Result<Vec<Task>, Self::Error>;

    /// `None` and the empty string both mean "no filter".
    fn list(&self, owner: Option<&str>) -> Result<Vec<Task>, Self::Error> {
        match owner.filter(|owner| !owner.is_empty()) {
            Some(owner) => self.list_by_owner(owner),
            None => self.list_all(),
        }
    }
}

/// Per-day status history with at most one entry per `(task, day)`.
pub trait StatusLog {
    type Error: std::error::Error;

    /// Inserts or overwrites the entry for `(task_id, day)` atomically.
    fn upsert(&mut self, task_id: TaskId, day: Day, status: TaskStatus)
    -> Result<(), Self::Error>;

    /// Every recorded status for `day`. Absent tasks are `pending`.
    fn statuses_for(&self, day: Day) -> Result<HashMap<TaskId, TaskStatus>, Self::Error>;
}
