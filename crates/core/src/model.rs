#![forbid(unsafe_code)]

use crate::{Day, TaskId};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    #[default]
    Pending,
    Done,
    Skipped,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 3] = [Self::Pending, Self::Done, Self::Skipped];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Done => "done",
            Self::Skipped => "skipped",
        }
    }

    /// Exact match on the canonical spelling; no trimming, no case folding.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(Self::Pending),
            "done" => Some(Self::Done),
            "skipped" => Some(Self::Skipped),
            _ => None,
        }
    }

    pub fn is_settled(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A chore definition. Created at seed time and never mutated afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Task {
    pub id: TaskId,
    pub owner: String,
    pub title: String,
    pub sort_order: i64,
}

/// A task together with its status on one day.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EffectiveTask {
    pub task: Task,
    pub status: TaskStatus,
}

impl EffectiveTask {
    pub fn id(&self) -> TaskId {
        self.task.id
    }

    pub fn owner(&self) -> &str {
        &self.task.owner
    }

    pub fn title(&self) -> &str {
        &self.task.title
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaskBoard {
    pub day: Day,
    /// The owner filter that produced this board, if any.
    pub owner: Option<String>,
    pub tasks: Vec<EffectiveTask>,
    /// Distinct owners, sorted. Always empty on a filtered board.
    pub owners: Vec<String>,
}

impl TaskBoard {
    pub fn is_filtered(&self) -> bool {
        self.owner.is_some()
    }

    pub fn active(&self) -> impl Iterator<Item = &EffectiveTask> {
        self.tasks.iter().filter(|task| !task.status.is_settled())
    }

    pub fn settled(&self) -> impl Iterator<Item = &EffectiveTask> {
        self.tasks.iter().filter(|task| task.status.is_settled())
    }
}
