#![forbid(unsafe_code)]

use crate::{Day, EffectiveTask, StatusLog, Task, TaskBoard, TaskId, TaskStatus, TaskStore};
use std::collections::{BTreeSet, HashMap};

/// Builds the board for `day`, optionally restricted to one owner.
pub fn assemble<S>(store: &S, owner: Option<&str>, day: Day) -> Result<TaskBoard, <S as TaskStore>::Error>
where
    S: TaskStore + StatusLog<Error = <S as TaskStore>::Error>,
{
    let owner = owner.filter(|owner| !owner.is_empty());
    let tasks = store.list(owner)?;
    let statuses = store.statuses_for(day)?;
    let tasks = effective_tasks(tasks, &statuses);
    let owners = match owner {
        Some(_) => Vec::new(),
        None => distinct_owners(&tasks),
    };
    Ok(TaskBoard {
        day,
        owner: owner.map(str::to_string),
        tasks,
        owners,
    })
}

/// Left-joins tasks with a day's statuses. Order is preserved; missing entries are `pending`.
pub fn effective_tasks(tasks: Vec<Task>, statuses: &HashMap<TaskId, TaskStatus>) -> Vec<EffectiveTask> {
    tasks
        .into_iter()
        .map(|task| {
            let status = statuses.get(&task.id).copied().unwrap_or_default();
            EffectiveTask { task, status }
        })
        .collect()
}

pub fn distinct_owners(tasks: &[EffectiveTask]) -> Vec<String> {
    tasks
        .iter()
        .map(|task| task.owner())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
