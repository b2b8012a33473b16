use super::*;
use std::collections::HashMap;
use std::convert::Infallible;
use time::macros::{datetime, offset};

#[derive(Default)]
struct MemoryStore {
    tasks: Vec<Task>,
    log: HashMap<(TaskId, Day), TaskStatus>,
    writes: usize,
}

impl MemoryStore {
    fn seeded() -> Self {
        let mut store = Self::default();
        for (id, owner, title, sort_order) in [
            (1, "Griffin", "Make bed", 1),
            (2, "Griffin", "Brush teeth", 2),
            (3, "Griffin", "Feed the cat", 3),
            (4, "Garreth", "Put toys away", 1),
            (5, "Garreth", "Set the table", 2),
        ] {
            store.tasks.push(task(id, owner, title, sort_order));
        }
        store
    }

    fn sorted(&self, mut tasks: Vec<Task>) -> Vec<Task> {
        tasks.sort_by(|a, b| {
            (a.owner.as_str(), a.sort_order, a.id).cmp(&(b.owner.as_str(), b.sort_order, b.id))
        });
        tasks
    }
}

impl TaskStore for MemoryStore {
    type Error = Infallible;

    fn list_all(&self) -> Result<Vec<Task>, Infallible> {
        Ok(self.sorted(self.tasks.clone()))
    }

    fn list_by_owner(&self, owner: &str) -> Result<Vec<Task>, Infallible> {
        let tasks = self
            .tasks
            .iter()
            .filter(|task| task.owner == owner)
            .cloned()
            .collect();
        Ok(self.sorted(tasks))
    }
}

impl StatusLog for MemoryStore {
    type Error = Infallible;

    fn upsert(&mut self, task_id: TaskId, day: Day, status: TaskStatus) -> Result<(), Infallible> {
        self.writes += 1;
        self.log.insert((task_id, day), status);
        Ok(())
    }

    fn statuses_for(&self, day: Day) -> Result<HashMap<TaskId, TaskStatus>, Infallible> {
        Ok(self
            .log
            .iter()
            .filter(|((_, entry_day), _)| *entry_day == day)
            .map(|((task_id, _), status)| (*task_id, *status))
            .collect())
    }
}

fn task(id: i64, owner: &str, title: &str, sort_order: i64) -> Task {
    Task {
        id: TaskId::from_row(id),
        owner: owner.to_string(),
        title: title.to_string(),
        sort_order,
    }
}

fn day(value: &str) -> Day {
    Day::parse(value).expect("valid day")
}

fn ids(board: &TaskBoard) -> Vec<i64> {
    board.tasks.iter().map(|task| task.id().get()).collect()
}

#[test]
fn task_id_rejects_zero_only() {
    assert_eq!(TaskId::try_new(0).unwrap_err(), TaskIdError::Zero);
    assert_eq!(TaskId::try_new(7).map(TaskId::get), Ok(7));
    assert_eq!(TaskId::try_new(-3).map(TaskId::get), Ok(-3));
}

#[test]
fn status_parse_is_exact() {
    assert_eq!(TaskStatus::parse("done"), Some(TaskStatus::Done));
    assert_eq!(TaskStatus::parse("skipped"), Some(TaskStatus::Skipped));
    assert_eq!(TaskStatus::parse("pending"), Some(TaskStatus::Pending));
    assert_eq!(TaskStatus::parse(""), None);
    assert_eq!(TaskStatus::parse("DONE"), None);
    assert_eq!(TaskStatus::parse(" done"), None);
    assert_eq!(TaskStatus::default(), TaskStatus::Pending);
    for status in TaskStatus::ALL {
        assert_eq!(TaskStatus::parse(status.as_str()), Some(status));
    }
}

#[test]
fn day_round_trips_iso_form() {
    let parsed = day("2024-01-01");
    assert_eq!(parsed, Day::from_ymd(2024, 1, 1).expect("valid"));
    assert_eq!(parsed.to_string(), "2024-01-01");
    assert_eq!(day("2024-02-29"), Day::from_ymd(2024, 2, 29).expect("leap day"));
    assert_eq!(day(" 2024-12-31\n").to_string(), "2024-12-31");
    assert!(Day::parse("2024-1-1").is_err());
    assert!(Day::parse("2024-02-30").is_err());
    assert!(Day::parse("yesterday").is_err());
    assert!(Day::from_ymd(2024, 13, 1).is_err());
}

#[test]
fn calendar_uses_captured_offset() {
    let instant = datetime!(2024-01-01 23:30 UTC);
    assert_eq!(LocalCalendar::utc().day_of(instant), day("2024-01-01"));
    assert_eq!(
        LocalCalendar::with_offset(offset!(+1)).day_of(instant),
        day("2024-01-02")
    );
    assert_eq!(
        LocalCalendar::with_offset(offset!(-5)).day_of(datetime!(2024-01-02 03:00 UTC)),
        day("2024-01-01")
    );
}

#[test]
fn effective_tasks_default_to_pending_and_keep_order() {
    let tasks = vec![task(3, "A", "c", 1), task(1, "A", "a", 2), task(2, "B", "b", 1)];
    let mut statuses = HashMap::new();
    statuses.insert(TaskId::from_row(1), TaskStatus::Done);
    statuses.insert(TaskId::from_row(99), TaskStatus::Skipped);

    let effective = effective_tasks(tasks, &statuses);
    let view = effective
        .iter()
        .map(|task| (task.id().get(), task.status))
        .collect::<Vec<_>>();
    assert_eq!(
        view,
        vec![
            (3, TaskStatus::Pending),
            (1, TaskStatus::Done),
            (2, TaskStatus::Pending),
        ]
    );
}

#[test]
fn distinct_owners_are_sorted_and_unique() {
    let tasks = effective_tasks(
        vec![
            task(1, "Griffin", "a", 1),
            task(2, "Garreth", "b", 1),
            task(3, "Griffin", "c", 2),
            task(4, "alice", "d", 1),
        ],
        &HashMap::new(),
    );
    assert_eq!(distinct_owners(&tasks), vec!["Garreth", "Griffin", "alice"]);
    assert!(distinct_owners(&[]).is_empty());
}

#[test]
fn unfiltered_board_groups_by_owner_then_sort_order() {
    let store = MemoryStore::seeded();
    let board = assemble(&store, None, day("2024-01-01")).expect("assemble");
    assert_eq!(ids(&board), vec![4, 5, 1, 2, 3]);
    assert_eq!(board.owners, vec!["Garreth", "Griffin"]);
    assert!(!board.is_filtered());
    assert!(board.tasks.iter().all(|task| task.status == TaskStatus::Pending));
}

#[test]
fn filtered_board_is_subset_in_same_order() {
    let mut store = MemoryStore::seeded();
    let d = day("2024-01-01");
    update(&mut store, 2, "done", d).expect("update");

    let all = assemble(&store, None, d).expect("assemble all");
    let griffin = assemble(&store, Some("Griffin"), d).expect("assemble filtered");

    let expected = all
        .tasks
        .iter()
        .filter(|task| task.owner() == "Griffin")
        .cloned()
        .collect::<Vec<_>>();
    assert_eq!(griffin.tasks, expected);
    assert!(griffin.owners.is_empty());
    assert_eq!(griffin.owner.as_deref(), Some("Griffin"));
}

#[test]
fn empty_or_unknown_owner_filter() {
    let store = MemoryStore::seeded();
    let d = day("2024-01-01");
    let empty = assemble(&store, Some(""), d).expect("assemble");
    assert_eq!(empty.tasks.len(), 5);
    assert!(!empty.is_filtered());

    let unknown = assemble(&store, Some("griffin"), d).expect("assemble");
    assert!(unknown.tasks.is_empty());
    assert!(unknown.owners.is_empty());
}

#[test]
fn update_validation_rejects_before_touching_log() {
    let mut store = MemoryStore::seeded();
    let d = day("2024-01-01");
    for (task_id, status, expected) in [
        (0, "done", ValidationError::MissingTaskId),
        (0, "", ValidationError::MissingTaskId),
        (5, "", ValidationError::InvalidStatus),
        (5, "DONE", ValidationError::InvalidStatus),
        (5, "finished", ValidationError::InvalidStatus),
    ] {
        match update(&mut store, task_id, status, d) {
            Err(UpdateError::Validation(err)) => assert_eq!(err, expected),
            other => panic!("expected validation error for ({task_id}, {status:?}), got {other:?}"),
        }
    }
    assert_eq!(store.writes, 0);
    assert!(store.log.is_empty());
}

#[test]
fn update_messages_match_wire_errors() {
    assert_eq!(ValidationError::MissingTaskId.to_string(), "missing task_id");
    assert_eq!(ValidationError::InvalidStatus.to_string(), "invalid status");
}

#[test]
fn status_is_scoped_to_its_day() {
    let mut store = MemoryStore::seeded();
    let d1 = day("2024-01-01");
    let d2 = day("2024-01-02");
    update(&mut store, 1, "done", d1).expect("update");

    let first = assemble(&store, None, d1).expect("assemble");
    let make_bed = first.tasks.iter().find(|task| task.id().get() == 1).expect("task 1");
    assert_eq!(make_bed.title(), "Make bed");
    assert_eq!(make_bed.status, TaskStatus::Done);

    let second = assemble(&store, None, d2).expect("assemble");
    let make_bed = second.tasks.iter().find(|task| task.id().get() == 1).expect("task 1");
    assert_eq!(make_bed.status, TaskStatus::Pending);
}

#[test]
fn repeated_and_overwriting_updates_leave_one_entry() {
    let mut store = MemoryStore::seeded();
    let d = day("2024-01-01");
    update(&mut store, 1, "done", d).expect("first");
    let once = store.statuses_for(d).expect("read");
    update(&mut store, 1, "done", d).expect("second");
    assert_eq!(store.statuses_for(d).expect("read"), once);

    update(&mut store, 1, "skipped", d).expect("overwrite");
    let statuses = store.statuses_for(d).expect("read");
    assert_eq!(statuses.len(), 1);
    assert_eq!(statuses.get(&TaskId::from_row(1)), Some(&TaskStatus::Skipped));

    update(&mut store, 1, "pending", d).expect("back to pending");
    assert_eq!(
        store.statuses_for(d).expect("read").get(&TaskId::from_row(1)),
        Some(&TaskStatus::Pending)
    );
}

#[test]
fn orphan_updates_are_recorded_but_never_shown() {
    let mut store = MemoryStore::seeded();
    let d = day("2024-01-01");
    let applied = update(&mut store, 42, "done", d).expect("orphan accepted");
    assert_eq!(applied.task_id.get(), 42);
    assert!(store.statuses_for(d).expect("read").contains_key(&TaskId::from_row(42)));

    let board = assemble(&store, None, d).expect("assemble");
    assert_eq!(board.tasks.len(), 5);
    assert!(board.tasks.iter().all(|task| task.id().get() != 42));
}

#[test]
fn board_splits_active_and_settled() {
    let mut store = MemoryStore::seeded();
    let d = day("2024-01-01");
    update(&mut store, 1, "done", d).expect("update");
    update(&mut store, 4, "skipped", d).expect("update");
    let board = assemble(&store, None, d).expect("assemble");
    let active = board.active().map(|task| task.id().get()).collect::<Vec<_>>();
    let settled = board.settled().map(|task| task.id().get()).collect::<Vec<_>>();
    assert_eq!(active, vec![5, 2, 3]);
    assert_eq!(settled, vec![4, 1]);
}
