#![forbid(unsafe_code)]

use super::{SqliteStore, StoreError};
use chores_core::{Day, StatusLog, TaskId, TaskStatus};
use rusqlite::params;
use std::collections::HashMap;

impl StatusLog for SqliteStore {
    type Error = StoreError;

    /// One statement; the `UNIQUE(task_id, date)` constraint arbitrates
    /// concurrent writers and the last one wins.
    fn upsert(&mut self, task_id: TaskId, day: Day, status: TaskStatus) -> Result<(), StoreError> {
        let mut stmt = self.conn.prepare_cached(
            "INSERT INTO task_log(task_id, date, status) VALUES (?1, ?2, ?3) \
             ON CONFLICT(task_id, date) DO UPDATE SET status = excluded.status",
        )?;
        stmt.execute(params![task_id.get(), day.to_string(), status.as_str()])?;
        tracing::debug!(task_id = task_id.get(), day = %day, status = %status, "status upserted");
        Ok(())
    }

    fn statuses_for(&self, day: Day) -> Result<HashMap<TaskId, TaskStatus>, StoreError> {
        let mut stmt = self
            .conn
            .prepare_cached("SELECT task_id, status FROM task_log WHERE date = ?1")?;
        let mut rows = stmt.query(params![day.to_string()])?;
        let mut out = HashMap::new();

        while let Some(row) = rows.next()? {
            let task_id = row.get::<_, i64>(0)?;
            let raw = row.get::<_, String>(1)?;
            let status = TaskStatus::parse(&raw).ok_or_else(|| StoreError::CorruptRow {
                table: "task_log",
                detail: format!("task_id={task_id} date={day} status={raw:?}"),
            })?;
            out.insert(TaskId::from_row(task_id), status);
        }

        Ok(out)
    }
}
