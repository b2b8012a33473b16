#![forbid(unsafe_code)]

use super::{SqliteStore, StoreError};
use chores_core::{Task, TaskId, TaskStore};
use rusqlite::{Connection, Params, params};

impl SqliteStore {
    /// Adds a task definition. Used for seeding and fixtures; nothing at
    /// request time creates tasks.
    pub fn insert_task(
        &mut self,
        owner: &str,
        title: &str,
        sort_order: i64,
    ) -> Result<Task, StoreError> {
        insert_task_tx(&self.conn, owner, title, sort_order)
    }

    pub fn task_count(&self) -> Result<i64, StoreError> {
        Ok(self
            .conn
            .query_row("SELECT COUNT(*) FROM tasks", [], |row| row.get::<_, i64>(0))?)
    }
}

impl TaskStore for SqliteStore {
    type Error = StoreError;

    fn list_all(&self) -> Result<Vec<Task>, StoreError> {
        query_tasks(
            &self.conn,
            "SELECT id, owner, title, sort_order FROM tasks \
             ORDER BY owner ASC, sort_order ASC, id ASC",
            [],
        )
    }

    fn list_by_owner(&self, owner: &str) -> Result<Vec<Task>, StoreError> {
        query_tasks(
            &self.conn,
            "SELECT id, owner, title, sort_order FROM tasks \
             WHERE owner = ?1 \
             ORDER BY owner ASC, sort_order ASC, id ASC",
            params![owner],
        )
    }
}

pub(super) fn insert_task_tx(
    conn: &Connection,
    owner: &str,
    title: &str,
    sort_order: i64,
) -> Result<Task, StoreError> {
    if owner.trim().is_empty() {
        return Err(StoreError::InvalidInput("task owner must not be empty"));
    }
    if title.trim().is_empty() {
        return Err(StoreError::InvalidInput("task title must not be empty"));
    }

    conn.execute(
        "INSERT INTO tasks(owner, title, sort_order) VALUES (?1, ?2, ?3)",
        params![owner, title, sort_order],
    )?;

    Ok(Task {
        id: TaskId::from_row(conn.last_insert_rowid()),
        owner: owner.to_string(),
        title: title.to_string(),
        sort_order,
    })
}

fn query_tasks<P: Params>(conn: &Connection, sql: &str, params: P) -> Result<Vec<Task>, StoreError> {
    let mut stmt = conn.prepare_cached(sql)?;
    let mut rows = stmt.query(params)?;
    let mut out = Vec::new();

    while let Some(row) = rows.next()? {
        out.push(Task {
            id: TaskId::from_row(row.get::<_, i64>(0)?),
            owner: row.get::<_, String>(1)?,
            title: row.get::<_, String>(2)?,
            sort_order: row.get::<_, i64>(3)?,
        });
    }

    Ok(out)
}
