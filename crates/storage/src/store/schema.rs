#![forbid(unsafe_code)]

use super::StoreError;
use super::tasks::insert_task_tx;
use rusqlite::{Connection, TransactionBehavior, params};
use std::collections::BTreeSet;

const SCHEMA_VERSION: &str = "1";

const SCHEMA_SQL: &str = r#"
        CREATE TABLE IF NOT EXISTS meta (
          key TEXT PRIMARY KEY,
          value TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS tasks (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          owner TEXT NOT NULL,
          title TEXT NOT NULL,
          sort_order INTEGER NOT NULL DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS task_log (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          task_id INTEGER NOT NULL,
          date TEXT NOT NULL,
          status TEXT NOT NULL,
          UNIQUE(task_id, date),
          FOREIGN KEY(task_id) REFERENCES tasks(id)
        );

"#;

const INDEX_SQL: &str = r#"
        CREATE INDEX IF NOT EXISTS idx_tasks_owner_order ON tasks(owner, sort_order, id);
        CREATE INDEX IF NOT EXISTS idx_task_log_date ON task_log(date);
"#;

const REQUIRED_COLUMNS: [(&str, &[&str]); 2] = [
    ("tasks", &["id", "owner", "title", "sort_order"]),
    ("task_log", &["id", "task_id", "date", "status"]),
];

struct SeedTask {
    owner: &'static str,
    title: &'static str,
    sort_order: i64,
}

/// Inserted in this order into an empty task table.
const SEED_TASKS: [SeedTask; 5] = [
    SeedTask {
        owner: "Griffin",
        title: "Make bed",
        sort_order: 1,
    },
    SeedTask {
        owner: "Griffin",
        title: "Brush teeth",
        sort_order: 2,
    },
    SeedTask {
        owner: "Griffin",
        title: "Feed the cat",
        sort_order: 3,
    },
    SeedTask {
        owner: "Garreth",
        title: "Put toys away",
        sort_order: 1,
    },
    SeedTask {
        owner: "Garreth",
        title: "Set the table",
        sort_order: 2,
    },
];

pub(super) fn install_schema(conn: &Connection) -> Result<(), StoreError> {
    conn.execute_batch(SCHEMA_SQL)?;
    verify_schema(conn)?;
    conn.execute_batch(INDEX_SQL)?;
    conn.execute(
        "INSERT OR IGNORE INTO meta(key, value) VALUES (?1, ?2)",
        params!["schema_version", SCHEMA_VERSION],
    )?;
    Ok(())
}

/// `CREATE TABLE IF NOT EXISTS` leaves pre-existing tables untouched, so a
/// foreign table under the same name must be caught here.
fn verify_schema(conn: &Connection) -> Result<(), StoreError> {
    for (table, columns) in REQUIRED_COLUMNS {
        let present = table_columns(conn, table)?;
        if let Some(column) = columns.iter().find(|column| !present.contains(**column)) {
            return Err(StoreError::SchemaMismatch {
                table,
                column: *column,
            });
        }
    }
    Ok(())
}

fn table_columns(conn: &Connection, table: &str) -> Result<BTreeSet<String>, StoreError> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table})"))?;
    let mut rows = stmt.query([])?;
    let mut columns = BTreeSet::new();
    while let Some(row) = rows.next()? {
        columns.insert(row.get::<_, String>(1)?);
    }
    Ok(columns)
}

/// Returns the number of tasks inserted; zero when the table already had rows.
pub(super) fn seed_if_empty(conn: &mut Connection) -> Result<usize, StoreError> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    let count = tx.query_row("SELECT COUNT(*) FROM tasks", [], |row| row.get::<_, i64>(0))?;
    if count > 0 {
        return Ok(0);
    }

    for seed in &SEED_TASKS {
        insert_task_tx(&tx, seed.owner, seed.title, seed.sort_order)?;
    }

    tx.commit()?;
    Ok(SEED_TASKS.len())
}
