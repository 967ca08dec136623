//! SQLite-based persistence for tasks, the latest agenda, and the timer's
//! persisted subset.
//!
//! Written through after every mutating action by the caller. Volatile
//! timer fields are never stored; on reload the timer is always idle.

use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rusqlite::{params, Connection};
use uuid::Uuid;

use super::data_dir;
use crate::error::StorageError;
use crate::scheduler::{AgendaEntry, EntryKind};
use crate::task::{Priority, Task};
use crate::timer::TimerSnapshot;

const TIMER_KEY: &str = "timer_state";

/// SQLite database for tasks, agenda, and timer state.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at `~/.config/vidya/vidya.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, StorageError> {
        let path = data_dir()?.join("vidya.db");
        Self::open_at(&path)
    }

    /// Open a database at an explicit path (used by tests).
    pub fn open_at(path: &Path) -> Result<Self, StorageError> {
        let conn = Connection::open(path).map_err(|source| StorageError::OpenFailed {
            path: PathBuf::from(path),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), rusqlite::Error> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS tasks (
                id              TEXT PRIMARY KEY,
                subject         TEXT NOT NULL,
                name            TEXT NOT NULL,
                due_date        TEXT NOT NULL,
                hours_remaining REAL NOT NULL,
                priority        INTEGER NOT NULL,
                created_at      TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS agenda (
                position   INTEGER PRIMARY KEY,
                date       TEXT NOT NULL,
                start_time TEXT NOT NULL,
                end_time   TEXT NOT NULL,
                label      TEXT NOT NULL,
                kind       TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_tasks_created_at ON tasks(created_at);",
        )?;
        Ok(())
    }

    // ── Tasks ────────────────────────────────────────────────────────

    /// Insert or update a task.
    ///
    /// # Errors
    /// Returns an error if the upsert fails.
    pub fn upsert_task(&self, task: &Task) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT INTO tasks (id, subject, name, due_date, hours_remaining, priority, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
             ON CONFLICT(id) DO UPDATE SET
                subject = excluded.subject,
                name = excluded.name,
                due_date = excluded.due_date,
                hours_remaining = excluded.hours_remaining,
                priority = excluded.priority",
            params![
                task.id.to_string(),
                task.subject,
                task.name,
                task.due_date.format("%Y-%m-%d").to_string(),
                task.hours_remaining,
                task.priority.ordinal(),
                task.created_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// All tasks, oldest first.
    pub fn list_tasks(&self) -> Result<Vec<Task>, StorageError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, subject, name, due_date, hours_remaining, priority, created_at
             FROM tasks ORDER BY created_at, id",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, f64>(4)?,
                row.get::<_, i64>(5)?,
                row.get::<_, String>(6)?,
            ))
        })?;

        let mut tasks = Vec::new();
        for row in rows {
            let (id, subject, name, due_date, hours_remaining, priority, created_at) = row?;
            tasks.push(Task {
                id: Uuid::parse_str(&id)
                    .map_err(|e| StorageError::Corrupt(format!("task id '{id}': {e}")))?,
                subject,
                name,
                due_date: NaiveDate::parse_from_str(&due_date, "%Y-%m-%d")
                    .map_err(|e| StorageError::Corrupt(format!("due date '{due_date}': {e}")))?,
                hours_remaining,
                priority: Priority::from_ordinal(priority as u8)
                    .ok_or_else(|| StorageError::Corrupt(format!("priority {priority}")))?,
                created_at: DateTime::parse_from_rfc3339(&created_at)
                    .map_err(|e| StorageError::Corrupt(format!("created_at '{created_at}': {e}")))?
                    .with_timezone(&Utc),
            });
        }
        Ok(tasks)
    }

    /// Delete a task by id. Returns whether a row was removed.
    pub fn delete_task(&self, id: Uuid) -> Result<bool, StorageError> {
        let affected = self
            .conn
            .execute("DELETE FROM tasks WHERE id = ?1", params![id.to_string()])?;
        Ok(affected > 0)
    }

    // ── Agenda ───────────────────────────────────────────────────────

    /// Replace the stored agenda with `entries`, preserving their order.
    pub fn replace_agenda(&mut self, entries: &[AgendaEntry]) -> Result<(), StorageError> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM agenda", [])?;
        for (position, entry) in entries.iter().enumerate() {
            tx.execute(
                "INSERT INTO agenda (position, date, start_time, end_time, label, kind)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    position as i64,
                    entry.date.format("%Y-%m-%d").to_string(),
                    entry.start.format("%H:%M").to_string(),
                    entry.end.format("%H:%M").to_string(),
                    entry.label,
                    entry.kind.as_str(),
                ],
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    /// The stored agenda, in its original order.
    pub fn load_agenda(&self) -> Result<Vec<AgendaEntry>, StorageError> {
        let mut stmt = self.conn.prepare(
            "SELECT date, start_time, end_time, label, kind FROM agenda ORDER BY position",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, String>(4)?,
            ))
        })?;

        let mut entries = Vec::new();
        for row in rows {
            let (date, start, end, label, kind) = row?;
            entries.push(AgendaEntry {
                date: NaiveDate::parse_from_str(&date, "%Y-%m-%d")
                    .map_err(|e| StorageError::Corrupt(format!("agenda date '{date}': {e}")))?,
                start: NaiveTime::parse_from_str(&start, "%H:%M")
                    .map_err(|e| StorageError::Corrupt(format!("agenda start '{start}': {e}")))?,
                end: NaiveTime::parse_from_str(&end, "%H:%M")
                    .map_err(|e| StorageError::Corrupt(format!("agenda end '{end}': {e}")))?,
                label,
                kind: EntryKind::parse(&kind)
                    .ok_or_else(|| StorageError::Corrupt(format!("agenda kind '{kind}'")))?,
            });
        }
        Ok(entries)
    }

    // ── Timer ────────────────────────────────────────────────────────

    /// Persist the timer's persisted subset.
    pub fn save_timer(&self, snapshot: &TimerSnapshot) -> Result<(), StorageError> {
        let json = serde_json::to_string(snapshot)
            .map_err(|e| StorageError::Corrupt(format!("timer snapshot: {e}")))?;
        self.kv_set(TIMER_KEY, &json)
    }

    /// The persisted timer subset, if any was stored.
    pub fn load_timer(&self) -> Result<Option<TimerSnapshot>, StorageError> {
        match self.kv_get(TIMER_KEY)? {
            Some(json) => serde_json::from_str(&json)
                .map(Some)
                .map_err(|e| StorageError::Corrupt(format!("timer snapshot: {e}"))),
            None => Ok(None),
        }
    }

    /// Delete all stored tasks, the agenda, and timer state.
    pub fn reset(&mut self) -> Result<(), StorageError> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM tasks", [])?;
        tx.execute("DELETE FROM agenda", [])?;
        tx.execute("DELETE FROM kv", [])?;
        tx.commit()?;
        Ok(())
    }

    // ── Key-value store ──────────────────────────────────────────────

    pub fn kv_get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let mut rows = stmt.query(params![key])?;
        match rows.next()? {
            Some(row) => Ok(Some(row.get(0)?)),
            None => Ok(None),
        }
    }

    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }
}
