use std::path::Path;

use rusqlite::Connection;

use crate::libs::error::AppError;

pub const DB_FILE_NAME: &str = "worklog.db";

const SCHEMA_PROJECTS: &str = "CREATE TABLE IF NOT EXISTS projects (
    id TEXT NOT NULL PRIMARY KEY,
    name TEXT NOT NULL UNIQUE
);";
const SCHEMA_WORK_ENTRIES: &str = "CREATE TABLE IF NOT EXISTS work_entries (
    id TEXT NOT NULL PRIMARY KEY,
    start_time TIMESTAMP NOT NULL,
    end_time TIMESTAMP NOT NULL,
    project_id TEXT NOT NULL REFERENCES projects(id),
    description TEXT NOT NULL DEFAULT ''
);";
const INDEX_ENTRIES_START: &str = "CREATE INDEX IF NOT EXISTS idx_work_entries_start_time ON work_entries (start_time);";

pub struct Db {
    pub conn: Connection,
}

impl Db {
    /// Opens the database file and ensures the schema exists. Both tables
    /// are created here because project deletion touches work entries
    /// inside one transaction.
    pub fn open(path: &Path) -> Result<Db, AppError> {
        let conn = Connection::open(path)?;
        conn.pragma_update(None, "foreign_keys", true)?;
        conn.execute(SCHEMA_PROJECTS, [])?;
        conn.execute(SCHEMA_WORK_ENTRIES, [])?;
        conn.execute(INDEX_ENTRIES_START, [])?;

        Ok(Db { conn })
    }
}
