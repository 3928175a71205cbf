use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use uuid::Uuid;

use crate::db::db::Db;
use crate::libs::error::AppError;
use crate::libs::pagination::MonthWindow;
use crate::libs::work_entry::WorkEntry;

const SELECT_ENTRIES: &str = "SELECT id, start_time, end_time, project_id, description FROM work_entries";
const SELECT_ENTRY_BY_ID: &str = "SELECT id, start_time, end_time, project_id, description FROM work_entries WHERE id = ?1";
const INSERT_ENTRY: &str = "INSERT INTO work_entries (id, start_time, end_time, project_id, description) VALUES (?1, ?2, ?3, ?4, ?5)";
const UPDATE_ENTRY: &str = "UPDATE work_entries SET start_time = ?2, end_time = ?3, project_id = ?4, description = ?5 WHERE id = ?1";
const DELETE_ENTRY: &str = "DELETE FROM work_entries WHERE id = ?1";
const EXISTS_BEFORE: &str = "SELECT EXISTS(SELECT 1 FROM work_entries WHERE start_time < ?1)";
const SELECT_YEARS: &str = "SELECT DISTINCT strftime('%Y', start_time) FROM work_entries ORDER BY 1";
const SELECT_REPORT_ROWS: &str = "SELECT w.id, w.start_time, w.end_time, w.project_id, w.description, p.name
    FROM work_entries w JOIN projects p ON p.id = w.project_id";

pub struct WorkEntries {
    conn: Connection,
}

impl WorkEntries {
    pub fn new(db_path: &Path) -> Result<Self, AppError> {
        let db = Db::open(db_path)?;
        Ok(WorkEntries { conn: db.conn })
    }

    pub fn insert(&mut self, entry: &WorkEntry) -> Result<(), AppError> {
        self.conn.execute(
            INSERT_ENTRY,
            params![
                entry.id.to_string(),
                entry.start_time,
                entry.end_time,
                entry.project_id.to_string(),
                entry.description
            ],
        )?;
        Ok(())
    }

    pub fn fetch(&mut self, id: &Uuid) -> Result<Option<WorkEntry>, AppError> {
        let entry = self
            .conn
            .query_row(SELECT_ENTRY_BY_ID, params![id.to_string()], map_entry)
            .optional()?;
        Ok(entry)
    }

    /// Overwrites an existing entry in full.
    pub fn update(&mut self, entry: &WorkEntry) -> Result<WorkEntry, AppError> {
        let changed = self.conn.execute(
            UPDATE_ENTRY,
            params![
                entry.id.to_string(),
                entry.start_time,
                entry.end_time,
                entry.project_id.to_string(),
                entry.description
            ],
        )?;
        if changed == 0 {
            return Err(AppError::NotFound("Work entry not found".to_string()));
        }
        Ok(entry.clone())
    }

    /// Deletes an entry and returns the removed row.
    pub fn delete(&mut self, id: &Uuid) -> Result<WorkEntry, AppError> {
        let entry = self.fetch(id)?.ok_or_else(|| AppError::NotFound("Work entry not found".to_string()))?;
        self.conn.execute(DELETE_ENTRY, params![id.to_string()])?;
        Ok(entry)
    }

    /// Entries of one page window, newest first.
    pub fn fetch_window(&mut self, window: &MonthWindow) -> Result<Vec<WorkEntry>, AppError> {
        let sql = format!("{} WHERE start_time >= ?1 AND start_time < ?2 ORDER BY start_time DESC", SELECT_ENTRIES);
        let mut stmt = self.conn.prepare(&sql)?;
        let entry_iter = stmt.query_map(params![window.start, window.end], map_entry)?;
        collect_entries(entry_iter)
    }

    /// Entries with `start_time` inside the half-open range, ascending,
    /// optionally restricted to one project.
    pub fn fetch_between(
        &mut self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        project_id: Option<&Uuid>,
    ) -> Result<Vec<WorkEntry>, AppError> {
        match project_id {
            Some(project_id) => {
                let sql = format!(
                    "{} WHERE start_time >= ?1 AND start_time < ?2 AND project_id = ?3 ORDER BY start_time",
                    SELECT_ENTRIES
                );
                let mut stmt = self.conn.prepare(&sql)?;
                let entry_iter = stmt.query_map(params![start, end, project_id.to_string()], map_entry)?;
                collect_entries(entry_iter)
            }
            None => {
                let sql = format!("{} WHERE start_time >= ?1 AND start_time < ?2 ORDER BY start_time", SELECT_ENTRIES);
                let mut stmt = self.conn.prepare(&sql)?;
                let entry_iter = stmt.query_map(params![start, end], map_entry)?;
                collect_entries(entry_iter)
            }
        }
    }

    /// Full history in ascending order, optionally restricted to one project.
    pub fn fetch_all(&mut self, project_id: Option<&Uuid>) -> Result<Vec<WorkEntry>, AppError> {
        match project_id {
            Some(project_id) => {
                let sql = format!("{} WHERE project_id = ?1 ORDER BY start_time", SELECT_ENTRIES);
                let mut stmt = self.conn.prepare(&sql)?;
                let entry_iter = stmt.query_map(params![project_id.to_string()], map_entry)?;
                collect_entries(entry_iter)
            }
            None => {
                let sql = format!("{} ORDER BY start_time", SELECT_ENTRIES);
                let mut stmt = self.conn.prepare(&sql)?;
                let entry_iter = stmt.query_map([], map_entry)?;
                collect_entries(entry_iter)
            }
        }
    }

    /// Report rows: entries with `start_time` in the inclusive range paired
    /// with their project names, ascending.
    pub fn fetch_report_rows(
        &mut self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        project_id: Option<&Uuid>,
    ) -> Result<Vec<(WorkEntry, String)>, AppError> {
        let map_row = |row: &Row| -> rusqlite::Result<(WorkEntry, String)> { Ok((map_entry(row)?, row.get(5)?)) };

        let mut rows = Vec::new();
        match project_id {
            Some(project_id) => {
                let sql = format!(
                    "{} WHERE w.start_time >= ?1 AND w.start_time <= ?2 AND w.project_id = ?3 ORDER BY w.start_time",
                    SELECT_REPORT_ROWS
                );
                let mut stmt = self.conn.prepare(&sql)?;
                let row_iter = stmt.query_map(params![start, end, project_id.to_string()], map_row)?;
                for row in row_iter {
                    rows.push(row?);
                }
            }
            None => {
                let sql = format!("{} WHERE w.start_time >= ?1 AND w.start_time <= ?2 ORDER BY w.start_time", SELECT_REPORT_ROWS);
                let mut stmt = self.conn.prepare(&sql)?;
                let row_iter = stmt.query_map(params![start, end], map_row)?;
                for row in row_iter {
                    rows.push(row?);
                }
            }
        }
        Ok(rows)
    }

    /// Whether any entry starts before the given instant.
    pub fn has_entries_before(&mut self, instant: DateTime<Utc>) -> Result<bool, AppError> {
        let exists: i64 = self.conn.query_row(EXISTS_BEFORE, params![instant], |row| row.get(0))?;
        Ok(exists != 0)
    }

    /// Distinct calendar years with at least one entry, ascending.
    pub fn years(&mut self) -> Result<Vec<String>, AppError> {
        let mut stmt = self.conn.prepare(SELECT_YEARS)?;
        let year_iter = stmt.query_map([], |row| row.get::<_, String>(0))?;
        let mut years = Vec::new();
        for year in year_iter {
            years.push(year?);
        }
        Ok(years)
    }
}

fn map_entry(row: &Row) -> rusqlite::Result<WorkEntry> {
    Ok(WorkEntry {
        id: Uuid::parse_str(&row.get::<_, String>(0)?).unwrap(),
        start_time: row.get(1)?,
        end_time: row.get(2)?,
        project_id: Uuid::parse_str(&row.get::<_, String>(3)?).unwrap(),
        description: row.get(4)?,
    })
}

fn collect_entries(entry_iter: impl Iterator<Item = rusqlite::Result<WorkEntry>>) -> Result<Vec<WorkEntry>, AppError> {
    let mut entries = Vec::new();
    for entry in entry_iter {
        entries.push(entry?);
    }
    Ok(entries)
}
