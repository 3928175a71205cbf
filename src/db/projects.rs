use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension, Row};
use uuid::Uuid;

use crate::db::db::Db;
use crate::libs::error::AppError;
use crate::libs::project::{Project, DEFAULT_PROJECT_NAME};

const SELECT_PROJECTS: &str = "SELECT id, name FROM projects ORDER BY name";
const SELECT_PROJECT_BY_ID: &str = "SELECT id, name FROM projects WHERE id = ?1";
const SELECT_PROJECT_BY_NAME: &str = "SELECT id, name FROM projects WHERE name = ?1";
const INSERT_PROJECT: &str = "INSERT INTO projects (id, name) VALUES (?1, ?2)";
const DELETE_PROJECT: &str = "DELETE FROM projects WHERE id = ?1";
const DELETE_ENTRIES_OF_PROJECT: &str = "DELETE FROM work_entries WHERE project_id = ?1";
const REASSIGN_ENTRIES_OF_PROJECT: &str = "UPDATE work_entries SET project_id = ?1 WHERE project_id = ?2";

pub struct Projects {
    conn: Connection,
}

impl Projects {
    pub fn new(db_path: &Path) -> Result<Self, AppError> {
        let db = Db::open(db_path)?;
        Ok(Projects { conn: db.conn })
    }

    pub fn fetch_all(&mut self) -> Result<Vec<Project>, AppError> {
        let mut stmt = self.conn.prepare(SELECT_PROJECTS)?;
        let project_iter = stmt.query_map([], map_project)?;
        let mut projects = Vec::new();
        for project in project_iter {
            projects.push(project?);
        }
        Ok(projects)
    }

    pub fn fetch(&mut self, id: &Uuid) -> Result<Option<Project>, AppError> {
        let project = self
            .conn
            .query_row(SELECT_PROJECT_BY_ID, params![id.to_string()], map_project)
            .optional()?;
        Ok(project)
    }

    pub fn fetch_by_name(&mut self, name: &str) -> Result<Option<Project>, AppError> {
        let project = self.conn.query_row(SELECT_PROJECT_BY_NAME, params![name], map_project).optional()?;
        Ok(project)
    }

    pub fn insert(&mut self, project: &Project) -> Result<(), AppError> {
        self.conn.execute(INSERT_PROJECT, params![project.id.to_string(), project.name])?;
        Ok(())
    }

    /// Creates the default project when missing. Returns the project and
    /// whether this call created it.
    pub fn ensure_default(&mut self) -> Result<(Project, bool), AppError> {
        if let Some(project) = self.fetch_by_name(DEFAULT_PROJECT_NAME)? {
            return Ok((project, false));
        }
        let project = Project::new(DEFAULT_PROJECT_NAME);
        self.insert(&project)?;
        Ok((project, true))
    }

    /// Deletes a non-default project together with its work entries, or
    /// reassigns the entries to the default project first. Both steps run in
    /// one transaction so a failure leaves project and entries unchanged.
    pub fn delete(&mut self, id: &Uuid, delete_work_entries: bool) -> Result<Project, AppError> {
        let default = self
            .fetch_by_name(DEFAULT_PROJECT_NAME)?
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("default project is missing")))?;
        if *id == default.id {
            return Err(AppError::BusinessRule("Default project cannot be deleted".to_string()));
        }

        let tx = self.conn.transaction()?;
        let project = tx
            .query_row(SELECT_PROJECT_BY_ID, params![id.to_string()], map_project)
            .optional()?
            .ok_or_else(|| AppError::NotFound("Project not found".to_string()))?;

        if delete_work_entries {
            tx.execute(DELETE_ENTRIES_OF_PROJECT, params![id.to_string()])?;
        } else {
            tx.execute(REASSIGN_ENTRIES_OF_PROJECT, params![default.id.to_string(), id.to_string()])?;
        }
        tx.execute(DELETE_PROJECT, params![id.to_string()])?;
        tx.commit()?;

        Ok(project)
    }
}

fn map_project(row: &Row) -> rusqlite::Result<Project> {
    Ok(Project {
        id: Uuid::parse_str(&row.get::<_, String>(0)?).unwrap(),
        name: row.get(1)?,
    })
}
