use crate::libs::project::{NewProject, Project};
use rusqlite::{params, Connection, OptionalExtension, Result, Row};

const INSERT_PROJECT: &str = "INSERT INTO projects (remote_id, name) VALUES (?1, ?2)";
const SELECT_ID_BY_REMOTE_ID: &str = "SELECT id FROM projects WHERE remote_id = ?1";
const SELECT_PROJECT_BY_ID: &str = "SELECT id, remote_id, name FROM projects WHERE id = ?1";
const SELECT_ALL_PROJECTS: &str = "SELECT id, remote_id, name FROM projects ORDER BY name, id";
const COUNT_PROJECTS: &str = "SELECT COUNT(*) FROM projects";

/// Queries over the `projects` table.
///
/// Borrows a connection so the same helpers work on a plain connection and
/// inside a sync transaction.
pub struct Projects<'c> {
    conn: &'c Connection,
}

impl<'c> Projects<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    /// Local id of the project mirrored from `remote_id`, if any.
    pub fn find_id_by_remote_id(&self, remote_id: i64) -> Result<Option<i64>> {
        self.conn.query_row(SELECT_ID_BY_REMOTE_ID, params![remote_id], |row| row.get(0)).optional()
    }

    pub fn insert(&self, project: &NewProject) -> Result<i64> {
        self.conn.execute(INSERT_PROJECT, params![project.remote_id, project.name])?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn get_by_id(&self, id: i64) -> Result<Option<Project>> {
        self.conn.query_row(SELECT_PROJECT_BY_ID, params![id], Self::from_row).optional()
    }

    pub fn list(&self) -> Result<Vec<Project>> {
        let mut stmt = self.conn.prepare(SELECT_ALL_PROJECTS)?;
        let projects = stmt.query_map([], Self::from_row)?.collect::<Result<Vec<_>>>()?;
        Ok(projects)
    }

    pub fn count(&self) -> Result<usize> {
        self.conn.query_row(COUNT_PROJECTS, [], |row| row.get(0))
    }

    fn from_row(row: &Row<'_>) -> Result<Project> {
        Ok(Project {
            id: row.get(0)?,
            remote_id: row.get(1)?,
            name: row.get(2)?,
        })
    }
}
