//! Local mirror of remote projects and completed tasks.
//!
//! [`Store`] is the only owner of entity rows. Writes happen either one at a
//! time (each statement autocommits) or through a [`SyncBatch`], which wraps
//! a whole sync cycle in a single SQLite transaction.
//!
//! ```rust
//! use chrono::NaiveDate;
//! use donelog::db::store::Store;
//! use donelog::libs::project::NewProject;
//! use donelog::libs::task::{NewTask, TaskFilter};
//!
//! let mut store = Store::in_memory().unwrap();
//! let completed = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap().and_hms_opt(10, 0, 0).unwrap();
//!
//! let mut batch = store.begin_sync().unwrap();
//! batch.upsert_project(&NewProject::new(1, "Work")).unwrap();
//! batch.upsert_task(&NewTask::new(100, "Write report", completed, Some(1))).unwrap();
//! batch.commit().unwrap();
//!
//! assert_eq!(store.query_tasks(&TaskFilter::all()).unwrap().len(), 1);
//! ```

use super::db::Db;
use super::projects::Projects;
use super::tasks::Tasks;
use crate::libs::error::StorageError;
use crate::libs::project::{NewProject, Project};
use crate::libs::task::{NewTask, Task, TaskFilter};
use crate::libs::week::WeekKey;
use rusqlite::{Connection, Transaction};
use std::path::Path;

/// Result of an upsert: the local id and whether a row was created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Upserted {
    pub id: i64,
    pub created: bool,
}

impl Upserted {
    fn existing(id: i64) -> Self {
        Self { id, created: false }
    }

    fn created(id: i64) -> Self {
        Self { id, created: true }
    }
}

pub struct Store {
    db: Db,
}

impl Store {
    /// Opens the store in the per-user data directory.
    pub fn new() -> Result<Self, StorageError> {
        Ok(Self { db: Db::new()? })
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        Ok(Self { db: Db::open(path)? })
    }

    pub fn in_memory() -> Result<Self, StorageError> {
        Ok(Self { db: Db::in_memory()? })
    }

    pub fn db(&self) -> &Db {
        &self.db
    }

    /// Inserts the project unless one with the same remote id exists.
    ///
    /// An existing row is returned untouched, including its name.
    pub fn upsert_project(&mut self, project: &NewProject) -> Result<Upserted, StorageError> {
        upsert_project(&self.db.conn, project)
    }

    /// Inserts the task unless one with the same remote id exists.
    pub fn upsert_task(&mut self, task: &NewTask) -> Result<Upserted, StorageError> {
        upsert_task(&self.db.conn, task)
    }

    /// Starts an all-or-nothing write batch for one sync cycle.
    pub fn begin_sync(&mut self) -> Result<SyncBatch<'_>, StorageError> {
        Ok(SyncBatch {
            tx: self.db.conn.transaction()?,
        })
    }

    pub fn list_weeks(&self) -> Result<Vec<WeekKey>, StorageError> {
        Ok(Tasks::new(&self.db.conn).weeks()?)
    }

    pub fn list_projects(&self) -> Result<Vec<Project>, StorageError> {
        Ok(Projects::new(&self.db.conn).list()?)
    }

    pub fn project_by_id(&self, id: i64) -> Result<Option<Project>, StorageError> {
        Ok(Projects::new(&self.db.conn).get_by_id(id)?)
    }

    pub fn query_tasks(&self, filter: &TaskFilter) -> Result<Vec<Task>, StorageError> {
        Ok(Tasks::new(&self.db.conn).fetch(filter)?)
    }

    pub fn count_projects(&self) -> Result<usize, StorageError> {
        Ok(Projects::new(&self.db.conn).count()?)
    }

    pub fn count_tasks(&self) -> Result<usize, StorageError> {
        Ok(Tasks::new(&self.db.conn).count()?)
    }
}

/// Writes of one sync cycle, applied in a single transaction.
///
/// Dropping the batch without calling [`SyncBatch::commit`] rolls back every
/// write made through it.
pub struct SyncBatch<'s> {
    tx: Transaction<'s>,
}

impl SyncBatch<'_> {
    pub fn upsert_project(&mut self, project: &NewProject) -> Result<Upserted, StorageError> {
        upsert_project(&self.tx, project)
    }

    pub fn upsert_task(&mut self, task: &NewTask) -> Result<Upserted, StorageError> {
        upsert_task(&self.tx, task)
    }

    pub fn commit(self) -> Result<(), StorageError> {
        Ok(self.tx.commit()?)
    }
}

fn upsert_project(conn: &Connection, project: &NewProject) -> Result<Upserted, StorageError> {
    let projects = Projects::new(conn);
    if let Some(id) = projects.find_id_by_remote_id(project.remote_id)? {
        return Ok(Upserted::existing(id));
    }
    Ok(Upserted::created(projects.insert(project)?))
}

fn upsert_task(conn: &Connection, task: &NewTask) -> Result<Upserted, StorageError> {
    let tasks = Tasks::new(conn);
    if let Some(id) = tasks.find_id_by_remote_id(task.remote_id)? {
        return Ok(Upserted::existing(id));
    }

    // Resolved once, at creation time
    let project_id = match task.project_remote_id {
        Some(remote_id) => Projects::new(conn).find_id_by_remote_id(remote_id)?,
        None => None,
    };
    let week = WeekKey::of(&task.completed_at)?;

    Ok(Upserted::created(tasks.insert(task, project_id, &week)?))
}
