use crate::libs::task::{NewTask, Task, TaskFilter};
use crate::libs::week::WeekKey;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Result, Row};

const INSERT_TASK: &str = "INSERT INTO tasks (remote_id, content, project_id, completed_at, week) VALUES (?1, ?2, ?3, ?4, ?5)";
const SELECT_ID_BY_REMOTE_ID: &str = "SELECT id FROM tasks WHERE remote_id = ?1";
const SELECT_TASKS: &str = "SELECT id, remote_id, content, project_id, completed_at, week FROM tasks";
const ORDER_NEWEST_FIRST: &str = "ORDER BY completed_at DESC, id DESC";
const SELECT_WEEKS: &str = "SELECT DISTINCT week FROM tasks ORDER BY week";
const COUNT_TASKS: &str = "SELECT COUNT(*) FROM tasks";

/// Queries over the `tasks` table.
pub struct Tasks<'c> {
    conn: &'c Connection,
}

impl<'c> Tasks<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    pub fn find_id_by_remote_id(&self, remote_id: i64) -> Result<Option<i64>> {
        self.conn.query_row(SELECT_ID_BY_REMOTE_ID, params![remote_id], |row| row.get(0)).optional()
    }

    /// Inserts a task with an already resolved project and week bucket.
    pub fn insert(&self, task: &NewTask, project_id: Option<i64>, week: &WeekKey) -> Result<i64> {
        self.conn.execute(
            INSERT_TASK,
            params![task.remote_id, task.content, project_id, task.completed_at, week],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Tasks matching `filter`, newest completion first.
    pub fn fetch(&self, filter: &TaskFilter) -> Result<Vec<Task>> {
        let mut clauses: Vec<&str> = Vec::new();
        let mut values: Vec<Value> = Vec::new();

        if let Some(week) = &filter.week {
            clauses.push("week = ?");
            values.push(Value::Text(week.to_string()));
        }
        if let Some(project_id) = filter.project_id {
            clauses.push("project_id = ?");
            values.push(Value::Integer(project_id));
        }

        let sql = match clauses.is_empty() {
            true => format!("{} {}", SELECT_TASKS, ORDER_NEWEST_FIRST),
            false => format!("{} WHERE {} {}", SELECT_TASKS, clauses.join(" AND "), ORDER_NEWEST_FIRST),
        };

        let mut stmt = self.conn.prepare(&sql)?;
        let tasks = stmt.query_map(params_from_iter(values.iter()), Self::from_row)?.collect::<Result<Vec<_>>>()?;
        Ok(tasks)
    }

    /// Distinct week buckets, ascending.
    pub fn weeks(&self) -> Result<Vec<WeekKey>> {
        let mut stmt = self.conn.prepare(SELECT_WEEKS)?;
        let weeks = stmt.query_map([], |row| row.get(0))?.collect::<Result<Vec<_>>>()?;
        Ok(weeks)
    }

    pub fn count(&self) -> Result<usize> {
        self.conn.query_row(COUNT_TASKS, [], |row| row.get(0))
    }

    fn from_row(row: &Row<'_>) -> Result<Task> {
        Ok(Task {
            id: row.get(0)?,
            remote_id: row.get(1)?,
            content: row.get(2)?,
            project_id: row.get(3)?,
            completed_at: row.get(4)?,
            week: row.get(5)?,
        })
    }
}
