use super::week::WeekKey;
use chrono::NaiveDateTime;
use serde::Serialize;

/// A completed task mirrored from the remote service.
///
/// `project_id` is the local project id resolved when the task was first
/// stored; it is never re-resolved afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    pub id: i64,
    pub remote_id: i64,
    pub content: String,
    pub project_id: Option<i64>,
    pub completed_at: NaiveDateTime,
    pub week: WeekKey,
}

/// A validated remote task ready to be upserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub remote_id: i64,
    pub content: String,
    pub completed_at: NaiveDateTime,
    pub project_remote_id: Option<i64>,
}

impl NewTask {
    pub fn new(remote_id: i64, content: &str, completed_at: NaiveDateTime, project_remote_id: Option<i64>) -> Self {
        Self {
            remote_id,
            content: content.to_string(),
            completed_at,
            project_remote_id,
        }
    }
}

/// Week and project filters, AND-combined. `None` matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct TaskFilter {
    pub week: Option<WeekKey>,
    pub project_id: Option<i64>,
}

impl TaskFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn week(mut self, week: WeekKey) -> Self {
        self.week = Some(week);
        self
    }

    pub fn project(mut self, project_id: i64) -> Self {
        self.project_id = Some(project_id);
        self
    }
}
