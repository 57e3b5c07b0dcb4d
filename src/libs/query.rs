//! Read-only aggregation of stored tasks for the dashboard.
//!
//! [`QueryView::view`] returns a per-week count series and a task table for
//! one [`TaskFilter`]. An empty filter result is not an error; both parts are
//! simply empty.

use crate::db::store::Store;
use crate::libs::error::FilterQueryError;
use crate::libs::project::Project;
use crate::libs::task::TaskFilter;
use crate::libs::week::WeekKey;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Label for tasks whose project could not be resolved.
pub const NO_PROJECT: &str = "No Project";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekCount {
    pub week: WeekKey,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskRow {
    pub content: String,
    pub completed_date: NaiveDate,
    pub project_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DashboardView {
    /// Task counts per week, ascending by week.
    pub series: Vec<WeekCount>,
    /// Matching tasks, newest completion first.
    pub rows: Vec<TaskRow>,
}

impl DashboardView {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn total(&self) -> usize {
        self.series.iter().map(|point| point.count).sum()
    }
}

/// Values the presentation layer can offer as filters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub weeks: Vec<WeekKey>,
    pub projects: Vec<Project>,
    /// The most recent week, preselected by the dashboard.
    pub default_week: Option<WeekKey>,
}

pub struct QueryView<'s> {
    store: &'s Store,
}

impl<'s> QueryView<'s> {
    pub fn new(store: &'s Store) -> Self {
        Self { store }
    }

    pub fn filter_options(&self) -> Result<FilterOptions, FilterQueryError> {
        let weeks = self.store.list_weeks()?;
        let projects = self.store.list_projects()?;
        let default_week = weeks.last().cloned();
        Ok(FilterOptions {
            weeks,
            projects,
            default_week,
        })
    }

    pub fn view(&self, filter: &TaskFilter) -> Result<DashboardView, FilterQueryError> {
        let tasks = self.store.query_tasks(filter)?;
        if tasks.is_empty() {
            return Ok(DashboardView::default());
        }

        let names: HashMap<i64, String> = self.store.list_projects()?.into_iter().map(|p| (p.id, p.name)).collect();

        let mut counts: BTreeMap<WeekKey, usize> = BTreeMap::new();
        let mut rows = Vec::with_capacity(tasks.len());
        for task in tasks {
            *counts.entry(task.week.clone()).or_default() += 1;
            let project_name = task
                .project_id
                .and_then(|id| names.get(&id).cloned())
                .unwrap_or_else(|| NO_PROJECT.to_string());
            rows.push(TaskRow {
                content: task.content,
                completed_date: task.completed_at.date(),
                project_name,
            });
        }

        let series = counts.into_iter().map(|(week, count)| WeekCount { week, count }).collect();
        Ok(DashboardView { series, rows })
    }
}
