//! One-way reconciliation of remote projects and completed tasks into the store.
//!
//! A sync cycle moves through these states:
//!
//! ```text
//! Idle ──▶ Fetching ──▶ Reconciling ──▶ Committed
//!                                  └──▶ PartiallyFailed (some records skipped)
//! ```
//!
//! Remote data is fetched first, without holding the store lock. The store is
//! then locked once and every write of the cycle goes through a single
//! [`SyncBatch`](crate::db::store::SyncBatch), so either the whole cycle lands
//! or, on a storage failure, nothing does.
//!
//! Malformed records are skipped and reported; they never abort the cycle.

use crate::api::{RemoteProject, RemoteSource, RemoteTask};
use crate::db::store::{Store, Upserted};
use crate::libs::error::{RecordKind, RecordValidationError, StorageError};
use crate::libs::messages::Message;
use crate::libs::project::NewProject;
use crate::libs::task::NewTask;
use crate::libs::timestamp::parse_completed_at;
use crate::libs::week::WeekKey;
use crate::{msg_debug, msg_warning};
use parking_lot::Mutex;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncState {
    Idle,
    Fetching,
    Reconciling,
    Committed,
    PartiallyFailed,
    /// Another cycle was already running; nothing was fetched or written.
    Skipped,
}

/// Per-entity counters of one cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EntityCounts {
    /// Records received from the remote, including ones that were skipped.
    pub fetched: usize,
    pub inserted: usize,
    pub existing: usize,
}

impl EntityCounts {
    fn record(&mut self, upserted: Upserted) {
        match upserted.created {
            true => self.inserted += 1,
            false => self.existing += 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRecord {
    pub kind: RecordKind,
    pub reason: String,
}

impl From<&RecordValidationError> for SkippedRecord {
    fn from(error: &RecordValidationError) -> Self {
        Self {
            kind: error.kind(),
            reason: error.to_string(),
        }
    }
}

/// Outcome of one [`SyncEngine::sync`] call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    pub state: SyncState,
    pub projects: EntityCounts,
    pub tasks: EntityCounts,
    pub skipped: Vec<SkippedRecord>,
}

impl SyncReport {
    fn new(state: SyncState) -> Self {
        Self {
            state,
            projects: EntityCounts::default(),
            tasks: EntityCounts::default(),
            skipped: Vec::new(),
        }
    }

    pub fn is_skipped(&self) -> bool {
        self.state == SyncState::Skipped
    }

    /// Number of rows this cycle added to the store.
    pub fn inserted(&self) -> usize {
        self.projects.inserted + self.tasks.inserted
    }

    fn skip(&mut self, error: &RecordValidationError) {
        msg_warning!(Message::RecordSkipped(error.to_string()));
        self.skipped.push(error.into());
    }
}

/// Clears the in-progress flag when the cycle ends, however it ends.
struct InProgress<'a>(&'a AtomicBool);

impl<'a> InProgress<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire).ok().map(|_| Self(flag))
    }
}

impl Drop for InProgress<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct SyncEngine<R> {
    remote: R,
    store: Arc<Mutex<Store>>,
    in_progress: AtomicBool,
}

impl<R: RemoteSource> SyncEngine<R> {
    pub fn new(remote: R, store: Arc<Mutex<Store>>) -> Self {
        Self {
            remote,
            store,
            in_progress: AtomicBool::new(false),
        }
    }

    pub fn store(&self) -> &Arc<Mutex<Store>> {
        &self.store
    }

    pub fn is_running(&self) -> bool {
        self.in_progress.load(Ordering::Acquire)
    }

    /// Runs one sync cycle.
    ///
    /// Transport failures and malformed records never fail the call; only a
    /// storage failure does, and then every write of the cycle is rolled back.
    pub async fn sync(&self) -> Result<SyncReport, StorageError> {
        let Some(_guard) = InProgress::acquire(&self.in_progress) else {
            msg_warning!(Message::SyncAlreadyRunning);
            return Ok(SyncReport::new(SyncState::Skipped));
        };

        msg_debug!(Message::SyncStarted);
        let mut report = SyncReport::new(SyncState::Fetching);
        let projects = self.remote.fetch_projects().await;
        let tasks = self.remote.fetch_completed_tasks().await;

        if projects.is_empty() && tasks.is_empty() {
            msg_debug!(Message::SyncNothingToReconcile);
        }

        report.state = SyncState::Reconciling;
        report.projects.fetched = projects.len();
        report.tasks.fetched = tasks.len();

        let mut store = self.store.lock();
        let mut batch = store.begin_sync()?;

        for record in projects {
            match record {
                Ok(project) => report.projects.record(batch.upsert_project(&new_project(project))?),
                Err(e) => report.skip(&e),
            }
        }

        // Projects of this cycle are already in the batch, so tasks resolve against them
        for record in tasks {
            match record.and_then(validate_task) {
                Ok(task) => report.tasks.record(batch.upsert_task(&task)?),
                Err(e) => report.skip(&e),
            }
        }

        batch.commit()?;
        drop(store);

        report.state = match report.skipped.is_empty() {
            true => SyncState::Committed,
            false => SyncState::PartiallyFailed,
        };
        msg_debug!(Message::SyncCompleted {
            projects_inserted: report.projects.inserted,
            tasks_inserted: report.tasks.inserted,
        });
        Ok(report)
    }
}

fn new_project(project: RemoteProject) -> NewProject {
    NewProject {
        remote_id: project.remote_id,
        name: project.name,
    }
}

/// Turns a remote task into an insertable one, checking its completion time.
fn validate_task(task: RemoteTask) -> Result<NewTask, RecordValidationError> {
    let remote_id = task.remote_id;
    let raw = task
        .completed_at
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or(RecordValidationError::MissingCompletedAt { remote_id })?;
    let invalid = || RecordValidationError::InvalidCompletedAt {
        remote_id,
        value: raw.to_string(),
    };
    let completed_at = parse_completed_at(raw).ok_or_else(invalid)?;
    // Signed years parse fine but have no YYYY-Www bucket
    WeekKey::of(&completed_at).map_err(|_| invalid())?;

    Ok(NewTask {
        remote_id,
        content: task.content,
        completed_at,
        project_remote_id: task.project_remote_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn remote_task(completed_at: Option<&str>) -> RemoteTask {
        RemoteTask {
            remote_id: 7,
            content: "Ship it".to_string(),
            completed_at: completed_at.map(str::to_string),
            project_remote_id: None,
        }
    }

    #[test]
    fn blank_completion_time_counts_as_missing() {
        assert_eq!(
            validate_task(remote_task(Some("  "))),
            Err(RecordValidationError::MissingCompletedAt { remote_id: 7 })
        );
        assert_eq!(validate_task(remote_task(None)), Err(RecordValidationError::MissingCompletedAt { remote_id: 7 }));
    }

    #[test]
    fn garbage_completion_time_is_invalid() {
        assert!(matches!(
            validate_task(remote_task(Some("yesterday"))),
            Err(RecordValidationError::InvalidCompletedAt { remote_id: 7, .. })
        ));
    }

    #[test]
    fn years_outside_four_digits_are_invalid() {
        for value in ["+12345-03-15T10:00:00", "-0001-03-15T10:00:00"] {
            assert!(parse_completed_at(value).is_some(), "{value} should parse");
            assert_eq!(
                validate_task(remote_task(Some(value))),
                Err(RecordValidationError::InvalidCompletedAt {
                    remote_id: 7,
                    value: value.to_string()
                })
            );
        }
        assert!(validate_task(remote_task(Some("9999-12-31T23:59:59"))).is_ok());
    }

    #[test]
    fn in_progress_flag_is_released_on_drop() {
        let flag = AtomicBool::new(false);
        let guard = InProgress::acquire(&flag);
        assert!(guard.is_some());
        assert!(InProgress::acquire(&flag).is_none());
        drop(guard);
        assert!(InProgress::acquire(&flag).is_some());
    }
}
