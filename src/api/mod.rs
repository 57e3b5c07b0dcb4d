//! Remote task-tracking API clients.
//!
//! The sync engine only talks to a [`RemoteSource`]; [`Todoist`] is the
//! production implementation. Records are decoded one by one, so a single
//! malformed record shows up as an `Err` entry next to the valid ones instead
//! of failing the whole response.
//!
//! ```rust,no_run
//! use donelog::api::{RemoteSource, Todoist, TodoistConfig};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let client = Todoist::new(&TodoistConfig::with_token("0123456789abcdef"))?;
//! let projects = client.fetch_projects().await;
//! # Ok(())
//! # }
//! ```

use crate::libs::error::{RecordValidationError, TransportError};
use crate::libs::messages::Message;
use crate::msg_error;

pub mod todoist;

pub use todoist::{Todoist, TodoistConfig};

/// A project record as reported by the remote service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteProject {
    pub remote_id: i64,
    pub name: String,
}

/// A completed-task record as reported by the remote service.
///
/// `completed_at` is kept as the raw string; the sync engine decides whether
/// it is usable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteTask {
    pub remote_id: i64,
    pub content: String,
    pub completed_at: Option<String>,
    pub project_remote_id: Option<i64>,
}

/// Per-record decoding results of one remote call.
pub type RemoteRecords<T> = Vec<Result<T, RecordValidationError>>;

/// Read-only access to the remote projects and completed tasks.
#[allow(async_fn_in_trait)]
pub trait RemoteSource {
    /// Fetches all projects, surfacing transport failures.
    async fn try_fetch_projects(&self) -> Result<RemoteRecords<RemoteProject>, TransportError>;

    /// Fetches completed tasks, surfacing transport failures.
    async fn try_fetch_completed_tasks(&self) -> Result<RemoteRecords<RemoteTask>, TransportError>;

    /// Fetches all projects. A transport failure is logged and yields an empty list.
    async fn fetch_projects(&self) -> RemoteRecords<RemoteProject> {
        match self.try_fetch_projects().await {
            Ok(records) => records,
            Err(e) => {
                msg_error!(Message::ProjectsFetchFailed(e.to_string()));
                Vec::new()
            }
        }
    }

    /// Fetches completed tasks. A transport failure is logged and yields an empty list.
    async fn fetch_completed_tasks(&self) -> RemoteRecords<RemoteTask> {
        match self.try_fetch_completed_tasks().await {
            Ok(records) => records,
            Err(e) => {
                msg_error!(Message::CompletedTasksFetchFailed(e.to_string()));
                Vec::new()
            }
        }
    }
}
