//! Error taxonomy for the sync and query pipeline.
//!
//! Per-record problems ([`RecordValidationError`]) are absorbed by the sync
//! engine. Transport problems ([`TransportError`]) are logged by the remote
//! client. Only [`StorageError`] escapes `sync()`, and only
//! [`FilterQueryError`] escapes the dashboard view.

use std::fmt;
use thiserror::Error;

/// Which kind of remote record a validation error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Project,
    Task,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::Project => write!(f, "project"),
            RecordKind::Task => write!(f, "task"),
        }
    }
}

/// A remote call failed at the network or HTTP level.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("failed to build the HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request to {endpoint} failed: {source}")]
    Request {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} answered with HTTP {status}")]
    Status { endpoint: String, status: u16 },

    #[error("could not decode the {endpoint} response: {reason}")]
    Decode { endpoint: String, reason: String },
}

/// A single remote record is malformed and has to be skipped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordValidationError {
    #[error("{kind} record #{index} is malformed: {reason}")]
    Malformed { kind: RecordKind, index: usize, reason: String },

    #[error("task {remote_id} has no completion timestamp")]
    MissingCompletedAt { remote_id: i64 },

    #[error("task {remote_id} has an unusable completion timestamp {value:?}")]
    InvalidCompletedAt { remote_id: i64, value: String },
}

impl RecordValidationError {
    pub fn kind(&self) -> RecordKind {
        match self {
            RecordValidationError::Malformed { kind, .. } => *kind,
            RecordValidationError::MissingCompletedAt { .. } | RecordValidationError::InvalidCompletedAt { .. } => RecordKind::Task,
        }
    }
}

/// The persistence layer itself failed. Fatal to the current sync cycle.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("failed to prepare the data directory: {0}")]
    Io(#[from] std::io::Error),

    #[error("migration v{version} failed: {reason}")]
    Migration { version: u32, reason: String },

    #[error("task cannot be filed under a week: {0}")]
    Week(#[from] InvalidWeekKey),
}

/// Reading the store for the dashboard view failed.
#[derive(Debug, Error)]
pub enum FilterQueryError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl From<rusqlite::Error> for FilterQueryError {
    fn from(e: rusqlite::Error) -> Self {
        FilterQueryError::Storage(StorageError::Sqlite(e))
    }
}

/// A string is not a valid `YYYY-Www` week key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid week key {0:?}, expected YYYY-Www")]
pub struct InvalidWeekKey(pub String);
