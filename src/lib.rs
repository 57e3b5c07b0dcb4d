//! # donelog - weekly view of completed Todoist tasks
//!
//! Mirrors completed tasks and projects from Todoist into a local SQLite
//! database and shows how many tasks were finished per week.
//!
//! ## Features
//!
//! - **Sync**: idempotent, all-or-nothing reconciliation of remote data
//! - **Week buckets**: every task is filed under a `YYYY-Www` key
//! - **Dashboard**: per-week series and task table, filterable by week and project
//! - **Watch mode**: periodic background sync
//!
//! ## Usage
//!
//! ```rust,no_run
//! use donelog::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod api;
pub mod commands;
pub mod db;
pub mod libs;
