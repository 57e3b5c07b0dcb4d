//! Display implementation for donelog application messages.
//!
//! Keeps all user-facing text in one place so the rest of the codebase only
//! deals with typed [`Message`] variants.
//!
//! ```rust
//! use donelog::libs::messages::Message;
//!
//! let text = Message::SyncPartiallyFailed(2).to_string();
//! assert_eq!(text, "Sync committed, 2 record(s) were skipped");
//! ```

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let s = match self {
            // === SYNC MESSAGES ===
            Message::SyncStarted => "Syncing completed tasks from Todoist...".to_string(),
            Message::SyncAlreadyRunning => "A sync is already in progress, skipping this trigger".to_string(),
            Message::SyncCompleted {
                projects_inserted,
                tasks_inserted,
            } => format!("Sync completed: {} new project(s), {} new task(s)", projects_inserted, tasks_inserted),
            Message::SyncPartiallyFailed(count) => format!("Sync committed, {} record(s) were skipped", count),
            Message::SyncFailed(error) => format!("Sync failed and was rolled back: {}", error),
            Message::SyncNothingToReconcile => "Todoist returned nothing to reconcile".to_string(),
            Message::RecordSkipped(reason) => format!("Skipping record: {}", reason),

            // === REMOTE API MESSAGES ===
            Message::ProjectsFetchFailed(error) => format!("Error fetching projects: {}", error),
            Message::CompletedTasksFetchFailed(error) => format!("Error fetching completed tasks: {}", error),
            Message::RemoteRecordsFetched { endpoint, count } => format!("Fetched {} record(s) from {}", count, endpoint),

            // === WATCH MESSAGES ===
            Message::WatchStarted(secs) => format!("Watching Todoist, syncing every {} second(s). Press Ctrl-C to stop", secs),
            Message::WatchStopped => "Watch stopped".to_string(),
            Message::WatchCtrlCListenFailed(error) => format!("Failed to listen for Ctrl-C: {}", error),

            // === VIEW MESSAGES ===
            Message::ChartHeader => "Completed tasks by week".to_string(),
            Message::TasksHeader => "Tasks".to_string(),
            Message::WeeksHeader => "Weeks".to_string(),
            Message::ProjectsHeader => "Projects".to_string(),
            Message::NoTasksFound => "No tasks found".to_string(),
            Message::NoWeeksAvailable => "No weeks available yet, run `donelog sync` first".to_string(),
            Message::NoProjectsAvailable => "No projects available yet".to_string(),
            Message::DefaultWeek(week) => format!("Latest week: {}", week),
            Message::FilterSummary { week, project } => format!(
                "Week: {} | Project: {}",
                week.as_deref().unwrap_or("all"),
                project.as_deref().unwrap_or("all")
            ),
            Message::InvalidWeekFilter(value) => format!("Invalid week '{}', expected the YYYY-Www format (e.g. 2024-W11)", value),
            Message::UnknownProjectFilter(id) => format!("Project with ID {} is not known locally", id),
            Message::ViewFailed(error) => format!("Failed to build the dashboard view: {}", error),

            // === SYNC REPORT MESSAGES ===
            Message::SyncReportHeader => "Sync report".to_string(),
            Message::SkippedRecordsHeader => "Skipped records".to_string(),

            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigDeleted => "Configuration removed".to_string(),
            Message::ConfigNotFound => "No configuration file to remove".to_string(),
            Message::ConfigModuleTodoist => "Todoist settings".to_string(),
            Message::ConfigModuleSync => "Sync settings".to_string(),
            Message::TodoistTokenMissing => {
                "Todoist API token is not configured. Run `donelog init` or set TODOIST_API_TOKEN".to_string()
            }
            Message::InvalidEnvValue(var, value) => format!("Invalid value {:?} for {}", value, var),

            // === PROMPTS ===
            Message::PromptSelectModules => "Select the modules to configure".to_string(),
            Message::PromptTodoistToken => "Enter your Todoist API token".to_string(),
            Message::PromptTodoistApiUrl => "Enter the Todoist Sync API URL".to_string(),
            Message::PromptSyncInterval => "Sync interval in seconds".to_string(),

            // === MIGRATION MESSAGES ===
            Message::MigrationsFound(count) => format!("Found {} pending migration(s)", count),
            Message::RunningMigration(version, name) => format!("Running migration v{}: {}", version, name),
            Message::MigrationCompleted(version) => format!("Migration v{} completed", version),
            Message::MigrationFailed(version, error) => format!("Migration v{} failed: {}", version, error),
            Message::AllMigrationsCompleted => "All migrations completed successfully".to_string(),
            Message::DatabaseUpToDate => "Database is up to date".to_string(),
        };
        write!(f, "{}", s)
    }
}
