/// Every user-facing string in donelog, grouped by the area that emits it.
///
/// Text for each variant lives in the `Display` implementation in
/// [`super::display`], so call sites only pick a variant and its parameters.
#[derive(Debug, Clone)]
pub enum Message {
    // === SYNC MESSAGES ===
    SyncStarted,
    SyncAlreadyRunning,
    SyncCompleted {
        projects_inserted: usize,
        tasks_inserted: usize,
    },
    SyncPartiallyFailed(usize), // skipped records
    SyncFailed(String),         // error
    SyncNothingToReconcile,
    RecordSkipped(String), // validation error

    // === REMOTE API MESSAGES ===
    ProjectsFetchFailed(String),       // error
    CompletedTasksFetchFailed(String), // error
    RemoteRecordsFetched {
        endpoint: String,
        count: usize,
    },

    // === WATCH MESSAGES ===
    WatchStarted(u64), // interval seconds
    WatchStopped,
    WatchCtrlCListenFailed(String), // error

    // === VIEW MESSAGES ===
    ChartHeader,
    TasksHeader,
    WeeksHeader,
    ProjectsHeader,
    NoTasksFound,
    NoWeeksAvailable,
    NoProjectsAvailable,
    DefaultWeek(String),
    FilterSummary {
        week: Option<String>,
        project: Option<String>,
    },
    InvalidWeekFilter(String),
    UnknownProjectFilter(i64),
    ViewFailed(String),

    // === SYNC REPORT MESSAGES ===
    SyncReportHeader,
    SkippedRecordsHeader,

    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigDeleted,
    ConfigNotFound,
    ConfigModuleTodoist,
    ConfigModuleSync,
    TodoistTokenMissing,
    InvalidEnvValue(String, String), // variable, value

    // === PROMPTS ===
    PromptSelectModules,
    PromptTodoistToken,
    PromptTodoistApiUrl,
    PromptSyncInterval,

    // === MIGRATION MESSAGES ===
    MigrationsFound(usize),        // count
    RunningMigration(u32, String), // version, name
    MigrationCompleted(u32),       // version
    MigrationFailed(u32, String),  // version, error
    AllMigrationsCompleted,
    DatabaseUpToDate,
}
