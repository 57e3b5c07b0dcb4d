//! Database schema migration management and versioning.
//!
//! Every migration runs inside one transaction together with all other
//! pending migrations, and is recorded in the `migrations` table once it
//! succeeds.
//!
//! ```rust
//! use donelog::db::migrations::{get_db_version, init_with_migrations};
//! use rusqlite::Connection;
//!
//! let mut conn = Connection::open_in_memory().unwrap();
//! init_with_migrations(&mut conn).unwrap();
//! assert_eq!(get_db_version(&conn).unwrap(), 1);
//! ```

use crate::libs::error::StorageError;
use crate::libs::messages::Message;
use crate::{msg_debug, msg_error};
use rusqlite::{params, Connection, Transaction};

/// Tracks which schema versions have been applied.
const MIGRATIONS_TABLE: &str = "
CREATE TABLE IF NOT EXISTS migrations (
    id INTEGER PRIMARY KEY,
    version INTEGER NOT NULL UNIQUE,
    name TEXT NOT NULL,
    applied_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)";

#[derive(Debug, Clone)]
struct Migration {
    version: u32,
    name: &'static str,
    up: fn(&Transaction) -> rusqlite::Result<()>,
}

/// Registry of all schema migrations in version order.
pub struct MigrationManager {
    migrations: Vec<Migration>,
}

impl MigrationManager {
    pub fn new() -> Self {
        let mut manager = Self { migrations: Vec::new() };
        manager.register_migrations();
        manager
    }

    fn register_migrations(&mut self) {
        // Version 1: mirrored projects and completed tasks.
        // `remote_id` is the reconciliation key for both tables.
        self.add_migration(1, "create_projects_and_tasks", |tx| {
            tx.execute(
                "CREATE TABLE IF NOT EXISTS projects (
        id INTEGER PRIMARY KEY,
        remote_id INTEGER NOT NULL UNIQUE,
        name TEXT NOT NULL,
        synced_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
    )",
                [],
            )?;

            tx.execute(
                "CREATE TABLE IF NOT EXISTS tasks (
        id INTEGER PRIMARY KEY,
        remote_id INTEGER NOT NULL UNIQUE,
        content TEXT NOT NULL,
        project_id INTEGER REFERENCES projects(id),
        completed_at TIMESTAMP NOT NULL,
        week TEXT NOT NULL,
        synced_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
    )",
                [],
            )?;

            // Filter lookups from the dashboard
            tx.execute("CREATE INDEX IF NOT EXISTS idx_tasks_week ON tasks(week)", [])?;
            tx.execute("CREATE INDEX IF NOT EXISTS idx_tasks_project_id ON tasks(project_id)", [])?;
            Ok(())
        });
    }

    fn add_migration(&mut self, version: u32, name: &'static str, up: fn(&Transaction) -> rusqlite::Result<()>) {
        self.migrations.push(Migration { version, name, up });
    }

    /// Applies every migration newer than the current schema version.
    ///
    /// All pending migrations share one transaction: if any of them fails,
    /// none is recorded and the schema is left as it was.
    pub fn run_migrations(&self, conn: &mut Connection) -> Result<(), StorageError> {
        conn.execute(MIGRATIONS_TABLE, [])?;

        let current_version = self.get_current_version(conn)?;
        let pending: Vec<&Migration> = self.migrations.iter().filter(|m| m.version > current_version).collect();

        if pending.is_empty() {
            msg_debug!(Message::DatabaseUpToDate);
            return Ok(());
        }

        msg_debug!(Message::MigrationsFound(pending.len()));

        let tx = conn.transaction()?;

        for migration in pending {
            msg_debug!(Message::RunningMigration(migration.version, migration.name.to_string()));

            if let Err(e) = (migration.up)(&tx) {
                msg_error!(Message::MigrationFailed(migration.version, e.to_string()));
                return Err(StorageError::Migration {
                    version: migration.version,
                    reason: e.to_string(),
                });
            }

            tx.execute(
                "INSERT INTO migrations (version, name) VALUES (?1, ?2)",
                params![migration.version, migration.name],
            )?;
            msg_debug!(Message::MigrationCompleted(migration.version));
        }

        tx.commit()?;
        msg_debug!(Message::AllMigrationsCompleted);

        Ok(())
    }

    fn get_current_version(&self, conn: &Connection) -> Result<u32, StorageError> {
        let version: Option<u32> = conn.query_row("SELECT MAX(version) FROM migrations", [], |row| row.get(0))?;
        Ok(version.unwrap_or(0))
    }

    fn latest_version(&self) -> u32 {
        self.migrations.last().map(|m| m.version).unwrap_or(0)
    }

    /// Applied migrations as `(version, name, applied_at)`, ordered by version.
    pub fn get_migration_history(&self, conn: &Connection) -> Result<Vec<(u32, String, String)>, StorageError> {
        let mut stmt = conn.prepare("SELECT version, name, applied_at FROM migrations ORDER BY version")?;

        let history = stmt
            .query_map([], |row| Ok((row.get::<_, u32>(0)?, row.get::<_, String>(1)?, row.get::<_, String>(2)?)))?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(history)
    }
}

impl Default for MigrationManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Brings `conn` up to the latest schema version.
pub fn init_with_migrations(conn: &mut Connection) -> Result<(), StorageError> {
    MigrationManager::new().run_migrations(conn)
}

/// Current schema version, 0 for a database that was never migrated.
pub fn get_db_version(conn: &Connection) -> Result<u32, StorageError> {
    conn.execute(MIGRATIONS_TABLE, [])?;
    MigrationManager::new().get_current_version(conn)
}

pub fn needs_migration(conn: &Connection) -> Result<bool, StorageError> {
    let manager = MigrationManager::new();
    Ok(get_db_version(conn)? < manager.latest_version())
}
