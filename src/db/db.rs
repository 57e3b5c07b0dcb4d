use super::migrations::init_with_migrations;
use crate::libs::data_storage::DataStorage;
use crate::libs::error::StorageError;
use rusqlite::Connection;
use std::path::Path;

pub const DB_FILE_NAME: &str = "donelog.db";

/// An open SQLite connection with the current schema applied.
pub struct Db {
    pub conn: Connection,
}

impl Db {
    /// Opens the database in the per-user data directory.
    pub fn new() -> Result<Db, StorageError> {
        let db_file_path = DataStorage::new().get_path(DB_FILE_NAME)?;
        Self::open(db_file_path)
    }

    /// Opens (or creates) the database at `path` and runs pending migrations.
    pub fn open(path: impl AsRef<Path>) -> Result<Db, StorageError> {
        let mut conn = Self::new_without_migrations(path)?;
        init_with_migrations(&mut conn)?;
        Ok(Db { conn })
    }

    /// Opens a private in-memory database, mostly for tests.
    pub fn in_memory() -> Result<Db, StorageError> {
        let mut conn = Connection::open_in_memory()?;
        Self::configure(&conn)?;
        init_with_migrations(&mut conn)?;
        Ok(Db { conn })
    }

    /// Opens a connection without touching the schema.
    pub fn new_without_migrations(path: impl AsRef<Path>) -> Result<Connection, StorageError> {
        let conn = Connection::open(path)?;
        Self::configure(&conn)?;
        Ok(conn)
    }

    fn configure(conn: &Connection) -> Result<(), StorageError> {
        conn.pragma_update(None, "foreign_keys", "ON")?;
        Ok(())
    }
}
