//! SQLite persistence for donelog.
//!
//! - **`db`**: connection setup and file location
//! - **`migrations`**: versioned schema evolution
//! - **`projects`** / **`tasks`**: table-level queries over a borrowed connection
//! - **`store`**: the [`Store`](store::Store) facade used by sync and the dashboard
//!
//! ```rust
//! use donelog::db::store::Store;
//! use donelog::libs::task::TaskFilter;
//!
//! let store = Store::in_memory().unwrap();
//! assert!(store.query_tasks(&TaskFilter::all()).unwrap().is_empty());
//! ```

pub mod db;
pub mod migrations;
pub mod projects;
pub mod store;
pub mod tasks;
