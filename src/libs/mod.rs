pub mod cache;
pub mod config;
pub mod dashboard;
pub mod data_storage;
pub mod error;
pub mod messages;
pub mod project;
pub mod query;
pub mod sync;
pub mod task;
pub mod timestamp;
pub mod view;
pub mod week;
