//! Database module for SQLite operations.
//!
//! This module provides:
//! - Storage setup: data directory, connection and schema
//! - `TrainRepository` for the add/find/list operations

pub mod repo;
pub mod storage;

pub use repo::TrainRepository;
pub use storage::{ensure_data_dir, open_storage, Storage};
