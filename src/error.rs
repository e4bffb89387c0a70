use crate::domain::TrainNumber;
use thiserror::Error;

/// Failure kinds surfaced by storage setup and repository operations.
///
/// A missing train is not an error: lookups return `Ok(None)` and listings an empty `Vec`.
#[derive(Debug, Error)]
pub enum TrainError {
    #[error("Failed to open train database: {0}")]
    ConnectionFailure(String),
    #[error("Train with number {0} already exists")]
    DuplicateTrainNumber(TrainNumber),
    #[error("Storage error: {0}")]
    StorageFailure(String),
}

impl TrainError {
    /// Whether the invocation must stop without running the requested command.
    pub fn is_fatal(&self) -> bool {
        matches!(self, TrainError::ConnectionFailure(_))
    }
}

impl From<sqlx::Error> for TrainError {
    fn from(err: sqlx::Error) -> Self {
        TrainError::StorageFailure(err.to_string())
    }
}
