use thiserror::Error;
use tokio::task::JoinError;

use crate::models::ValidationError;

/// Reasons a portfolio could not be loaded. Every one of them stops the run
/// before any matching happens.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Unable to open CSV at path [{path}]: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error
    },
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Invalid transaction: {0}")]
    Validation(#[from] ValidationError),
    #[error("CSV reader task failed: {0}")]
    Reader(#[from] JoinError)
}
