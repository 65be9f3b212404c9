use thiserror::Error;

use tickhist_core::{FetchError, ValidationError};
use tickhist_stats::StatsError;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Stats(#[from] StatsError),

    #[error(transparent)]
    Fetch(FetchError),

    #[error("command error: {0}")]
    Command(String),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<FetchError> for CliError {
    fn from(error: FetchError) -> Self {
        // Window and symbol validation failures keep their own exit code
        // even when they surface through a fetcher.
        match error {
            FetchError::Validation(inner) => Self::Validation(inner),
            other => Self::Fetch(other),
        }
    }
}

impl CliError {
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) => 2,
            Self::Stats(_) => 3,
            Self::Fetch(_) => 4,
            Self::Command(_) | Self::Serialization(_) | Self::Csv(_) | Self::Io(_) => 10,
        }
    }
}
