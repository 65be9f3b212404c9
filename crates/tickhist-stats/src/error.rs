use thiserror::Error;

/// Validation and computation errors for the statistics functions.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StatsError {
    #[error("invalid ddof {value}, expected 0 or 1")]
    InvalidDdof { value: i64 },

    #[error("partition count must be greater than zero")]
    InvalidPartitionCount,

    #[error("series cannot be empty")]
    EmptySeries,

    #[error("series has {got} observations, need at least {needed}")]
    NotEnoughObservations { needed: usize, got: usize },

    #[error("regression matrix is singular; the series may be constant")]
    SingularRegression,
}
