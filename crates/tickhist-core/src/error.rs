use thiserror::Error;

/// Validation errors exposed by `tickhist-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("symbol cannot be empty")]
    EmptySymbol,
    #[error("symbol contains invalid character '{ch}' at index {index}")]
    SymbolInvalidChar { ch: char, index: usize },

    #[error("coin name cannot be empty")]
    EmptyCoinName,

    #[error("invalid frequency '{value}', expected one of daily, weekly, monthly")]
    InvalidFrequency { value: String },

    #[error("invalid date '{value}', expected day/month/year")]
    InvalidDate { value: String },
    #[error("end date {end} must be after the start date {start}")]
    EndBeforeStart { start: String, end: String },
    #[error("start/end dates cannot be future dates: {value}")]
    FutureDate { value: String },
}

/// Errors raised while fetching and parsing a historical price series.
///
/// Nothing here is caught or retried inside the fetchers; every failure
/// propagates to the caller.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("request to {url} returned HTTP status {status}")]
    Status { status: u16, url: String },

    #[error("page has {found} tables, wanted table index {wanted}")]
    MissingTable { wanted: usize, found: usize },

    #[error("expected column '{name}' is missing")]
    MissingColumn { name: String },

    #[error("malformed value '{value}' in column '{column}'")]
    MalformedCell { column: String, value: String },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl From<crate::http::HttpError> for FetchError {
    fn from(error: crate::http::HttpError) -> Self {
        Self::Transport(error.message().to_owned())
    }
}
