use thiserror::Error;

use crate::reports::ParseError;

pub type AppResult<T> = Result<T, AppError>;

/// Application-level errors. Only the `Config` class is fatal to the
/// process; everything else is reported and the run continues or is
/// abandoned with a clean exit.
#[derive(Debug, Error)]
pub enum AppError {
    /// The grading configuration could not be resolved
    #[error("{0}")]
    Config(String),

    /// A report file could not be normalized
    #[error(transparent)]
    Report(#[from] ParseError),

    /// The pull-request comment could not be delivered
    #[error("Failed to post the comment: {0}")]
    Delivery(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
