//! Error types for GreenGap

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Series '{0}' is empty")]
    EmptySeries(&'static str),

    #[error("Series length mismatch: baseline={baseline}, expected={expected}, actual={actual}")]
    LengthMismatch {
        baseline: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Import error: {0}")]
    Import(String),

    #[error("Unsupported dataset format: {0}")]
    UnsupportedFormat(String),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Advisor error: {0}")]
    Advisor(String),
}

impl Error {
    /// Whether the error was caused by caller-supplied input
    /// (as opposed to an environment or collaborator failure)
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Error::EmptySeries(_)
                | Error::LengthMismatch { .. }
                | Error::InvalidData(_)
                | Error::Import(_)
                | Error::UnsupportedFormat(_)
                | Error::Csv(_)
                | Error::Json(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
