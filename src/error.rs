//! Error types.
//!
//! - `SpamError`: library-level failures (input validation, table validation, I/O)
//! - `AppError`: CLI-facing error carrying a process exit code

use std::path::PathBuf;

pub type SpamResult<T> = Result<T, SpamError>;

#[derive(Debug, thiserror::Error)]
pub enum SpamError {
    #[error("invalid proxy input: expected a number or a sequence of numbers, got {found}")]
    InvalidInputType { found: String },

    #[error("invalid proxy input: element {index} is {found}, only numbers are allowed in a sequence")]
    HeterogeneousSequence { index: usize, found: String },

    #[error("{model} has no spectral lines")]
    NoSpectralLines { model: String },

    #[error("malformed coefficient table '{table}': {reason}")]
    MalformedCoefficientTable { table: String, reason: String },

    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error in '{}': {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl SpamError {
    pub fn invalid_input(found: impl Into<String>) -> Self {
        Self::InvalidInputType {
            found: found.into(),
        }
    }

    pub fn malformed(table: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedCoefficientTable {
            table: table.into(),
            reason: reason.into(),
        }
    }

    /// Exit code used when the error reaches the CLI.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::InvalidInputType { .. }
            | Self::HeterogeneousSequence { .. }
            | Self::NoSpectralLines { .. } => 2,
            Self::MalformedCoefficientTable { .. } => 3,
            Self::Io { .. } | Self::Csv { .. } | Self::Json(_) => 2,
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<SpamError> for AppError {
    fn from(err: SpamError) -> Self {
        Self::new(err.exit_code(), err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_errors_map_to_usage_exit_code() {
        let err: AppError = SpamError::invalid_input("string").into();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("got string"));
    }

    #[test]
    fn table_errors_map_to_data_exit_code() {
        let err: AppError = SpamError::malformed("aero_spam_bands", "missing column `P2`").into();
        assert_eq!(err.exit_code(), 3);
        assert_eq!(
            err.to_string(),
            "malformed coefficient table 'aero_spam_bands': missing column `P2`"
        );
    }
}
