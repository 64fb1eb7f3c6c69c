//! Error types.
//!
//! Library-level failures are typed enums (`CompareError`, `FormulaError`).
//! The application boundary collapses everything into `AppError`, which carries
//! the process exit code:
//!
//! - `2`: invalid input, usage or IO
//! - `3`: insufficient data
//! - `4`: numerical failure

use thiserror::Error;

/// Invalid input handed to the comparator.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompareError {
    #[error("no models supplied; at least one model is required for comparison")]
    Empty,

    #[error("duplicate model name '{0}'")]
    DuplicateName(String),

    #[error("cannot extract an AIC value from model '{name}'")]
    AicUnavailable { name: String },
}

/// A formula string that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormulaError {
    #[error("formula '{0}' has no '~' separating response and terms")]
    MissingTilde(String),

    #[error("formula '{0}' has an empty response")]
    EmptyResponse(String),

    #[error("formula '{0}' has no terms and no intercept")]
    NoTerms(String),

    #[error("formula '{formula}' contains an empty term")]
    EmptyTerm { formula: String },

    #[error("invalid variable name '{name}' in formula '{formula}'")]
    InvalidName { formula: String, name: String },

    #[error("'*' in formula '{formula}' joins {count} variables; at most {max} are supported")]
    TooManyVariables {
        formula: String,
        count: usize,
        max: usize,
    },
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

impl From<CompareError> for AppError {
    fn from(err: CompareError) -> Self {
        AppError::new(2, format!("Invalid input: {err}"))
    }
}

impl From<FormulaError> for AppError {
    fn from(err: FormulaError) -> Self {
        AppError::new(2, format!("Invalid formula: {err}"))
    }
}
