//! Errors for turning user input into validation choices.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RulesError {
    #[error("Unknown validation '{0}' (try one of: {1})")]
    UnknownValidation(String, String),

    #[error("Unknown report kind '{0}', expected 'error' or 'warning'")]
    UnknownReportKind(String),
}
