//! Error types for decoding project files.

use thiserror::Error;

/// Result alias used throughout pbxlint-core.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors raised while decoding a project file into objects.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// The text is not a well-formed property list.
    #[error("Property list syntax error at line {line} (offset {offset}): {message}")]
    Syntax {
        line: usize,
        offset: usize,
        message: String,
    },

    /// An entry in the objects table could not be turned into a node.
    #[error("Malformed object {id}: {reason}")]
    MalformedObject { id: String, reason: String },
}

impl CoreError {
    /// Builds a syntax error pointing at `remaining` inside `source`.
    pub fn syntax(source: &str, remaining: &str, message: impl Into<String>) -> Self {
        let offset = source.len().saturating_sub(remaining.len());
        let line = source[..offset].matches('\n').count() + 1;
        Self::Syntax {
            line,
            offset,
            message: message.into(),
        }
    }

    pub fn malformed(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedObject {
            id: id.into(),
            reason: reason.into(),
        }
    }
}
