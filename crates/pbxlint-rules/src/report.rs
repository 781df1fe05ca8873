//! Validation results.
//!
//! Every validation returns a [`Report`]. How a failed report is rendered
//! and what it does to the exit status depends on the [`ReportKind`] the
//! user asked for.

use crate::error::RulesError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Successful termination.
pub const EX_OK: i32 = 0;
/// The input data was incorrect in some way.
pub const EX_DATAERR: i32 = 65;
/// An internal software error has been detected.
pub const EX_SOFTWARE: i32 = 70;

// ─────────────────────────────────────────────────────────────────────────────
// Diagnostic
// ─────────────────────────────────────────────────────────────────────────────

/// A file and line an IDE can jump to. Line `0` means "the file as a whole".
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Location {
    pub file: PathBuf,
    pub line: usize,
}

/// One problem found by a validation.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Diagnostic {
    pub location: Option<Location>,
    pub message: String,
}

impl Diagnostic {
    /// A diagnostic with no location.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            location: None,
            message: message.into(),
        }
    }

    /// A diagnostic pointing at `line` of `file`.
    pub fn at(file: impl AsRef<Path>, line: usize, message: impl Into<String>) -> Self {
        Self {
            location: Some(Location {
                file: file.as_ref().to_path_buf(),
                line,
            }),
            message: message.into(),
        }
    }

    /// Renders in the `file:line: error: message` shape build tools parse.
    ///
    /// The spaces around the kind are required for Xcode to pick the line
    /// up in its issue navigator.
    pub fn render(&self, kind: ReportKind) -> String {
        match &self.location {
            Some(location) => format!(
                "{}:{}: {} {}",
                location.file.display(),
                location.line,
                kind.log_entry(),
                self.message
            ),
            None => format!("{} {}", kind.log_entry(), self.message),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(location) = &self.location {
            write!(f, "{}:{}: ", location.file.display(), location.line)?;
        }
        f.write_str(&self.message)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Report
// ─────────────────────────────────────────────────────────────────────────────

/// The outcome of one validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "diagnostics", rename_all = "snake_case")]
pub enum Report {
    /// The project lacks the structure this validation inspects.
    InvalidInput,
    Failed(Vec<Diagnostic>),
    Passed,
}

impl Report {
    /// `Passed` for an empty list, otherwise `Failed`.
    pub fn from_diagnostics(diagnostics: Vec<Diagnostic>) -> Self {
        if diagnostics.is_empty() {
            Report::Passed
        } else {
            Report::Failed(diagnostics)
        }
    }

    /// The diagnostics of a failed report; empty otherwise.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            Report::Failed(diagnostics) => diagnostics,
            _ => &[],
        }
    }

    pub fn is_passed(&self) -> bool {
        matches!(self, Report::Passed)
    }

    /// The process exit status this report calls for.
    pub fn exit_code(&self, kind: ReportKind) -> i32 {
        match self {
            Report::InvalidInput => EX_DATAERR,
            Report::Failed(_) => kind.exit_code(),
            Report::Passed => EX_OK,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// ReportKind
// ─────────────────────────────────────────────────────────────────────────────

/// Whether failures break the build or only show up as warnings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    #[default]
    Error,
    Warning,
}

impl ReportKind {
    pub fn log_entry(self) -> &'static str {
        match self {
            ReportKind::Error => "error:",
            ReportKind::Warning => "warning:",
        }
    }

    /// Exit status contributed by a failed report.
    pub fn exit_code(self) -> i32 {
        match self {
            ReportKind::Error => EX_SOFTWARE,
            ReportKind::Warning => EX_OK,
        }
    }
}

impl FromStr for ReportKind {
    type Err = RulesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "error" => Ok(ReportKind::Error),
            "warning" => Ok(ReportKind::Warning),
            other => Err(RulesError::UnknownReportKind(other.to_string())),
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportKind::Error => write!(f, "error"),
            ReportKind::Warning => write!(f, "warning"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_diagnostics() {
        assert_eq!(Report::from_diagnostics(vec![]), Report::Passed);

        let report = Report::from_diagnostics(vec![Diagnostic::new("broken")]);
        assert_eq!(report.diagnostics().len(), 1);
        assert!(!report.is_passed());
        assert!(Report::InvalidInput.diagnostics().is_empty());
    }

    #[test]
    fn test_render_with_and_without_location() {
        let located = Diagnostic::at("/p/App.xcodeproj/project.pbxproj", 12, "bad");
        assert_eq!(
            located.render(ReportKind::Error),
            "/p/App.xcodeproj/project.pbxproj:12: error: bad"
        );
        assert_eq!(located.to_string(), "/p/App.xcodeproj/project.pbxproj:12: bad");

        let bare = Diagnostic::new("bad");
        assert_eq!(bare.render(ReportKind::Warning), "warning: bad");
    }

    #[test]
    fn test_exit_codes() {
        let failed = Report::Failed(vec![Diagnostic::new("x")]);
        assert_eq!(failed.exit_code(ReportKind::Error), EX_SOFTWARE);
        assert_eq!(failed.exit_code(ReportKind::Warning), EX_OK);
        assert_eq!(Report::InvalidInput.exit_code(ReportKind::Warning), EX_DATAERR);
        assert_eq!(Report::Passed.exit_code(ReportKind::Error), EX_OK);
    }

    #[test]
    fn test_report_kind_parsing() {
        assert_eq!("warning".parse::<ReportKind>(), Ok(ReportKind::Warning));
        assert_eq!("error".parse::<ReportKind>(), Ok(ReportKind::Error));
        assert!("fatal".parse::<ReportKind>().is_err());
    }
}
