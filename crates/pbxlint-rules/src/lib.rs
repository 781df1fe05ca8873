//! pbxlint Rules - Project hygiene validations
//!
//! Each validation is a pure function from a loaded [`Project`] (plus its
//! options) to a [`Report`]. None of them mutate the project, and they can
//! run in any order.
//!
//! # Example
//!
//! ```no_run
//! use pbxlint_graph::Project;
//! use pbxlint_rules::{Options, ReportKind, Validation};
//!
//! let project = Project::open("App.xcodeproj")?;
//! for validation in Validation::all() {
//!     let report = validation.run(&project, &Options::default());
//!     for diagnostic in report.diagnostics() {
//!         eprintln!("{}", diagnostic.render(ReportKind::Error));
//!     }
//! }
//! # Ok::<(), pbxlint_graph::LoadError>(())
//! ```
//!
//! [`Project`]: pbxlint_graph::Project

pub mod build_settings;
pub mod dangling;
pub mod disk_layout;
pub mod empty_groups;
mod error;
pub mod files_exist;
pub mod order;
mod report;
pub mod scheme;
mod validation;
mod walk;
pub mod whitespace;

#[cfg(test)]
mod testing;

pub use build_settings::check_build_settings_externalized;
pub use dangling::{check_dangling_sources, check_dangling_tests};
pub use disk_layout::check_disk_layout;
pub use empty_groups::check_empty_groups;
pub use error::RulesError;
pub use files_exist::check_files_exist;
pub use order::{check_order, natural_cmp, SortOrder};
pub use report::{Diagnostic, Location, Report, ReportKind, EX_DATAERR, EX_OK, EX_SOFTWARE};
pub use scheme::{check_scheme_references, BuildAction, BuildActionEntry, Scheme, Workspace};
pub use validation::{Options, Validation, ALL};
pub use whitespace::check_whitespace_specifications;
