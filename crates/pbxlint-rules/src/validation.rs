//! The catalogue of project validations and their options.

use crate::build_settings::check_build_settings_externalized;
use crate::dangling::{check_dangling_sources, check_dangling_tests};
use crate::disk_layout::check_disk_layout;
use crate::empty_groups::check_empty_groups;
use crate::error::RulesError;
use crate::files_exist::check_files_exist;
use crate::order::{check_order, SortOrder};
use crate::report::Report;
use crate::whitespace::check_whitespace_specifications;
use pbxlint_graph::Project;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Name that selects every validation.
pub const ALL: &str = "all";

/// A check that can be run against a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Validation {
    BuildSettingsExternalized,
    DanglingSourceFiles,
    DanglingTestFiles,
    DiskLayoutMatchesProject,
    EmptyGroups,
    FilesExistOnDisk,
    ItemsInAlphaOrder,
    NoWhiteSpaceSpecifications,
}

/// Knobs shared by the tree-walking validations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    /// Sort groups and files together instead of groups first.
    pub sort_by_name: bool,
    /// Group names to leave out of ordering and layout checks.
    pub skip_folders: Vec<String>,
}

impl Validation {
    /// Every validation, in name order.
    pub fn all() -> &'static [Validation] {
        &[
            Validation::BuildSettingsExternalized,
            Validation::DanglingSourceFiles,
            Validation::DanglingTestFiles,
            Validation::DiskLayoutMatchesProject,
            Validation::EmptyGroups,
            Validation::FilesExistOnDisk,
            Validation::ItemsInAlphaOrder,
            Validation::NoWhiteSpaceSpecifications,
        ]
    }

    pub fn name(self) -> &'static str {
        match self {
            Validation::BuildSettingsExternalized => "build-settings-externalized",
            Validation::DanglingSourceFiles => "dangling-source-files",
            Validation::DanglingTestFiles => "dangling-test-files",
            Validation::DiskLayoutMatchesProject => "disk-layout-matches-project",
            Validation::EmptyGroups => "empty-groups",
            Validation::FilesExistOnDisk => "files-exist-on-disk",
            Validation::ItemsInAlphaOrder => "items-in-alpha-order",
            Validation::NoWhiteSpaceSpecifications => "no-white-space-specifications",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Validation::BuildSettingsExternalized => {
                "Looks for project settings defined in the project file"
            }
            Validation::DanglingSourceFiles => "Ensures each source file is a member of a target",
            Validation::DanglingTestFiles => "Ensures each test file is a member of a test target",
            Validation::DiskLayoutMatchesProject => {
                "Validates files on disk are arranged like the project file"
            }
            Validation::EmptyGroups => "Reports groups that have no children",
            Validation::FilesExistOnDisk => {
                "Looks for files referenced by the project that are not found on disk"
            }
            Validation::ItemsInAlphaOrder => "Ensures groups and files are sorted alphabetically",
            Validation::NoWhiteSpaceSpecifications => {
                "Ensures tab, indent and line ending choices are not carried in the project file"
            }
        }
    }

    /// Expands a list of names into validations, in the order given.
    ///
    /// `all` anywhere in the list selects everything. Repeats are dropped.
    pub fn resolve<S: AsRef<str>>(names: &[S]) -> Result<Vec<Validation>, RulesError> {
        let mut selected = Vec::new();
        for name in names {
            let name = name.as_ref();
            if name == ALL {
                return Ok(Self::all().to_vec());
            }
            let validation = name.parse()?;
            if !selected.contains(&validation) {
                selected.push(validation);
            }
        }
        Ok(selected)
    }

    /// Runs this validation.
    pub fn run(self, project: &Project, options: &Options) -> Report {
        debug!("Running {}", self);
        match self {
            Validation::BuildSettingsExternalized => check_build_settings_externalized(project),
            Validation::DanglingSourceFiles => check_dangling_sources(project),
            Validation::DanglingTestFiles => check_dangling_tests(project),
            Validation::DiskLayoutMatchesProject => {
                check_disk_layout(project, &options.skip_folders)
            }
            Validation::EmptyGroups => check_empty_groups(project),
            Validation::FilesExistOnDisk => check_files_exist(project),
            Validation::ItemsInAlphaOrder => {
                let order = if options.sort_by_name {
                    SortOrder::ByName
                } else {
                    SortOrder::GroupsFirst
                };
                check_order(project, order, &options.skip_folders)
            }
            Validation::NoWhiteSpaceSpecifications => check_whitespace_specifications(project),
        }
    }
}

impl FromStr for Validation {
    type Err = RulesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|validation| validation.name() == s)
            .ok_or_else(|| {
                let known: Vec<&str> = Self::all().iter().map(|v| v.name()).collect();
                RulesError::UnknownValidation(s.to_string(), known.join(", "))
            })
    }
}

impl fmt::Display for Validation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
