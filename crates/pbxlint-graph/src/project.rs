//! The assembled project.
//!
//! A `Project` owns every decoded object, keyed by id, plus the raw text it
//! was read from and the containment index. It is built once and never
//! mutated afterwards; validators only read it.

use crate::builder::GraphBuilder;
use crate::error::LoadError;
use crate::hierarchy::Hierarchy;
use pbxlint_core::{
    plist, AggregateTarget, BuildConfiguration, BuildConfigurationList, BuildFile, BuildPhase,
    ContainerItemProxy, FileReference, Group, LegacyTarget, NativeTarget, ProjectRoot,
    TargetDependency, Titles, UnknownObject, VariantGroup,
};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Name of the descriptor inside every `.xcodeproj` container.
pub const PROJECT_FILE_NAME: &str = "project.pbxproj";

/// A decoded Xcode project.
#[derive(Debug, Serialize)]
pub struct Project {
    pub(crate) name: String,
    pub(crate) container: PathBuf,
    pub(crate) pbxproj: PathBuf,
    #[serde(skip)]
    pub(crate) text: String,

    pub(crate) root: ProjectRoot,
    pub(crate) groups: BTreeMap<String, Group>,
    pub(crate) variant_groups: BTreeMap<String, VariantGroup>,
    pub(crate) file_references: BTreeMap<String, FileReference>,
    pub(crate) build_files: BTreeMap<String, BuildFile>,
    pub(crate) build_configurations: BTreeMap<String, BuildConfiguration>,
    pub(crate) build_configuration_lists: BTreeMap<String, BuildConfigurationList>,
    pub(crate) native_targets: BTreeMap<String, NativeTarget>,
    pub(crate) legacy_targets: BTreeMap<String, LegacyTarget>,
    pub(crate) aggregate_targets: BTreeMap<String, AggregateTarget>,
    pub(crate) target_dependencies: BTreeMap<String, TargetDependency>,
    pub(crate) container_item_proxies: BTreeMap<String, ContainerItemProxy>,
    pub(crate) build_phases: BTreeMap<String, BuildPhase>,
    pub(crate) unknown: BTreeMap<String, UnknownObject>,

    #[serde(skip)]
    pub(crate) titles: Titles,
    #[serde(skip)]
    pub(crate) hierarchy: Hierarchy,
}

/// Object counts, for logging and the export summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ProjectStats {
    pub groups: usize,
    pub file_references: usize,
    pub build_files: usize,
    pub build_configurations: usize,
    pub targets: usize,
    pub build_phases: usize,
    pub unknown: usize,
}

impl Project {
    /// Loads `<container>/project.pbxproj`.
    ///
    /// `container` is the `.xcodeproj` directory. A path to the
    /// `project.pbxproj` file itself is accepted too.
    pub fn open(container: impl AsRef<Path>) -> Result<Self, LoadError> {
        let mut container = container.as_ref();
        if container.file_name().is_some_and(|name| name == PROJECT_FILE_NAME) {
            container = container.parent().unwrap_or(Path::new(""));
        }

        let pbxproj = container.join(PROJECT_FILE_NAME);
        debug!("Reading {}", pbxproj.display());

        let bytes = fs::read(&pbxproj).map_err(|e| LoadError::io(&pbxproj, e))?;
        let text = String::from_utf8(bytes).map_err(|_| LoadError::NotUtf8(pbxproj.clone()))?;

        Self::from_text(container, text)
    }

    /// Decodes project text that has already been read.
    ///
    /// `container` is only used to name the project and to resolve paths
    /// on disk; nothing is read from it.
    pub fn from_text(container: impl Into<PathBuf>, text: impl Into<String>) -> Result<Self, LoadError> {
        let text = text.into();
        let document = plist::decode(&text)?;
        GraphBuilder::new(container).build(&document, text)
    }

    /// The container's file name, e.g. `App.xcodeproj`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The `.xcodeproj` directory.
    pub fn container(&self) -> &Path {
        &self.container
    }

    /// The `project.pbxproj` file diagnostics point into.
    pub fn pbxproj_path(&self) -> &Path {
        &self.pbxproj
    }

    /// The raw file text, comments included.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn root(&self) -> &ProjectRoot {
        &self.root
    }

    pub fn titles(&self) -> &Titles {
        &self.titles
    }

    pub fn groups(&self) -> &BTreeMap<String, Group> {
        &self.groups
    }

    pub fn group(&self, id: &str) -> Option<&Group> {
        self.groups.get(id)
    }

    pub fn variant_groups(&self) -> &BTreeMap<String, VariantGroup> {
        &self.variant_groups
    }

    pub fn file_references(&self) -> &BTreeMap<String, FileReference> {
        &self.file_references
    }

    pub fn file_reference(&self, id: &str) -> Option<&FileReference> {
        self.file_references.get(id)
    }

    pub fn build_files(&self) -> &BTreeMap<String, BuildFile> {
        &self.build_files
    }

    pub fn build_configurations(&self) -> &BTreeMap<String, BuildConfiguration> {
        &self.build_configurations
    }

    pub fn build_configuration_lists(&self) -> &BTreeMap<String, BuildConfigurationList> {
        &self.build_configuration_lists
    }

    pub fn native_targets(&self) -> &BTreeMap<String, NativeTarget> {
        &self.native_targets
    }

    pub fn legacy_targets(&self) -> &BTreeMap<String, LegacyTarget> {
        &self.legacy_targets
    }

    pub fn aggregate_targets(&self) -> &BTreeMap<String, AggregateTarget> {
        &self.aggregate_targets
    }

    pub fn target_dependencies(&self) -> &BTreeMap<String, TargetDependency> {
        &self.target_dependencies
    }

    pub fn container_item_proxies(&self) -> &BTreeMap<String, ContainerItemProxy> {
        &self.container_item_proxies
    }

    pub fn build_phases(&self) -> &BTreeMap<String, BuildPhase> {
        &self.build_phases
    }

    pub fn unknown_objects(&self) -> &BTreeMap<String, UnknownObject> {
        &self.unknown
    }

    /// True if some build file points at `file_ref_id`.
    pub fn is_built(&self, file_ref_id: &str) -> bool {
        self.build_files
            .values()
            .any(|build_file| build_file.file_ref.as_deref() == Some(file_ref_id))
    }

    pub fn stats(&self) -> ProjectStats {
        ProjectStats {
            groups: self.groups.len(),
            file_references: self.file_references.len(),
            build_files: self.build_files.len(),
            build_configurations: self.build_configurations.len(),
            targets: self.native_targets.len()
                + self.legacy_targets.len()
                + self.aggregate_targets.len(),
            build_phases: self.build_phases.len(),
            unknown: self.unknown.len(),
        }
    }
}
