//! Graph builder for assembling a `Project` from a decoded property list.
//!
//! The builder works in two passes:
//! 1. Decode every `objects` entry and file it under its kind
//! 2. Resolve group children into containment edges

use crate::error::LoadError;
use crate::hierarchy::Hierarchy;
use crate::project::{Project, PROJECT_FILE_NAME};
use pbxlint_core::{
    AggregateTarget, BuildConfiguration, BuildConfigurationList, BuildFile, BuildPhase,
    ContainerItemProxy, FileReference, Group, LegacyTarget, NativeTarget, Object, PlistValue,
    ProjectRoot, TargetDependency, Titles, UnknownObject, VariantGroup,
};
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Builds a `Project` from one decoded project file.
pub struct GraphBuilder {
    container: PathBuf,
    projects: BTreeMap<String, ProjectRoot>,
    groups: BTreeMap<String, Group>,
    variant_groups: BTreeMap<String, VariantGroup>,
    file_references: BTreeMap<String, FileReference>,
    build_files: BTreeMap<String, BuildFile>,
    build_configurations: BTreeMap<String, BuildConfiguration>,
    build_configuration_lists: BTreeMap<String, BuildConfigurationList>,
    native_targets: BTreeMap<String, NativeTarget>,
    legacy_targets: BTreeMap<String, LegacyTarget>,
    aggregate_targets: BTreeMap<String, AggregateTarget>,
    target_dependencies: BTreeMap<String, TargetDependency>,
    container_item_proxies: BTreeMap<String, ContainerItemProxy>,
    build_phases: BTreeMap<String, BuildPhase>,
    unknown: BTreeMap<String, UnknownObject>,
}

impl GraphBuilder {
    /// Creates a builder for the project stored in `container`.
    pub fn new(container: impl Into<PathBuf>) -> Self {
        Self {
            container: container.into(),
            projects: BTreeMap::new(),
            groups: BTreeMap::new(),
            variant_groups: BTreeMap::new(),
            file_references: BTreeMap::new(),
            build_files: BTreeMap::new(),
            build_configurations: BTreeMap::new(),
            build_configuration_lists: BTreeMap::new(),
            native_targets: BTreeMap::new(),
            legacy_targets: BTreeMap::new(),
            aggregate_targets: BTreeMap::new(),
            target_dependencies: BTreeMap::new(),
            container_item_proxies: BTreeMap::new(),
            build_phases: BTreeMap::new(),
            unknown: BTreeMap::new(),
        }
    }

    /// Files one decoded object under its kind.
    pub fn add_object(&mut self, object: Object) {
        let id = object.id().to_string();
        match object {
            Object::Project(o) => {
                self.projects.insert(id, o);
            }
            Object::Group(o) => {
                self.groups.insert(id, o);
            }
            Object::VariantGroup(o) => {
                self.variant_groups.insert(id, o);
            }
            Object::FileReference(o) => {
                self.file_references.insert(id, o);
            }
            Object::BuildFile(o) => {
                self.build_files.insert(id, o);
            }
            Object::BuildConfiguration(o) => {
                self.build_configurations.insert(id, o);
            }
            Object::BuildConfigurationList(o) => {
                self.build_configuration_lists.insert(id, o);
            }
            Object::NativeTarget(o) => {
                self.native_targets.insert(id, o);
            }
            Object::LegacyTarget(o) => {
                self.legacy_targets.insert(id, o);
            }
            Object::AggregateTarget(o) => {
                self.aggregate_targets.insert(id, o);
            }
            Object::TargetDependency(o) => {
                self.target_dependencies.insert(id, o);
            }
            Object::ContainerItemProxy(o) => {
                self.container_item_proxies.insert(id, o);
            }
            Object::BuildPhase(o) => {
                self.build_phases.insert(id, o);
            }
            Object::Unknown(o) => {
                warn!("Unknown object kind '{}' ({}), keeping attributes as-is", o.isa, id);
                self.unknown.insert(id, o);
            }
        }
    }

    /// Resolves group children into containment edges.
    ///
    /// Children that name no group, variant group or file reference are
    /// skipped; the file is still usable without them.
    fn resolve_hierarchy(&self) -> Hierarchy {
        let mut hierarchy = Hierarchy::new();

        for group in self.groups.values() {
            for child in &group.children {
                let known = self.groups.contains_key(child)
                    || self.variant_groups.contains_key(child)
                    || self.file_references.contains_key(child);
                if known {
                    hierarchy.add_child(&group.id, child);
                } else {
                    debug!("Group {} lists unresolved child {}", group.id, child);
                }
            }
        }

        if hierarchy.has_cycle() {
            warn!("Group hierarchy contains a cycle; paths through it are truncated");
        }
        let shared = hierarchy.shared_children();
        if shared > 0 {
            warn!("{} objects are listed by more than one group", shared);
        }

        hierarchy
    }

    /// Decodes `document` and finishes the graph.
    ///
    /// `text` is the raw file the document was decoded from; titles are
    /// recovered from its comments.
    pub fn build(mut self, document: &PlistValue, text: String) -> Result<Project, LoadError> {
        let objects = document
            .get("objects")
            .and_then(PlistValue::as_dictionary)
            .ok_or(LoadError::MissingObjects)?;
        let root_id = document
            .get("rootObject")
            .and_then(PlistValue::as_str)
            .ok_or(LoadError::MissingRootObject)?
            .to_string();

        let titles = Titles::extract(&text);
        debug!("Recovered {} titles from comments", titles.len());

        for (id, value) in objects {
            let object = Object::decode(id, value, &titles)?;
            self.add_object(object);
        }

        let root = self
            .projects
            .remove(&root_id)
            .ok_or_else(|| LoadError::RootNotProject(root_id.clone()))?;
        if !self.projects.is_empty() {
            debug!("Ignoring {} extra PBXProject objects", self.projects.len());
        }

        let hierarchy = self.resolve_hierarchy();

        let name = self
            .container
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.container.display().to_string());
        let pbxproj = self.container.join(PROJECT_FILE_NAME);

        let project = Project {
            name,
            container: self.container,
            pbxproj,
            text,
            root,
            groups: self.groups,
            variant_groups: self.variant_groups,
            file_references: self.file_references,
            build_files: self.build_files,
            build_configurations: self.build_configurations,
            build_configuration_lists: self.build_configuration_lists,
            native_targets: self.native_targets,
            legacy_targets: self.legacy_targets,
            aggregate_targets: self.aggregate_targets,
            target_dependencies: self.target_dependencies,
            container_item_proxies: self.container_item_proxies,
            build_phases: self.build_phases,
            unknown: self.unknown,
            titles,
            hierarchy,
        };

        let stats = project.stats();
        info!(
            "Loaded {} ({} groups, {} file references, {} targets, {} unknown objects)",
            project.name, stats.groups, stats.file_references, stats.targets, stats.unknown
        );

        Ok(project)
    }
}
