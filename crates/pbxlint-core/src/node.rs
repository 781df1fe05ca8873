//! Typed project objects.
//!
//! Every entry of a project's `objects` table is an attribute dictionary
//! tagged with an `isa` discriminator. [`Object::decode`] turns one entry
//! into the matching record. Kinds we don't model are kept as
//! [`Object::Unknown`] with their attributes intact.

use crate::error::{CoreError, Result};
use crate::fields::Fields;
use crate::plist::{Dictionary, PlistValue};
use crate::titles::Titles;
use serde::Serialize;

// ─────────────────────────────────────────────────────────────────────────────
// Object
// ─────────────────────────────────────────────────────────────────────────────

/// One decoded entry of the objects table.
#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    Project(ProjectRoot),
    Group(Group),
    VariantGroup(VariantGroup),
    FileReference(FileReference),
    BuildFile(BuildFile),
    BuildConfiguration(BuildConfiguration),
    BuildConfigurationList(BuildConfigurationList),
    NativeTarget(NativeTarget),
    LegacyTarget(LegacyTarget),
    AggregateTarget(AggregateTarget),
    TargetDependency(TargetDependency),
    ContainerItemProxy(ContainerItemProxy),
    BuildPhase(BuildPhase),
    Unknown(UnknownObject),
}

impl Object {
    /// Decodes one `objects` entry.
    ///
    /// Fails only when the entry isn't a dictionary or has no `isa`;
    /// unrecognized kinds come back as [`Object::Unknown`].
    pub fn decode(id: &str, value: &PlistValue, titles: &Titles) -> Result<Self> {
        let attrs = value.as_dictionary().ok_or_else(|| {
            CoreError::malformed(id, format!("expected dictionary, found {}", value.kind_name()))
        })?;
        let isa = attrs
            .get("isa")
            .and_then(PlistValue::as_str)
            .ok_or_else(|| CoreError::malformed(id, "missing 'isa'"))?;
        let fields = Fields::new(id, isa, attrs);

        let object = match isa {
            "PBXProject" => Object::Project(ProjectRoot::decode(id, &fields)),
            "PBXGroup" => Object::Group(Group::decode(id, &fields, titles)),
            "PBXVariantGroup" => Object::VariantGroup(VariantGroup::decode(id, &fields)),
            "PBXFileReference" => Object::FileReference(FileReference::decode(id, &fields, titles)),
            "PBXBuildFile" => Object::BuildFile(BuildFile::decode(id, &fields)),
            "XCBuildConfiguration" => {
                Object::BuildConfiguration(BuildConfiguration::decode(id, &fields, titles))
            }
            "XCConfigurationList" => {
                Object::BuildConfigurationList(BuildConfigurationList::decode(id, &fields, titles))
            }
            "PBXNativeTarget" => Object::NativeTarget(NativeTarget::decode(id, &fields)),
            "PBXLegacyTarget" => Object::LegacyTarget(LegacyTarget::decode(id, &fields)),
            "PBXAggregateTarget" => Object::AggregateTarget(AggregateTarget::decode(id, &fields)),
            "PBXTargetDependency" => Object::TargetDependency(TargetDependency::decode(id, &fields)),
            "PBXContainerItemProxy" => {
                Object::ContainerItemProxy(ContainerItemProxy::decode(id, &fields))
            }
            other => match PhaseKind::decode(other, &fields) {
                Some(kind) => Object::BuildPhase(BuildPhase::decode(id, kind, &fields)),
                None => Object::Unknown(UnknownObject {
                    id: id.to_string(),
                    isa: other.to_string(),
                    attributes: attrs.clone(),
                }),
            },
        };

        Ok(object)
    }

    pub fn id(&self) -> &str {
        match self {
            Object::Project(o) => &o.id,
            Object::Group(o) => &o.id,
            Object::VariantGroup(o) => &o.id,
            Object::FileReference(o) => &o.id,
            Object::BuildFile(o) => &o.id,
            Object::BuildConfiguration(o) => &o.id,
            Object::BuildConfigurationList(o) => &o.id,
            Object::NativeTarget(o) => &o.id,
            Object::LegacyTarget(o) => &o.id,
            Object::AggregateTarget(o) => &o.id,
            Object::TargetDependency(o) => &o.id,
            Object::ContainerItemProxy(o) => &o.id,
            Object::BuildPhase(o) => &o.id,
            Object::Unknown(o) => &o.id,
        }
    }

    /// The `isa` this object was decoded from.
    pub fn isa(&self) -> &str {
        match self {
            Object::Project(_) => "PBXProject",
            Object::Group(_) => "PBXGroup",
            Object::VariantGroup(_) => "PBXVariantGroup",
            Object::FileReference(_) => "PBXFileReference",
            Object::BuildFile(_) => "PBXBuildFile",
            Object::BuildConfiguration(_) => "XCBuildConfiguration",
            Object::BuildConfigurationList(_) => "XCConfigurationList",
            Object::NativeTarget(_) => "PBXNativeTarget",
            Object::LegacyTarget(_) => "PBXLegacyTarget",
            Object::AggregateTarget(_) => "PBXAggregateTarget",
            Object::TargetDependency(_) => "PBXTargetDependency",
            Object::ContainerItemProxy(_) => "PBXContainerItemProxy",
            Object::BuildPhase(o) => o.kind.isa(),
            Object::Unknown(o) => &o.isa,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Formatting overrides
// ─────────────────────────────────────────────────────────────────────────────

/// Per-item editor settings a developer can set in the file inspector.
///
/// These are personal preferences; any of them showing up in a shared
/// project file is worth flagging.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Formatting {
    pub indent_width: Option<String>,
    pub line_ending: Option<String>,
    pub tab_width: Option<String>,
    pub uses_tabs: Option<String>,
    pub wraps_lines: Option<String>,
}

impl Formatting {
    const KEYS: [&'static str; 5] = ["indentWidth", "lineEnding", "tabWidth", "usesTabs", "wrapsLines"];

    fn decode(fields: &Fields) -> Self {
        Self {
            indent_width: fields.optional_str("indentWidth"),
            line_ending: fields.optional_str("lineEnding"),
            tab_width: fields.optional_str("tabWidth"),
            uses_tabs: fields.optional_str("usesTabs"),
            wraps_lines: fields.optional_str("wrapsLines"),
        }
    }

    /// Attributes that are set, as `(attribute name, value)` in name order.
    pub fn specified(&self) -> Vec<(&'static str, &str)> {
        [
            &self.indent_width,
            &self.line_ending,
            &self.tab_width,
            &self.uses_tabs,
            &self.wraps_lines,
        ]
        .into_iter()
        .zip(Self::KEYS)
        .filter_map(|(value, key)| value.as_deref().map(|v| (key, v)))
        .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.specified().is_empty()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Hierarchy
// ─────────────────────────────────────────────────────────────────────────────

/// `PBXProject`: the root object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectRoot {
    pub id: String,
    pub main_group: String,
    pub product_ref_group: Option<String>,
    pub targets: Vec<String>,
    pub build_configuration_list: String,
    pub known_regions: Vec<String>,
    pub development_region: Option<String>,
    pub compatibility_version: Option<String>,
    pub has_scanned_for_encodings: bool,
    pub project_dir_path: String,
    pub project_root: String,
    pub attributes: Dictionary,
}

impl ProjectRoot {
    fn decode(id: &str, fields: &Fields) -> Self {
        fields.note_unknown_keys(&[
            "mainGroup",
            "attributes",
            "developmentRegion",
            "projectDirPath",
            "productRefGroup",
            "targets",
            "buildConfigurationList",
            "knownRegions",
            "compatibilityVersion",
            "hasScannedForEncodings",
            "projectRoot",
            "packageReferences",
            "preferredProjectObjectVersion",
            "minimizedProjectReferenceProxies",
        ]);
        Self {
            id: id.to_string(),
            main_group: fields.required_str("mainGroup", ""),
            product_ref_group: fields.optional_str("productRefGroup"),
            targets: fields.required_list("targets"),
            build_configuration_list: fields.required_str("buildConfigurationList", ""),
            known_regions: fields.optional_list("knownRegions").unwrap_or_default(),
            development_region: fields.optional_str("developmentRegion"),
            compatibility_version: fields.optional_str("compatibilityVersion"),
            has_scanned_for_encodings: fields.flag("hasScannedForEncodings"),
            project_dir_path: fields.optional_str("projectDirPath").unwrap_or_default(),
            project_root: fields.optional_str("projectRoot").unwrap_or_default(),
            attributes: fields.optional_dictionary("attributes"),
        }
    }
}

/// `PBXGroup`: a folder in the project navigator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Group {
    pub id: String,
    /// Navigator name, recovered from the comment beside the id.
    pub title: String,
    /// Explicit name override. Its presence means the group's folder on
    /// disk is not where the hierarchy says it is.
    pub name: Option<String>,
    pub path: Option<String>,
    pub source_tree: String,
    pub children: Vec<String>,
    pub formatting: Formatting,
}

impl Group {
    fn decode(id: &str, fields: &Fields, titles: &Titles) -> Self {
        fields.note_unknown_keys(&[
            "name",
            "path",
            "sourceTree",
            "children",
            "indentWidth",
            "tabWidth",
            "usesTabs",
            "wrapsLines",
            "lineEnding",
        ]);
        Self {
            id: id.to_string(),
            title: titles.resolve(id),
            name: fields.optional_str("name"),
            path: fields.optional_str("path"),
            source_tree: fields.required_str("sourceTree", "<group>"),
            children: fields.required_list("children"),
            formatting: Formatting::decode(fields),
        }
    }
}

/// `PBXVariantGroup`: a localized resource and its per-language variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariantGroup {
    pub id: String,
    pub name: Option<String>,
    pub path: Option<String>,
    pub source_tree: String,
    pub children: Vec<String>,
}

impl VariantGroup {
    fn decode(id: &str, fields: &Fields) -> Self {
        fields.note_unknown_keys(&["name", "path", "sourceTree", "children"]);
        Self {
            id: id.to_string(),
            name: fields.optional_str("name"),
            path: fields.optional_str("path"),
            source_tree: fields.required_str("sourceTree", "<group>"),
            children: fields.required_list("children"),
        }
    }
}

/// `PBXFileReference`: one file on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReference {
    pub id: String,
    pub title: String,
    pub path: String,
    /// Explicit name override; like [`Group::name`], a sign of a mismatch
    /// between disk layout and hierarchy.
    pub name: Option<String>,
    pub last_known_file_type: Option<String>,
    pub explicit_file_type: Option<String>,
    pub source_tree: String,
    pub file_encoding: Option<String>,
    pub language_specification: Option<String>,
    pub include_in_index: bool,
    pub formatting: Formatting,
}

impl FileReference {
    fn decode(id: &str, fields: &Fields, titles: &Titles) -> Self {
        fields.note_unknown_keys(&[
            "path",
            "name",
            "explicitFileType",
            "lastKnownFileType",
            "sourceTree",
            "fileEncoding",
            "lineEnding",
            "xcLanguageSpecificationIdentifier",
            "includeInIndex",
            "indentWidth",
            "tabWidth",
            "usesTabs",
            "wrapsLines",
        ]);
        Self {
            id: id.to_string(),
            title: titles.resolve(id),
            path: fields.required_str("path", ""),
            name: fields.optional_str("name"),
            last_known_file_type: fields.optional_str("lastKnownFileType"),
            explicit_file_type: fields.optional_str("explicitFileType"),
            source_tree: fields.required_str("sourceTree", "<group>"),
            file_encoding: fields.optional_str("fileEncoding"),
            language_specification: fields.optional_str("xcLanguageSpecificationIdentifier"),
            include_in_index: fields.flag("includeInIndex"),
            formatting: Formatting::decode(fields),
        }
    }

    /// The declared file type, preferring the explicit one.
    pub fn file_type(&self) -> Option<&str> {
        self.explicit_file_type
            .as_deref()
            .or(self.last_known_file_type.as_deref())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Build settings
// ─────────────────────────────────────────────────────────────────────────────

/// `XCBuildConfiguration`: one named bundle of build settings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuildConfiguration {
    pub id: String,
    pub title: String,
    pub name: String,
    pub base_configuration_reference: Option<String>,
    pub build_settings: Dictionary,
}

impl BuildConfiguration {
    fn decode(id: &str, fields: &Fields, titles: &Titles) -> Self {
        fields.note_unknown_keys(&["name", "baseConfigurationReference", "buildSettings"]);
        Self {
            id: id.to_string(),
            title: titles.resolve(id),
            name: fields.required_str("name", "Untitled"),
            base_configuration_reference: fields.optional_str("baseConfigurationReference"),
            build_settings: fields.dictionary("buildSettings"),
        }
    }
}

/// `XCConfigurationList`: the configurations owned by a project or target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildConfigurationList {
    pub id: String,
    pub title: String,
    pub build_configurations: Vec<String>,
    pub default_configuration_name: Option<String>,
    pub default_configuration_is_visible: bool,
}

impl BuildConfigurationList {
    fn decode(id: &str, fields: &Fields, titles: &Titles) -> Self {
        fields.note_unknown_keys(&[
            "buildConfigurations",
            "defaultConfigurationName",
            "defaultConfigurationIsVisible",
        ]);
        Self {
            id: id.to_string(),
            title: titles.resolve(id),
            build_configurations: fields.required_list("buildConfigurations"),
            default_configuration_name: fields.optional_str("defaultConfigurationName"),
            default_configuration_is_visible: fields.flag("defaultConfigurationIsVisible"),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Targets
// ─────────────────────────────────────────────────────────────────────────────

/// `PBXBuildFile`: membership of a file (or package product) in a phase.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuildFile {
    pub id: String,
    pub file_ref: Option<String>,
    pub product_ref: Option<String>,
    pub settings: Option<Dictionary>,
}

impl BuildFile {
    fn decode(id: &str, fields: &Fields) -> Self {
        fields.note_unknown_keys(&["fileRef", "productRef", "settings", "platformFilter", "platformFilters"]);
        let file_ref = fields.optional_str("fileRef");
        let product_ref = fields.optional_str("productRef");
        if file_ref.is_none() && product_ref.is_none() {
            tracing::warn!("PBXBuildFile {} references neither a file nor a product", id);
        }
        Self {
            id: id.to_string(),
            file_ref,
            product_ref,
            settings: fields.has("settings").then(|| fields.dictionary("settings")),
        }
    }
}

/// `PBXNativeTarget`: a target built by Xcode's own build system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NativeTarget {
    pub id: String,
    pub name: String,
    pub product_name: Option<String>,
    pub product_type: Option<String>,
    pub product_reference: Option<String>,
    pub build_configuration_list: String,
    pub build_phases: Vec<String>,
    pub build_rules: Vec<String>,
    pub dependencies: Vec<String>,
}

impl NativeTarget {
    fn decode(id: &str, fields: &Fields) -> Self {
        fields.note_unknown_keys(&[
            "name",
            "productName",
            "productType",
            "buildRules",
            "productReference",
            "dependencies",
            "buildConfigurationList",
            "buildPhases",
            "packageProductDependencies",
            "fileSystemSynchronizedGroups",
        ]);
        Self {
            id: id.to_string(),
            name: fields.required_str("name", "Untitled"),
            product_name: fields.optional_str("productName"),
            product_type: fields.optional_str("productType"),
            product_reference: fields.optional_str("productReference"),
            build_configuration_list: fields.required_str("buildConfigurationList", ""),
            build_phases: fields.required_list("buildPhases"),
            build_rules: fields.optional_list("buildRules").unwrap_or_default(),
            dependencies: fields.required_list("dependencies"),
        }
    }
}

/// `PBXLegacyTarget`: a target driven by an external build tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegacyTarget {
    pub id: String,
    pub name: String,
    pub product_name: Option<String>,
    pub build_configuration_list: String,
    pub build_phases: Vec<String>,
    pub dependencies: Vec<String>,
    pub build_tool_path: String,
    pub build_arguments_string: String,
    pub build_working_directory: Option<String>,
    pub pass_build_settings_in_environment: bool,
}

impl LegacyTarget {
    fn decode(id: &str, fields: &Fields) -> Self {
        fields.note_unknown_keys(&[
            "name",
            "productName",
            "dependencies",
            "buildArgumentsString",
            "buildConfigurationList",
            "buildWorkingDirectory",
            "passBuildSettingsInEnvironment",
            "buildPhases",
            "buildToolPath",
        ]);
        Self {
            id: id.to_string(),
            name: fields.required_str("name", "Untitled"),
            product_name: fields.optional_str("productName"),
            build_configuration_list: fields.required_str("buildConfigurationList", ""),
            build_phases: fields.required_list("buildPhases"),
            dependencies: fields.required_list("dependencies"),
            build_tool_path: fields.required_str("buildToolPath", ""),
            build_arguments_string: fields.required_str("buildArgumentsString", ""),
            build_working_directory: fields.optional_str("buildWorkingDirectory"),
            pass_build_settings_in_environment: fields.flag("passBuildSettingsInEnvironment"),
        }
    }
}

/// `PBXAggregateTarget`: a target that only groups other targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregateTarget {
    pub id: String,
    pub name: String,
    pub product_name: Option<String>,
    pub build_configuration_list: String,
    pub build_phases: Vec<String>,
    pub dependencies: Vec<String>,
}

impl AggregateTarget {
    fn decode(id: &str, fields: &Fields) -> Self {
        fields.note_unknown_keys(&[
            "name",
            "productName",
            "buildConfigurationList",
            "buildPhases",
            "dependencies",
        ]);
        Self {
            id: id.to_string(),
            name: fields.required_str("name", "Untitled"),
            product_name: fields.optional_str("productName"),
            build_configuration_list: fields.required_str("buildConfigurationList", ""),
            build_phases: fields.optional_list("buildPhases").unwrap_or_default(),
            dependencies: fields.required_list("dependencies"),
        }
    }
}

/// `PBXTargetDependency`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetDependency {
    pub id: String,
    pub name: Option<String>,
    pub target: Option<String>,
    pub target_proxy: Option<String>,
}

impl TargetDependency {
    fn decode(id: &str, fields: &Fields) -> Self {
        fields.note_unknown_keys(&["name", "target", "targetProxy", "productRef"]);
        Self {
            id: id.to_string(),
            name: fields.optional_str("name"),
            target: fields.optional_str("target"),
            target_proxy: fields.optional_str("targetProxy"),
        }
    }
}

/// `PBXContainerItemProxy`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContainerItemProxy {
    pub id: String,
    pub container_portal: String,
    pub proxy_type: String,
    pub remote_global_id_string: String,
    pub remote_info: Option<String>,
}

impl ContainerItemProxy {
    fn decode(id: &str, fields: &Fields) -> Self {
        fields.note_unknown_keys(&[
            "remoteInfo",
            "proxyType",
            "containerPortal",
            "remoteGlobalIDString",
        ]);
        Self {
            id: id.to_string(),
            container_portal: fields.required_str("containerPortal", ""),
            proxy_type: fields.required_str("proxyType", ""),
            remote_global_id_string: fields.required_str("remoteGlobalIDString", ""),
            remote_info: fields.optional_str("remoteInfo"),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Build phases
// ─────────────────────────────────────────────────────────────────────────────

/// The phase variants and their kind-specific attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PhaseKind {
    Sources,
    Resources,
    Frameworks,
    Headers,
    CopyFiles {
        dst_subfolder_spec: String,
        dst_path: String,
    },
    ShellScript {
        shell_path: String,
        shell_script: String,
        input_paths: Vec<String>,
        output_paths: Vec<String>,
        show_env_vars_in_log: bool,
    },
}

impl PhaseKind {
    fn decode(isa: &str, fields: &Fields) -> Option<Self> {
        let kind = match isa {
            "PBXSourcesBuildPhase" => PhaseKind::Sources,
            "PBXResourcesBuildPhase" => PhaseKind::Resources,
            "PBXFrameworksBuildPhase" => PhaseKind::Frameworks,
            "PBXHeadersBuildPhase" => PhaseKind::Headers,
            "PBXCopyFilesBuildPhase" => PhaseKind::CopyFiles {
                dst_subfolder_spec: fields.required_str("dstSubfolderSpec", ""),
                dst_path: fields.required_str("dstPath", ""),
            },
            "PBXShellScriptBuildPhase" => PhaseKind::ShellScript {
                shell_path: fields.required_str("shellPath", "/bin/sh"),
                shell_script: fields.required_str("shellScript", ""),
                input_paths: fields.optional_list("inputPaths").unwrap_or_default(),
                output_paths: fields.optional_list("outputPaths").unwrap_or_default(),
                show_env_vars_in_log: fields.flag("showEnvVarsInLog"),
            },
            _ => return None,
        };
        Some(kind)
    }

    pub fn isa(&self) -> &'static str {
        match self {
            PhaseKind::Sources => "PBXSourcesBuildPhase",
            PhaseKind::Resources => "PBXResourcesBuildPhase",
            PhaseKind::Frameworks => "PBXFrameworksBuildPhase",
            PhaseKind::Headers => "PBXHeadersBuildPhase",
            PhaseKind::CopyFiles { .. } => "PBXCopyFilesBuildPhase",
            PhaseKind::ShellScript { .. } => "PBXShellScriptBuildPhase",
        }
    }
}

/// A build phase of any kind. `files` holds build file ids in build order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildPhase {
    pub id: String,
    pub kind: PhaseKind,
    pub name: Option<String>,
    pub files: Vec<String>,
    pub build_action_mask: String,
    pub run_only_for_deployment_postprocessing: bool,
}

impl BuildPhase {
    fn decode(id: &str, kind: PhaseKind, fields: &Fields) -> Self {
        fields.note_unknown_keys(&[
            "files",
            "name",
            "buildActionMask",
            "runOnlyForDeploymentPostprocessing",
            "dstSubfolderSpec",
            "dstPath",
            "shellPath",
            "shellScript",
            "inputPaths",
            "outputPaths",
            "inputFileListPaths",
            "outputFileListPaths",
            "showEnvVarsInLog",
            "alwaysOutOfDate",
        ]);
        Self {
            id: id.to_string(),
            kind,
            name: fields.optional_str("name"),
            files: fields.required_list("files"),
            build_action_mask: fields.required_str("buildActionMask", "2147483647"),
            run_only_for_deployment_postprocessing: fields
                .flag("runOnlyForDeploymentPostprocessing"),
        }
    }
}

/// Any object kind not modeled above, kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnknownObject {
    pub id: String,
    pub isa: String,
    pub attributes: Dictionary,
}
