//! Schemes that build targets from projects the workspace doesn't include.

use crate::report::{Diagnostic, Report};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;
use tracing::debug;

static PROJECT_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\w*\.xcodeproj").unwrap());

/// A workspace: member project locations plus its shared schemes.
///
/// Locations and containers are kept as Xcode writes them, e.g.
/// `group:App/App.xcodeproj` or `container:App.xcodeproj`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workspace {
    pub members: Vec<String>,
    pub schemes: Vec<Scheme>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scheme {
    pub name: String,
    pub build_action: Option<BuildAction>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildAction {
    pub entries: Vec<BuildActionEntry>,
}

/// One buildable a scheme builds, by the container that defines it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildActionEntry {
    pub referenced_container: String,
}

/// The `Name.xcodeproj` part of a location, if there is one.
fn project_name(location: &str) -> Option<&str> {
    PROJECT_NAME_RE.find(location).map(|m| m.as_str())
}

/// Reports each project a scheme builds from that is not a workspace member.
///
/// Names are matched case-insensitively; the message uses the spelling the
/// scheme has.
pub fn check_scheme_references(workspace: &Workspace) -> Report {
    let mut referenced: BTreeMap<String, &str> = BTreeMap::new();
    for name in workspace
        .schemes
        .iter()
        .filter_map(|scheme| scheme.build_action.as_ref())
        .flat_map(|action| &action.entries)
        .filter_map(|entry| project_name(&entry.referenced_container))
    {
        referenced.entry(name.to_lowercase()).or_insert(name);
    }

    let members: BTreeSet<String> = workspace
        .members
        .iter()
        .filter_map(|location| project_name(location))
        .map(str::to_lowercase)
        .collect();

    let diagnostics: Vec<Diagnostic> = referenced
        .iter()
        .filter(|(key, _)| !members.contains(*key))
        .map(|(_, name)| {
            Diagnostic::new(format!(
                "Target defined in {name} is referenced in scheme. But {name} is missing from workspace."
            ))
        })
        .collect();

    debug!("missing-scheme-references: {} projects", diagnostics.len());
    Report::from_diagnostics(diagnostics)
}
