//! Groups and files whose navigator position does not follow the disk.
//!
//! When a group maps onto a real folder, Xcode records only its `path`.
//! A `name` on a group means it is either a virtual group or points
//! somewhere else on disk; on a file it means the reference was renamed
//! away from its file name. Both break the "navigator mirrors disk" rule.

use crate::report::{Diagnostic, Report};
use crate::walk::{is_skipped, top_level_children};
use pbxlint_graph::Project;
use std::collections::{BTreeSet, HashSet};
use tracing::debug;

fn visit<'a>(
    project: &'a Project,
    ids: &'a [String],
    skip_folders: &[String],
    seen: &mut HashSet<&'a str>,
    out: &mut BTreeSet<Diagnostic>,
) {
    for id in ids {
        if let Some(group) = project.group(id) {
            if is_skipped(project, id, skip_folders) || !seen.insert(id) {
                continue;
            }
            if group.name.is_some() {
                out.insert(Diagnostic::new(format!(
                    "Folder “{}” ({}) is misplaced on disk, or wrong kind of reference.",
                    group.title, group.id
                )));
                // Everything below a detached group is detached too.
                continue;
            }
            visit(project, &group.children, skip_folders, seen, out);
        } else if let Some(file) = project.file_reference(id) {
            if file.name.is_some() {
                out.insert(Diagnostic::new(format!(
                    "File “{}” ({}) is misplaced on disk, or wrong kind of reference.",
                    file.title, file.id
                )));
            }
        }
    }
}

/// Reports named groups and files below the main group, sorted.
///
/// Groups whose `name` is in `skip_folders` are ignored at any depth.
pub fn check_disk_layout(project: &Project, skip_folders: &[String]) -> Report {
    let Some(children) = top_level_children(project, skip_folders) else {
        return Report::InvalidInput;
    };

    let mut diagnostics = BTreeSet::new();
    visit(project, &children, skip_folders, &mut HashSet::new(), &mut diagnostics);

    debug!("disk-layout-matches-project: {} misplaced items", diagnostics.len());
    Report::from_diagnostics(diagnostics.into_iter().collect())
}
