//! Personal editor settings committed into the shared project.

use crate::report::{Diagnostic, Report};
use pbxlint_graph::Project;
use tracing::debug;

/// Reports every tab, indent, line-ending or wrapping override on a group
/// or file, one diagnostic per attribute.
///
/// Groups come first, then files, each in id order.
pub fn check_whitespace_specifications(project: &Project) -> Report {
    let mut diagnostics = Vec::new();

    for group in project.groups().values() {
        for (attribute, _) in group.formatting.specified() {
            diagnostics.push(Diagnostic::new(format!(
                "Group item ({}) contains white space specification of '{}'.",
                group.id, attribute
            )));
        }
    }

    for file in project.file_references().values() {
        for (attribute, _) in file.formatting.specified() {
            diagnostics.push(Diagnostic::at(
                project.absolute_path(file),
                0,
                format!(
                    "File “{}” ({}) contains white space specification of '{}'.",
                    file.title, file.id, attribute
                ),
            ));
        }
    }

    debug!("no-white-space-specifications: {} overrides", diagnostics.len());
    Report::from_diagnostics(diagnostics)
}
