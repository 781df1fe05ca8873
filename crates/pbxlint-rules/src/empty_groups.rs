//! Groups with nothing in them.

use crate::report::{Diagnostic, Report};
use crate::walk::top_level_children;
use pbxlint_graph::Project;
use std::collections::HashSet;
use tracing::debug;

fn visit<'a>(
    project: &'a Project,
    ids: &'a [String],
    seen: &mut HashSet<&'a str>,
    out: &mut Vec<Diagnostic>,
) {
    for id in ids {
        let Some(group) = project.group(id) else {
            continue;
        };
        if !seen.insert(id) {
            continue;
        }
        if group.children.is_empty() {
            out.push(Diagnostic::new(format!(
                "Xcode folder “{}” has no children.",
                project.display_path(id)
            )));
        }
        visit(project, &group.children, seen, out);
    }
}

/// Reports each group below the main group that has no children.
pub fn check_empty_groups(project: &Project) -> Report {
    let Some(children) = top_level_children(project, &[]) else {
        return Report::InvalidInput;
    };

    let mut diagnostics = Vec::new();
    visit(project, &children, &mut HashSet::new(), &mut diagnostics);

    debug!("empty-groups: {} empty groups", diagnostics.len());
    Report::from_diagnostics(diagnostics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Fixture;

    #[test]
    fn test_one_diagnostic_per_empty_group() {
        let project = Fixture::new()
            .main(&["G_BAD", "G_OK"])
            .group("G_BAD", "Bad", &["G_E1", "G_E2"], "")
            .group("G_E1", "Empty", &[], "")
            .group("G_E2", "AlsoEmpty", &[], "")
            .group("G_OK", "Fine", &["F_1"], "")
            .file("F_1", "a.swift")
            .project();

        let report = check_empty_groups(&project);
        let messages: Vec<&str> = report
            .diagnostics()
            .iter()
            .map(|d| d.message.as_str())
            .collect();
        assert_eq!(
            messages,
            vec![
                "Xcode folder “Bad/Empty” has no children.",
                "Xcode folder “Bad/AlsoEmpty” has no children.",
            ]
        );
    }

    #[test]
    fn test_populated_groups_pass() {
        let project = Fixture::new()
            .main(&["G_OK"])
            .group("G_OK", "Fine", &["F_1"], "")
            .file("F_1", "a.swift")
            .project();

        assert_eq!(check_empty_groups(&project), Report::Passed);
    }

    #[test]
    fn test_empty_main_group_is_not_reported() {
        let project = Fixture::new().project();
        assert_eq!(check_empty_groups(&project), Report::Passed);
    }

    #[test]
    fn test_missing_main_group_is_invalid_input() {
        let project = Fixture::new().without_main().project();
        assert_eq!(check_empty_groups(&project), Report::InvalidInput);
    }
}
