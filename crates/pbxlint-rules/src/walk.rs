//! Shared entry point for validations that walk the group tree.

use pbxlint_graph::Project;

/// The main group's children, minus top-level groups whose `name` is in
/// `skip_folders`.
///
/// `None` when the project has no usable main group.
pub(crate) fn top_level_children(project: &Project, skip_folders: &[String]) -> Option<Vec<String>> {
    let main = project.main_group()?;

    let children = main
        .children
        .iter()
        .filter(|id| !is_skipped(project, id, skip_folders))
        .cloned()
        .collect();
    Some(children)
}

/// True for a group whose `name` override is in `skip_folders`.
pub(crate) fn is_skipped(project: &Project, id: &str, skip_folders: &[String]) -> bool {
    project
        .group(id)
        .and_then(|group| group.name.as_ref())
        .is_some_and(|name| skip_folders.contains(name))
}
