//! Source files the project references but the disk doesn't have.

use crate::report::{Diagnostic, Report};
use crate::walk::top_level_children;
use pbxlint_graph::Project;
use std::collections::{BTreeSet, HashSet};
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// Resolves `.` and `..` without touching the filesystem.
pub(crate) fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match normalized.components().next_back() {
                Some(Component::Normal(_)) => {
                    normalized.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => normalized.push(".."),
            },
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

struct Walk<'a> {
    project: &'a Project,
    base: &'a Path,
    seen: HashSet<&'a str>,
    missing: BTreeSet<String>,
}

impl<'a> Walk<'a> {
    fn visit(&mut self, ids: &'a [String], folders: &mut Vec<&'a str>) {
        for id in ids {
            if let Some(group) = self.project.group(id) {
                if !self.seen.insert(id) {
                    continue;
                }
                match group.path.as_deref() {
                    Some(path) => {
                        folders.push(path);
                        self.visit(&group.children, folders);
                        folders.pop();
                    }
                    None => self.visit(&group.children, folders),
                }
            } else if let Some(file) = self.project.file_reference(id) {
                let is_source = file
                    .last_known_file_type
                    .as_deref()
                    .is_some_and(|kind| kind.starts_with("sourcecode."));
                if !is_source {
                    continue;
                }

                let folder = folders.join("/");
                let mut path = self.base.to_path_buf();
                if file.source_tree == "<group>" && !folder.is_empty() {
                    path.push(&folder);
                }
                path.push(&file.path);

                if !normalize(&path).exists() {
                    debug!("Missing on disk: {}", path.display());
                    self.missing.insert(folder);
                }
            }
        }
    }
}

/// Reports each group path holding source files that don't exist.
///
/// A file's expected location is the project directory followed by the
/// `path` of every enclosing group (for group-relative files) and the
/// file's own `path`. One diagnostic per distinct group path, sorted.
pub fn check_files_exist(project: &Project) -> Report {
    let Some(children) = top_level_children(project, &[]) else {
        return Report::InvalidInput;
    };

    let mut walk = Walk {
        project,
        base: project.project_dir(),
        seen: HashSet::new(),
        missing: BTreeSet::new(),
    };
    walk.visit(&children, &mut Vec::new());

    debug!("files-exist-on-disk: {} folders with missing files", walk.missing.len());
    let diagnostics = walk
        .missing
        .into_iter()
        .map(|folder| {
            // Files directly under the main group belong to the project itself.
            let folder = if folder.is_empty() {
                project.name().to_string()
            } else {
                folder
            };
            Diagnostic::at(
                project.pbxproj_path(),
                0,
                format!("{folder} references files that are not on disk."),
            )
        })
        .collect();
    Report::from_diagnostics(diagnostics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Fixture;
    use std::fs;
    use tempfile::TempDir;

    fn fixture() -> Fixture {
        Fixture::new()
            .main(&["G_SRC", "G_LOST", "F_README"])
            .group("G_SRC", "Sources", &["F_1", "F_2"], "path = Sources;")
            .group("G_LOST", "Lost", &["F_3"], "path = Lost;")
            .file("F_1", "First.swift")
            .file("F_2", "Second.swift")
            .file("F_3", "Third.swift")
            .file_with(
                "F_README",
                "README.md",
                "lastKnownFileType = net.daringfireball.markdown; path = README.md; sourceTree = \"<group>\";",
            )
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(Path::new("/a/b/../c/./d")), PathBuf::from("/a/c/d"));
        assert_eq!(normalize(Path::new("/..")), PathBuf::from("/"));
        assert_eq!(normalize(Path::new("../x")), PathBuf::from("../x"));
    }

    #[test]
    fn test_missing_files_grouped_by_folder() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("Sources")).unwrap();
        fs::write(dir.path().join("Sources/First.swift"), "").unwrap();
        let project = fixture().project_in(dir.path());

        let report = check_files_exist(&project);
        let diagnostics = report.diagnostics();
        assert_eq!(diagnostics.len(), 2);
        assert_eq!(diagnostics[0].message, "Lost references files that are not on disk.");
        assert_eq!(diagnostics[1].message, "Sources references files that are not on disk.");

        let location = diagnostics[0].location.as_ref().unwrap();
        assert_eq!(location.file, project.pbxproj_path());
        assert_eq!(location.line, 0);
    }

    #[test]
    fn test_all_present_passes() {
        let dir = TempDir::new().unwrap();
        for folder in ["Sources", "Lost"] {
            fs::create_dir(dir.path().join(folder)).unwrap();
        }
        for file in ["Sources/First.swift", "Sources/Second.swift", "Lost/Third.swift"] {
            fs::write(dir.path().join(file), "").unwrap();
        }
        let project = fixture().project_in(dir.path());

        assert_eq!(check_files_exist(&project), Report::Passed);
    }

    #[test]
    fn test_missing_top_level_file_names_the_project() {
        let dir = TempDir::new().unwrap();
        let project = Fixture::new()
            .main(&["F_MAIN"])
            .file("F_MAIN", "main.swift")
            .project_in(dir.path());

        let report = check_files_exist(&project);
        let messages: Vec<&str> = report
            .diagnostics()
            .iter()
            .map(|d| d.message.as_str())
            .collect();
        assert_eq!(messages, vec!["App.xcodeproj references files that are not on disk."]);
    }

    #[test]
    fn test_parent_references_are_resolved() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("Shared")).unwrap();
        fs::write(dir.path().join("Shared/Util.swift"), "").unwrap();
        let project = Fixture::new()
            .main(&["G_APP"])
            .group("G_APP", "App", &["F_UTIL"], "path = App;")
            .file_with(
                "F_UTIL",
                "Util.swift",
                "lastKnownFileType = sourcecode.swift; path = ../Shared/Util.swift; sourceTree = \"<group>\";",
            )
            .project_in(dir.path());

        assert_eq!(check_files_exist(&project), Report::Passed);
    }
}
