//! Files that sit in the navigator but are compiled by nothing.

use crate::report::{Diagnostic, Report};
use pbxlint_core::FileReference;
use pbxlint_graph::Project;
use std::collections::HashSet;
use tracing::debug;

const SOURCE_EXTENSIONS: &[&str] = &["m", "mm", "swift", "cpp", "c"];

/// Extensions that look like tests by name but are never compiled.
const NON_TEST_EXTENSIONS: &[&str] = &["xctest", "h", "xcconfig", "xcfilelist"];

fn built_files(project: &Project) -> HashSet<&str> {
    project
        .build_files()
        .values()
        .filter_map(|build_file| build_file.file_ref.as_deref())
        .collect()
}

fn is_source(file: &FileReference) -> bool {
    file.title
        .rsplit('.')
        .next()
        .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext))
}

/// `FooTests.swift`, but not `FooTests.xctest` or `Tests` alone.
fn is_test_source(file: &FileReference) -> bool {
    let mut parts = file.title.split('.');
    let stem = parts.next().unwrap_or_default();
    match parts.next() {
        Some(ext) => stem.ends_with("Tests") && !NON_TEST_EXTENSIONS.contains(&ext),
        None => false,
    }
}

/// Reports source files no build phase compiles.
pub fn check_dangling_sources(project: &Project) -> Report {
    let built = built_files(project);

    let diagnostics: Vec<Diagnostic> = project
        .file_references()
        .values()
        .filter(|file| is_source(file) && !built.contains(file.id.as_str()))
        .map(|file| {
            Diagnostic::at(
                project.absolute_path(file),
                0,
                format!("{} is not added to any target.", file.path),
            )
        })
        .collect();

    debug!("dangling-source-files: {} unbuilt sources", diagnostics.len());
    Report::from_diagnostics(diagnostics)
}

/// Reports test sources no test target compiles.
pub fn check_dangling_tests(project: &Project) -> Report {
    let built = built_files(project);

    let diagnostics: Vec<Diagnostic> = project
        .file_references()
        .values()
        .filter(|file| is_test_source(file) && !built.contains(file.id.as_str()))
        .map(|file| {
            Diagnostic::at(
                project.absolute_path(file),
                0,
                format!("{} is not added to any test target.", file.path),
            )
        })
        .collect();

    debug!("dangling-test-files: {} unbuilt tests", diagnostics.len());
    Report::from_diagnostics(diagnostics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Fixture;
    use std::path::PathBuf;

    fn fixture() -> Fixture {
        Fixture::new()
            .main(&["G_SRC"])
            .group("G_SRC", "Sources", &["F_BUILT", "F_ORPHAN", "F_NOTES"], "path = Sources;")
            .file("F_BUILT", "Built.swift")
            .file("F_ORPHAN", "Orphan.swift")
            .file_with(
                "F_NOTES",
                "Notes.txt",
                "lastKnownFileType = text; path = Notes.txt; sourceTree = \"<group>\";",
            )
            .build_file("B_BUILT", "F_BUILT")
    }

    #[test]
    fn test_orphaned_source_reported_once() {
        let project = fixture().project();

        let report = check_dangling_sources(&project);
        let diagnostics = report.diagnostics();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].message, "Orphan.swift is not added to any target.");
        assert_eq!(
            diagnostics[0].location.as_ref().unwrap().file,
            PathBuf::from("/work/Sources/Orphan.swift")
        );
    }

    #[test]
    fn test_built_sources_pass() {
        let project = Fixture::new()
            .main(&["F_1"])
            .file("F_1", "Main.swift")
            .build_file("B_1", "F_1")
            .project();

        assert_eq!(check_dangling_sources(&project), Report::Passed);
    }

    #[test]
    fn test_test_source_detection() {
        let project = Fixture::new()
            .main(&["F_T", "F_BUNDLE", "F_HEADER", "F_PLAIN", "F_BUILT"])
            .file("F_T", "LoginTests.swift")
            .file("F_BUILT", "ModelTests.swift")
            .file("F_PLAIN", "Login.swift")
            .file_with(
                "F_BUNDLE",
                "AppTests.xctest",
                "explicitFileType = wrapper.cfbundle; includeInIndex = 0; path = AppTests.xctest; sourceTree = BUILT_PRODUCTS_DIR;",
            )
            .file_with(
                "F_HEADER",
                "AppTests.h",
                "lastKnownFileType = sourcecode.c.h; path = AppTests.h; sourceTree = \"<group>\";",
            )
            .build_file("B_1", "F_BUILT")
            .project();

        let report = check_dangling_tests(&project);
        let messages: Vec<&str> = report
            .diagnostics()
            .iter()
            .map(|d| d.message.as_str())
            .collect();
        assert_eq!(messages, vec!["LoginTests.swift is not added to any test target."]);
    }
}
