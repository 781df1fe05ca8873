//! Path queries over the group hierarchy.
//!
//! Paths here are navigator paths: the chain of group titles a user clicks
//! through in the IDE, not where files live on disk. The main group is the
//! invisible root and never appears in them.

use crate::project::Project;
use pbxlint_core::{FileReference, Group};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::warn;

impl Project {
    /// The group the hierarchy hangs from, if the root names one.
    pub fn main_group(&self) -> Option<&Group> {
        self.groups.get(&self.root.main_group)
    }

    /// The group whose children list `id`.
    ///
    /// `None` for the main group and for anything no group lists.
    pub fn parent_of(&self, id: &str) -> Option<&Group> {
        let parent = self.hierarchy.parent_of(id)?;
        self.groups.get(parent)
    }

    /// Ancestor titles of `id`, outermost first, joined with `/`.
    ///
    /// Empty for direct children of the main group.
    pub fn path_to(&self, id: &str) -> String {
        let mut titles = Vec::new();
        let mut seen = HashSet::new();
        let mut current = self.parent_of(id);

        while let Some(group) = current {
            if !seen.insert(group.id.as_str()) {
                warn!("Cycle through group {} while resolving {}", group.id, id);
                break;
            }
            if group.id != self.root.main_group {
                titles.push(group.title.as_str());
            }
            current = self.parent_of(&group.id);
        }

        titles.reverse();
        titles.join("/")
    }

    /// The display title of any object, falling back to its id.
    pub fn title_of(&self, id: &str) -> String {
        if let Some(group) = self.groups.get(id) {
            return group.title.clone();
        }
        if let Some(file) = self.file_references.get(id) {
            return file.title.clone();
        }
        self.titles.resolve(id)
    }

    /// `path_to(id)` followed by the object's own title.
    pub fn display_path(&self, id: &str) -> String {
        let parents = self.path_to(id);
        let title = self.title_of(id);
        if parents.is_empty() {
            title
        } else {
            format!("{parents}/{title}")
        }
    }

    /// The directory holding the `.xcodeproj` container.
    pub fn project_dir(&self) -> &Path {
        self.container.parent().unwrap_or(Path::new(""))
    }

    /// Where the file would be on disk if folders mirrored groups.
    pub fn absolute_path(&self, file: &FileReference) -> PathBuf {
        let mut path = self.project_dir().to_path_buf();
        let parents = self.path_to(&file.id);
        if !parents.is_empty() {
            path.push(parents);
        }
        path.push(&file.title);
        path
    }
}

#[cfg(test)]
mod tests {
    use crate::fixtures::SIMPLE;
    use crate::project::Project;
    use std::path::PathBuf;

    fn project() -> Project {
        Project::from_text("/work/App.xcodeproj", SIMPLE).unwrap()
    }

    #[test]
    fn test_parent_of() {
        let project = project();

        let parent = project.parent_of("FILE0000000000000000000A").unwrap();
        assert_eq!(parent.title, "Sources");
        let top = project.parent_of("GROUP000000000000000000A").unwrap();
        assert_eq!(top.id, "MAIN0000000000000000000A");
        assert!(project.parent_of("MAIN0000000000000000000A").is_none());
        assert!(project.parent_of("CONF0000000000000000000A").is_none());
    }

    #[test]
    fn test_path_to_excludes_main_group() {
        let project = project();

        assert_eq!(project.path_to("FILE0000000000000000000A"), "Sources");
        assert_eq!(project.path_to("GROUP000000000000000000A"), "");
        assert_eq!(project.path_to("MAIN0000000000000000000A"), "");
    }

    #[test]
    fn test_display_path() {
        let project = project();

        assert_eq!(project.display_path("GROUP000000000000000000A"), "Sources");
        assert_eq!(
            project.display_path("FILE0000000000000000000B"),
            "Sources/Second.swift"
        );
    }

    #[test]
    fn test_absolute_path() {
        let project = project();
        let file = project.file_reference("FILE0000000000000000000A").unwrap();

        assert_eq!(
            project.absolute_path(file),
            PathBuf::from("/work/Sources/First.swift")
        );
    }

    #[test]
    fn test_path_to_terminates_on_cycles() {
        let text = r#"{
            objects = {
                ROOT = { isa = PBXProject; mainGroup = MAIN; buildConfigurationList = LIST; targets = (); };
                MAIN = { isa = PBXGroup; children = (); sourceTree = "<group>"; };
                LOOPA = { isa = PBXGroup; children = (LOOPB); sourceTree = "<group>"; };
                LOOPB = { isa = PBXGroup; children = (LOOPA, FILE); sourceTree = "<group>"; };
                FILE = { isa = PBXFileReference; path = a.swift; sourceTree = "<group>"; };
            };
            rootObject = ROOT;
        }"#;
        let project = Project::from_text("App.xcodeproj", text).unwrap();

        assert_eq!(project.path_to("FILE"), "LOOPA/LOOPB");
    }
}
