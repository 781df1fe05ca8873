//! Builds small project files for validation tests.

use pbxlint_graph::Project;
use std::path::Path;

/// Accumulates objects and renders them in Xcode's layout, comments
/// included, so titles come out the way they do for real projects.
#[derive(Default)]
pub(crate) struct Fixture {
    main_children: Vec<String>,
    files: String,
    groups: String,
    others: String,
    has_main: bool,
}

impl Fixture {
    pub(crate) fn new() -> Self {
        Self {
            has_main: true,
            ..Self::default()
        }
    }

    /// Children of the main group.
    pub(crate) fn main(mut self, children: &[&str]) -> Self {
        self.main_children = children.iter().map(|c| c.to_string()).collect();
        self
    }

    /// Points `mainGroup` at an id that is not a group.
    pub(crate) fn without_main(mut self) -> Self {
        self.has_main = false;
        self
    }

    /// A Swift source whose path is its title.
    pub(crate) fn file(self, id: &str, title: &str) -> Self {
        let attrs = format!(
            "lastKnownFileType = sourcecode.swift; path = \"{title}\"; sourceTree = \"<group>\";"
        );
        self.file_with(id, title, &attrs)
    }

    /// A file reference with exactly the given attributes.
    pub(crate) fn file_with(mut self, id: &str, title: &str, attrs: &str) -> Self {
        self.files.push_str(&format!(
            "\t\t{id} /* {title} */ = {{isa = PBXFileReference; {attrs} }};\n"
        ));
        self
    }

    /// A group; `extra` is spliced in verbatim, e.g. `path = Sources;`.
    pub(crate) fn group(mut self, id: &str, title: &str, children: &[&str], extra: &str) -> Self {
        let mut text = format!("\t\t{id} /* {title} */ = {{\n\t\t\tisa = PBXGroup;\n\t\t\tchildren = (\n");
        for child in children {
            text.push_str(&format!("\t\t\t\t{child},\n"));
        }
        text.push_str(&format!(
            "\t\t\t);\n\t\t\t{extra}\n\t\t\tsourceTree = \"<group>\";\n\t\t}};\n"
        ));
        self.groups.push_str(&text);
        self
    }

    /// A build file pointing at `file_ref`.
    pub(crate) fn build_file(self, id: &str, file_ref: &str) -> Self {
        self.raw(&format!(
            "\t\t{id} /* in Sources */ = {{isa = PBXBuildFile; fileRef = {file_ref}; }};\n"
        ))
    }

    /// Arbitrary object text, sections and all.
    pub(crate) fn raw(mut self, text: &str) -> Self {
        self.others.push_str(text);
        self
    }

    pub(crate) fn text(&self) -> String {
        let main_group = if self.has_main { "MAIN" } else { "NOWHERE" };
        let main_children: String = self
            .main_children
            .iter()
            .map(|child| format!("\t\t\t\t{child},\n"))
            .collect();

        format!(
            "// !$*UTF8*$!\n{{\n\tarchiveVersion = 1;\n\tobjectVersion = 50;\n\tobjects = {{\n\
             /* Begin PBXFileReference section */\n{files}/* End PBXFileReference section */\n\
             /* Begin PBXGroup section */\n\
             \t\tMAIN = {{\n\t\t\tisa = PBXGroup;\n\t\t\tchildren = (\n{main_children}\t\t\t);\n\t\t\tsourceTree = \"<group>\";\n\t\t}};\n\
             {groups}/* End PBXGroup section */\n\
             {others}\
             \t\tROOT /* Project object */ = {{isa = PBXProject; buildConfigurationList = LIST; mainGroup = {main_group}; targets = (); }};\n\
             \t}};\n\trootObject = ROOT /* Project object */;\n}}\n",
            files = self.files,
            groups = self.groups,
            others = self.others,
        )
    }

    /// Loads the fixture as if stored at `/work/App.xcodeproj`.
    pub(crate) fn project(&self) -> Project {
        self.project_in(Path::new("/work"))
    }

    /// Loads the fixture as if stored at `<dir>/App.xcodeproj`.
    pub(crate) fn project_in(&self, dir: &Path) -> Project {
        Project::from_text(dir.join("App.xcodeproj"), self.text()).unwrap()
    }
}
