//! Build settings that belong in `.xcconfig` files.
//!
//! Settings typed into the build settings editor land in the project file,
//! where they are hard to review and merge. This check wants every
//! configuration's `buildSettings` empty; only the location is reported,
//! values are never inspected.

use crate::report::{Diagnostic, Report};
use pbxlint_core::BuildConfiguration;
use pbxlint_graph::Project;
use tracing::debug;

/// 1-based line of the `buildSettings` block following the first mention
/// of `id`, or `0` if there isn't one.
fn settings_line(text: &str, id: &str) -> usize {
    let mut found = false;
    for (index, line) in text.lines().enumerate() {
        if !found {
            found = line.contains(id);
        } else if line.contains("buildSettings") {
            return index + 1;
        }
    }
    0
}

/// The target a configuration belongs to, if one can be named.
///
/// A titled base `.xcconfig` reference names it directly; otherwise the
/// target whose configuration list holds this configuration.
fn owner(project: &Project, config: &BuildConfiguration) -> Option<String> {
    let base_title = config
        .base_configuration_reference
        .as_deref()
        .and_then(|base| project.titles().get(base));
    if let Some(title) = base_title {
        return Some(title.to_string());
    }

    let owns = |list_id: &str| {
        project
            .build_configuration_lists()
            .get(list_id)
            .is_some_and(|list| list.build_configurations.contains(&config.id))
    };

    project
        .native_targets()
        .values()
        .filter(|t| owns(&t.build_configuration_list))
        .map(|t| t.name.clone())
        .chain(
            project
                .legacy_targets()
                .values()
                .filter(|t| owns(&t.build_configuration_list))
                .map(|t| t.name.clone()),
        )
        .chain(
            project
                .aggregate_targets()
                .values()
                .filter(|t| owns(&t.build_configuration_list))
                .map(|t| t.name.clone()),
        )
        .next()
}

/// Reports every configuration with a non-empty settings map, in file order.
pub fn check_build_settings_externalized(project: &Project) -> Report {
    let mut diagnostics: Vec<(usize, Diagnostic)> = project
        .build_configurations()
        .values()
        .filter(|config| !config.build_settings.is_empty())
        .map(|config| {
            let line = settings_line(project.text(), &config.id);
            let message = match owner(project, config) {
                Some(target) => format!(
                    "{} ({}) has settings defined in the project file.",
                    target, config.name
                ),
                None => format!("{} has settings defined at the project level.", config.title),
            };
            (line, Diagnostic::at(project.pbxproj_path(), line, message))
        })
        .collect();

    diagnostics.sort_by_key(|(line, _)| *line);

    debug!("build-settings-externalized: {} configurations", diagnostics.len());
    Report::from_diagnostics(diagnostics.into_iter().map(|(_, d)| d).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Fixture;

    const CONFIGURATIONS: &str = r#"/* Begin PBXNativeTarget section */
		TARGET_APP /* App */ = {
			isa = PBXNativeTarget;
			buildConfigurationList = LIST_APP /* Build configuration list for PBXNativeTarget "App" */;
			buildPhases = (
			);
			name = App;
			productName = App;
		};
/* End PBXNativeTarget section */

/* Begin XCBuildConfiguration section */
		CONF_PROJECT_DEBUG /* Debug */ = {
			isa = XCBuildConfiguration;
			buildSettings = {
				ALWAYS_SEARCH_USER_PATHS = NO;
			};
			name = Debug;
		};
		CONF_APP_DEBUG /* Debug */ = {
			isa = XCBuildConfiguration;
			buildSettings = {
				PRODUCT_NAME = "$(TARGET_NAME)";
			};
			name = Debug;
		};
		CONF_APP_RELEASE /* Release */ = {
			isa = XCBuildConfiguration;
			baseConfigurationReference = XCCONFIG /* Shared.xcconfig */;
			buildSettings = {
				SWIFT_VERSION = 5.0;
			};
			name = Release;
		};
		CONF_CLEAN /* Clean */ = {
			isa = XCBuildConfiguration;
			buildSettings = {
			};
			name = Clean;
		};
/* End XCBuildConfiguration section */

/* Begin XCConfigurationList section */
		LIST_APP /* Build configuration list for PBXNativeTarget "App" */ = {
			isa = XCConfigurationList;
			buildConfigurations = (
				CONF_APP_DEBUG /* Debug */,
				CONF_APP_RELEASE /* Release */,
			);
			defaultConfigurationName = Release;
		};
/* End XCConfigurationList section */
"#;

    fn project() -> Project {
        Fixture::new()
            .main(&["XCCONFIG"])
            .file_with(
                "XCCONFIG",
                "Shared.xcconfig",
                "lastKnownFileType = text.xcconfig; path = Shared.xcconfig; sourceTree = \"<group>\";",
            )
            .raw(CONFIGURATIONS)
            .project()
    }

    #[test]
    fn test_settings_line() {
        let text = "a\nCONF = {\nisa = XCBuildConfiguration;\nbuildSettings = {\n";
        assert_eq!(settings_line(text, "CONF"), 4);
        assert_eq!(settings_line(text, "MISSING"), 0);
    }

    #[test]
    fn test_each_configuration_with_settings_is_reported() {
        let project = project();

        let report = check_build_settings_externalized(&project);
        let messages: Vec<&str> = report
            .diagnostics()
            .iter()
            .map(|d| d.message.as_str())
            .collect();
        assert_eq!(
            messages,
            vec![
                "Debug has settings defined at the project level.",
                "App (Debug) has settings defined in the project file.",
                "Shared.xcconfig (Release) has settings defined in the project file.",
            ]
        );
    }

    #[test]
    fn test_diagnostics_point_at_settings_block() {
        let project = project();

        let report = check_build_settings_externalized(&project);
        for diagnostic in report.diagnostics() {
            let location = diagnostic.location.as_ref().unwrap();
            assert_eq!(location.file, project.pbxproj_path());
            let line = project.text().lines().nth(location.line - 1).unwrap();
            assert!(line.contains("buildSettings"), "line {}: {line}", location.line);
        }
    }

    #[test]
    fn test_untitled_base_falls_back_to_target() {
        let project = Fixture::new()
            .raw(
                "/* Begin PBXNativeTarget section */\n\
                 \t\tTARGET_APP /* App */ = {isa = PBXNativeTarget; buildConfigurationList = LIST_APP; buildPhases = (); dependencies = (); name = App; };\n\
                 /* End PBXNativeTarget section */\n\
                 /* Begin XCBuildConfiguration section */\n\
                 \t\tCONF /* Debug */ = {\n\t\t\tisa = XCBuildConfiguration;\n\t\t\tbaseConfigurationReference = UNTITLED;\n\t\t\tbuildSettings = {\n\t\t\t\tSWIFT_VERSION = 5.0;\n\t\t\t};\n\t\t\tname = Debug;\n\t\t};\n\
                 /* End XCBuildConfiguration section */\n\
                 \t\tLIST_APP = {isa = XCConfigurationList; buildConfigurations = (CONF); };\n",
            )
            .project();

        let report = check_build_settings_externalized(&project);
        let messages: Vec<&str> = report
            .diagnostics()
            .iter()
            .map(|d| d.message.as_str())
            .collect();
        assert_eq!(messages, vec!["App (Debug) has settings defined in the project file."]);
    }

    #[test]
    fn test_empty_settings_pass() {
        let project = Fixture::new()
            .raw(
                "/* Begin XCBuildConfiguration section */\n\
                 \t\tCONF /* Debug */ = {\n\t\t\tisa = XCBuildConfiguration;\n\t\t\tbuildSettings = {\n\t\t\t};\n\t\t\tname = Debug;\n\t\t};\n\
                 /* End XCBuildConfiguration section */\n",
            )
            .project();

        assert_eq!(check_build_settings_externalized(&project), Report::Passed);
    }
}
