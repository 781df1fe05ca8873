//! Project text shared by the tests in this crate.

/// Main group → `Sources` → `First.swift` (built) and `Second.swift` (not built).
pub(crate) const SIMPLE: &str = r#"// !$*UTF8*$!
{
	archiveVersion = 1;
	classes = {
	};
	objectVersion = 50;
	objects = {

/* Begin PBXBuildFile section */
		BUILD000000000000000000A /* First.swift in Sources */ = {isa = PBXBuildFile; fileRef = FILE0000000000000000000A /* First.swift */; };
/* End PBXBuildFile section */

/* Begin PBXFileReference section */
		FILE0000000000000000000A /* First.swift */ = {isa = PBXFileReference; lastKnownFileType = sourcecode.swift; path = First.swift; sourceTree = "<group>"; };
		FILE0000000000000000000B /* Second.swift */ = {isa = PBXFileReference; lastKnownFileType = sourcecode.swift; path = Second.swift; sourceTree = "<group>"; };
/* End PBXFileReference section */

/* Begin PBXGroup section */
		MAIN0000000000000000000A = {
			isa = PBXGroup;
			children = (
				GROUP000000000000000000A /* Sources */,
			);
			sourceTree = "<group>";
		};
		GROUP000000000000000000A /* Sources */ = {
			isa = PBXGroup;
			children = (
				FILE0000000000000000000A /* First.swift */,
				FILE0000000000000000000B /* Second.swift */,
			);
			path = Sources;
			sourceTree = "<group>";
		};
/* End PBXGroup section */

/* Begin PBXProject section */
		ROOT0000000000000000000A /* Project object */ = {
			isa = PBXProject;
			buildConfigurationList = LIST0000000000000000000A /* Build configuration list for PBXProject "App" */;
			compatibilityVersion = "Xcode 9.3";
			developmentRegion = en;
			hasScannedForEncodings = 0;
			knownRegions = (
				en,
			);
			mainGroup = MAIN0000000000000000000A;
			projectDirPath = "";
			projectRoot = "";
			targets = (
			);
		};
/* End PBXProject section */

/* Begin XCBuildConfiguration section */
		CONF0000000000000000000A /* Debug */ = {
			isa = XCBuildConfiguration;
			buildSettings = {
			};
			name = Debug;
		};
/* End XCBuildConfiguration section */

/* Begin XCConfigurationList section */
		LIST0000000000000000000A /* Build configuration list for PBXProject "App" */ = {
			isa = XCConfigurationList;
			buildConfigurations = (
				CONF0000000000000000000A /* Debug */,
			);
			defaultConfigurationIsVisible = 0;
			defaultConfigurationName = Debug;
		};
/* End XCConfigurationList section */
	};
	rootObject = ROOT0000000000000000000A /* Project object */;
}
"#;
