//! pbxlint Core - Project file decoding
//!
//! This crate turns the text of an Xcode `project.pbxproj` into typed
//! objects. The file is two overlapping encodings of the same ids: a
//! property list that carries the structure, and comments beside each id
//! that carry the names a user sees. Both are read here, separately:
//!
//! - [`plist::decode`] parses the property list and drops comments
//! - [`Titles::extract`] scans the raw lines and recovers the names
//! - [`Object::decode`] combines one `objects` entry with the titles
//!
//! # Example
//!
//! ```
//! use pbxlint_core::{plist, Object, Titles};
//!
//! let text = "{ isa = PBXGroup; children = (); sourceTree = \"<group>\"; }";
//! let value = plist::decode(text).unwrap();
//! let object = Object::decode("ABC123", &value, &Titles::new()).unwrap();
//! assert_eq!(object.isa(), "PBXGroup");
//! ```

pub mod error;
mod fields;
pub mod node;
pub mod plist;
pub mod titles;

pub use error::{CoreError, Result};
pub use node::{
    AggregateTarget, BuildConfiguration, BuildConfigurationList, BuildFile, BuildPhase,
    ContainerItemProxy, FileReference, Formatting, Group, LegacyTarget, NativeTarget, Object,
    PhaseKind, ProjectRoot, TargetDependency, UnknownObject, VariantGroup,
};
pub use plist::{Dictionary, PlistValue};
pub use titles::Titles;
