//! pbxlint Graph - Project object graph
//!
//! This crate assembles decoded objects into a [`Project`] and answers the
//! structural questions validators ask of it: which group contains an
//! object, and what path a user sees for it.
//!
//! # Architecture
//!
//! Objects are stored per kind in id-ordered maps. Group containment is
//! indexed once with petgraph so parent lookups don't rescan every group.
//!
//! # Example
//!
//! ```no_run
//! use pbxlint_graph::Project;
//!
//! let project = Project::open("App.xcodeproj")?;
//! for file in project.file_references().values() {
//!     println!("{}", project.display_path(&file.id));
//! }
//! # Ok::<(), pbxlint_graph::LoadError>(())
//! ```

mod builder;
mod error;
mod hierarchy;
mod navigator;
mod project;

#[cfg(test)]
mod fixtures;

pub use builder::GraphBuilder;
pub use error::LoadError;
pub use hierarchy::Hierarchy;
pub use project::{Project, ProjectStats, PROJECT_FILE_NAME};
