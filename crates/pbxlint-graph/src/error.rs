//! Errors raised while loading a project.

use pbxlint_core::CoreError;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Everything that stops a project from being loaded.
///
/// Any of these aborts before a single validation runs; there is no
/// graph to validate.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Unable to read the project file {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unable to convert the project file {} into a String", .0.display())]
    NotUtf8(PathBuf),

    #[error(transparent)]
    Decode(#[from] CoreError),

    #[error("Project file has no 'objects' table")]
    MissingObjects,

    #[error("Project file has no 'rootObject'")]
    MissingRootObject,

    #[error("Root object {0} is not a PBXProject")]
    RootNotProject(String),
}

impl LoadError {
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Unreadable {
            path: path.to_path_buf(),
            source,
        }
    }
}
