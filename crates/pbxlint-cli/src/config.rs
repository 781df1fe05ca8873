//! Lint settings from `.pbxlint.json` and the command line.
//!
//! Precedence, lowest first: built-in defaults, the config file, flags.

use pbxlint_rules::{Options, ReportKind, RulesError, Validation, ALL};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Looked for in the directory that holds the `.xcodeproj`.
pub const CONFIG_FILE_NAME: &str = ".pbxlint.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Unable to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Rules(#[from] RulesError),
}

/// The config file's contents. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub report: Option<ReportKind>,
    pub validations: Option<Vec<String>>,
    pub skip_folders: Vec<String>,
    pub sort_by_name: bool,
}

impl Config {
    /// What `pbxlint init` writes.
    pub fn template() -> Self {
        Self {
            report: Some(ReportKind::Error),
            validations: Some(vec![ALL.to_string()]),
            skip_folders: Vec::new(),
            sort_by_name: false,
        }
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads `.pbxlint.json` from beside `container`, if there is one.
    pub fn discover(container: &Path) -> Result<Option<Self>, ConfigError> {
        let dir = container.parent().unwrap_or(Path::new(""));
        let path = dir.join(CONFIG_FILE_NAME);
        if !path.is_file() {
            return Ok(None);
        }
        debug!("Using config {}", path.display());
        Self::load(&path).map(Some)
    }
}

/// Lint settings given on the command line.
#[derive(Debug, Clone, Default)]
pub struct Flags {
    pub report: Option<ReportKind>,
    pub validations: Vec<String>,
    pub skip_folders: Vec<String>,
    pub sort_by_name: bool,
}

/// The merged settings a lint run uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub report: ReportKind,
    pub validations: Vec<Validation>,
    pub options: Options,
}

impl Settings {
    /// Lists from flags replace lists from the file; `sort_by_name` is on
    /// if either turns it on. No validations anywhere means all of them.
    pub fn merge(config: Config, flags: Flags) -> Result<Self, ConfigError> {
        let report = flags.report.or(config.report).unwrap_or_default();

        let names = if flags.validations.is_empty() {
            config.validations.unwrap_or_default()
        } else {
            flags.validations
        };
        let validations = if names.is_empty() {
            Validation::all().to_vec()
        } else {
            Validation::resolve(names.as_slice())?
        };

        let skip_folders = if flags.skip_folders.is_empty() {
            config.skip_folders
        } else {
            flags.skip_folders
        };

        Ok(Self {
            report,
            validations,
            options: Options {
                sort_by_name: flags.sort_by_name || config.sort_by_name,
                skip_folders,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_select_everything() {
        let settings = Settings::merge(Config::default(), Flags::default()).unwrap();
        assert_eq!(settings.report, ReportKind::Error);
        assert_eq!(settings.validations, Validation::all().to_vec());
        assert_eq!(settings.options, Options::default());
    }

    #[test]
    fn test_flags_override_config() {
        let config = Config {
            report: Some(ReportKind::Warning),
            validations: Some(vec!["empty-groups".into()]),
            skip_folders: vec!["Pods".into()],
            sort_by_name: true,
        };
        let flags = Flags {
            report: Some(ReportKind::Error),
            validations: vec!["items-in-alpha-order".into()],
            skip_folders: Vec::new(),
            sort_by_name: false,
        };

        let settings = Settings::merge(config, flags).unwrap();
        assert_eq!(settings.report, ReportKind::Error);
        assert_eq!(settings.validations, vec![Validation::ItemsInAlphaOrder]);
        assert_eq!(settings.options.skip_folders, vec!["Pods".to_string()]);
        assert!(settings.options.sort_by_name);
    }

    #[test]
    fn test_unknown_validation_is_an_error() {
        let flags = Flags {
            validations: vec!["nope".into()],
            ..Flags::default()
        };
        assert!(matches!(
            Settings::merge(Config::default(), flags),
            Err(ConfigError::Rules(_))
        ));
    }

    #[test]
    fn test_discover_reads_file_beside_container() {
        let dir = TempDir::new().unwrap();
        let container = dir.path().join("App.xcodeproj");
        assert_eq!(Config::discover(&container).unwrap(), None);

        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            r#"{ "report": "warning", "skip_folders": ["Vendor"] }"#,
        )
        .unwrap();
        let config = Config::discover(&container).unwrap().unwrap();
        assert_eq!(config.report, Some(ReportKind::Warning));
        assert_eq!(config.skip_folders, vec!["Vendor".to_string()]);
        assert!(config.validations.is_none());
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, r#"{ "reprot": "warning" }"#).unwrap();

        assert!(matches!(Config::load(&path), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_template_round_trips() {
        let json = serde_json::to_string_pretty(&Config::template()).unwrap();
        let parsed: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, Config::template());
    }
}
