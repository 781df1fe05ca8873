//! CLI command implementations.

use crate::config::{Config, Flags, Settings, CONFIG_FILE_NAME};
use colored::Colorize;
use pbxlint_graph::{Project, ProjectStats, PROJECT_FILE_NAME};
use pbxlint_rules::{Report, Validation, ALL, EX_DATAERR, EX_OK};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Set by Xcode for a run-script phase's first declared output file.
const STAMP_VARIABLE: &str = "SCRIPT_OUTPUT_FILE_0";

/// Accepts either the `.xcodeproj` directory or the `project.pbxproj` in it.
fn container_of(path: &Path) -> &Path {
    match (path.file_name(), path.parent()) {
        (Some(name), Some(parent)) if name == PROJECT_FILE_NAME => parent,
        _ => path,
    }
}

/// Write a default `.pbxlint.json`.
pub fn init(path: &Path, force: bool) -> Result<()> {
    let config_path = path.join(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        println!("{} Already initialized", "✓".green());
        println!("  Pass {} to overwrite {}", "--force".cyan(), config_path.display());
        return Ok(());
    }

    fs::create_dir_all(path)?;
    let mut text = serde_json::to_string_pretty(&Config::template())?;
    text.push('\n');
    fs::write(&config_path, text)?;

    println!("{} Wrote {}", "✓".green(), config_path.display());
    println!("  Run {} to lint your project", "pbxlint lint App.xcodeproj".cyan());

    Ok(())
}

/// Print every validation with a short description.
pub fn list() -> Result<()> {
    println!("{}", "Validations".cyan().bold());
    println!();
    for validation in Validation::all() {
        println!(
            "  {} {}",
            format!("{:<32}", validation.name()).yellow(),
            validation.description()
        );
    }
    println!("  {} Runs every validation", format!("{ALL:<32}").yellow());

    Ok(())
}

/// Folds one report's status into the run's: invalid input beats failure,
/// failure beats success.
fn combine(status: i32, next: i32) -> i32 {
    if status == EX_DATAERR || next == EX_DATAERR {
        EX_DATAERR
    } else {
        status.max(next)
    }
}

fn touch_stamp(output: &Path) {
    println!("Touching {}", output.display());
    if let Err(e) = fs::write(output, "OK") {
        warn!("Unable to write {}: {}", output.display(), e);
    }
}

/// Lint a project and return the process exit status.
///
/// Diagnostics go to stderr in the shape Xcode and most editors parse.
/// A clean run writes the stamp file Xcode names in `SCRIPT_OUTPUT_FILE_0`.
pub fn lint(project_path: &Path, flags: Flags, config_path: Option<&Path>) -> Result<i32> {
    let stamp = std::env::var_os(STAMP_VARIABLE).map(PathBuf::from);
    lint_with_stamp(project_path, flags, config_path, stamp.as_deref())
}

fn lint_with_stamp(
    project_path: &Path,
    flags: Flags,
    config_path: Option<&Path>,
    stamp: Option<&Path>,
) -> Result<i32> {
    let container = container_of(project_path);

    let config = match config_path {
        Some(path) => Config::load(path)?,
        None => Config::discover(container)?.unwrap_or_default(),
    };
    let settings = Settings::merge(config, flags)?;
    let kind = settings.report;

    let project = match Project::open(container) {
        Ok(project) => project,
        Err(e) => {
            eprintln!("{}:0: {} {}", container.display(), kind.log_entry(), e);
            return Ok(EX_DATAERR);
        }
    };

    let mut status = EX_OK;
    let mut failed = 0;
    for validation in &settings.validations {
        let report = validation.run(&project, &settings.options);
        match &report {
            Report::InvalidInput => {
                warn!("{} skipped: {} has no main group", validation, project.name());
            }
            Report::Failed(diagnostics) => {
                failed += 1;
                for diagnostic in diagnostics {
                    eprintln!("{}", diagnostic.render(kind));
                }
            }
            Report::Passed => debug!("{} passed", validation),
        }
        status = combine(status, report.exit_code(kind));
    }

    info!(
        "{}: {} of {} validations failed",
        project.name(),
        failed,
        settings.validations.len()
    );

    if let (EX_OK, Some(stamp)) = (status, stamp) {
        touch_stamp(stamp);
    }

    Ok(status)
}

#[derive(Serialize)]
struct Export<'a> {
    version: &'static str,
    stats: ProjectStats,
    project: &'a Project,
}

/// Export the decoded project as JSON.
pub fn export(project_path: &Path, output: Option<&Path>) -> Result<()> {
    let project = Project::open(container_of(project_path))?;

    let export = Export {
        version: env!("CARGO_PKG_VERSION"),
        stats: project.stats(),
        project: &project,
    };
    let json = serde_json::to_string_pretty(&export)?;

    match output {
        Some(path) => {
            fs::write(path, json)?;
            println!("{} Exported to {}", "✓".green(), path.display());
        }
        None => println!("{json}"),
    }

    Ok(())
}
