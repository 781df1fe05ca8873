//! pbxlint CLI - Command-line interface for pbxlint
//!
//! This is the entry point for linting Xcode projects, usually from a
//! run-script build phase or CI.

use clap::{Parser, Subcommand};
use colored::Colorize;
use pbxlint_rules::ReportKind;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "pbxlint")]
#[command(author = "pbxlint Contributors")]
#[command(version)]
#[command(about = "A linter for Xcode project files", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default .pbxlint.json
    Init {
        /// Directory to write into (defaults to current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Overwrite an existing config
        #[arg(long)]
        force: bool,
    },

    /// Run validations against a project
    Lint {
        /// The .xcodeproj to lint
        project: PathBuf,

        /// Either 'error' or 'warning'
        #[arg(short, long)]
        report: Option<ReportKind>,

        /// Validations to run, or 'all' (see `pbxlint list`)
        #[arg(long, num_args = 1.., value_delimiter = ',')]
        validations: Vec<String>,

        /// Top-level group names to leave out of layout and ordering checks
        #[arg(long, num_args = 1.., value_delimiter = ',')]
        skip_folders: Vec<String>,

        /// Sort groups and files together instead of groups first
        #[arg(long)]
        sort_by_name: bool,

        /// Config file (defaults to .pbxlint.json beside the project)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Export the decoded project to JSON
    Export {
        /// The .xcodeproj to export
        project: PathBuf,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List available validations
    List,
}

fn main() {
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(tracing_subscriber::EnvFilter::new(filter))
        .init();

    let result = match cli.command {
        Commands::Init { path, force } => commands::init(&path, force).map(|()| 0),
        Commands::Lint {
            project,
            report,
            validations,
            skip_folders,
            sort_by_name,
            config,
        } => {
            let flags = config::Flags {
                report,
                validations,
                skip_folders,
                sort_by_name,
            };
            commands::lint(&project, flags, config.as_deref())
        }
        Commands::Export { project, output } => {
            commands::export(&project, output.as_deref()).map(|()| 0)
        }
        Commands::List => commands::list().map(|()| 0),
    };

    match result {
        Ok(status) => std::process::exit(status),
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            std::process::exit(1);
        }
    }
}
