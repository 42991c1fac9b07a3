//! Buildyard CLI
//!
//! Loads the workspace build settings and runs registered tasks.

use buildyard_cli::output::{self, Status};
use buildyard_core::error::exit_codes;
use buildyard_core::policy;
use buildyard_core::settings::Settings;
use buildyard_core::tasks::{clean_path, RunMode, TaskRegistry};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "buildyard")]
#[command(about = "Build settings and task runner for the Android workspace")]
#[command(version)]
struct Cli {
    /// Settings file path
    #[arg(short, long, global = true)]
    settings: Option<PathBuf>,

    /// Increase output verbosity
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Delete the build output directory
    Clean {
        /// Report what would be removed without removing anything
        #[arg(long)]
        dry_run: bool,
    },

    /// Run a registered task by name
    Run {
        /// Task name
        task: String,
        /// Report what would happen without doing anything
        #[arg(long)]
        dry_run: bool,
    },

    /// List registered tasks
    Tasks {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the resolved settings
    Settings {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    if cli.no_color {
        owo_colors::set_override(false);
    }

    if cli.verbose > 0 {
        let filter = if cli.verbose > 1 {
            "buildyard=trace,buildyard_core=trace"
        } else {
            "buildyard=debug,buildyard_core=debug"
        };
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    let settings = match Settings::load(cli.settings.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            output::render_error(&e);
            std::process::exit(e.exit_code());
        }
    };

    for warning in &settings.warnings {
        Status::warning(&warning.to_string());
    }

    let exit_code = match cli.command {
        Commands::Clean { dry_run } => run_clean(&settings, dry_run),
        Commands::Run { task, dry_run } => run_task(&settings, &task, dry_run),
        Commands::Tasks { json } => run_tasks(&settings, json),
        Commands::Settings { json } => run_settings(&settings, json),
    };

    std::process::exit(exit_code);
}

fn run_clean(settings: &Settings, dry_run: bool) -> i32 {
    let mode = if dry_run { RunMode::DryRun } else { RunMode::Execute };
    let build_dir = settings.build_dir();

    // Same entry point the registered task runs; the direct call keeps the
    // full removal report for display.
    match clean_path(&build_dir, mode) {
        Ok(report) => {
            if !report.existed {
                Status::info(&format!(
                    "Nothing to clean: {} does not exist",
                    build_dir.display()
                ));
                return exit_codes::SUCCESS;
            }

            let what = format!(
                "{} and {} ({})",
                output::format_count(report.files, "file", "files"),
                output::format_count(report.dirs, "directory", "directories"),
                output::format_size(report.bytes),
            );
            if dry_run {
                Status::info(&format!("Would remove {} from {}", what, build_dir.display()));
            } else {
                Status::success(&format!(
                    "Removed {} from {} in {}",
                    what,
                    build_dir.display(),
                    output::format_duration(report.duration)
                ));
            }
            exit_codes::SUCCESS
        }
        Err(e) => {
            output::render_error(&e);
            e.exit_code()
        }
    }
}

fn run_task(settings: &Settings, name: &str, dry_run: bool) -> i32 {
    let mode = if dry_run { RunMode::DryRun } else { RunMode::Execute };
    let registry = TaskRegistry::for_settings(settings);

    match registry.run(name, mode) {
        Ok(outcome) => {
            if outcome.changed {
                Status::success(&outcome.summary);
            } else {
                Status::info(&outcome.summary);
            }
            exit_codes::SUCCESS
        }
        Err(e) => {
            output::render_error(&e);
            e.exit_code()
        }
    }
}

fn run_tasks(settings: &Settings, json: bool) -> i32 {
    use owo_colors::OwoColorize;

    let registry = TaskRegistry::for_settings(settings);

    if json {
        let listing: Vec<serde_json::Value> = registry
            .iter()
            .map(|task| {
                serde_json::json!({
                    "name": task.name(),
                    "description": task.description(),
                })
            })
            .collect();
        return match serde_json::to_string_pretty(&listing) {
            Ok(rendered) => {
                println!("{}", rendered);
                exit_codes::SUCCESS
            }
            Err(e) => {
                Status::error(&format!("Serialization error: {}", e));
                exit_codes::FAILURE
            }
        };
    }

    Status::header("Tasks");
    for task in registry.iter() {
        println!(
            "  {} {}",
            format!("{:<12}", task.name()).bold(),
            task.description()
        );
    }
    exit_codes::SUCCESS
}

fn run_settings(settings: &Settings, json: bool) -> i32 {
    let resolution = match policy::resolution_report(&settings.schema) {
        Ok(report) => report,
        Err(e) => {
            output::render_error(&e);
            return e.exit_code();
        }
    };

    if json {
        let payload = serde_json::json!({
            "project": settings.schema.project,
            "mode": resolution.mode,
            "plugin_repositories": resolution.plugin_repositories,
            "dependency_repositories": resolution.dependency_repositories,
            "plugins": settings.schema.plugins,
            "layout": settings.schema.layout,
            "modules": resolution.modules,
        });
        return match serde_json::to_string_pretty(&payload) {
            Ok(rendered) => {
                println!("{}", rendered);
                exit_codes::SUCCESS
            }
            Err(e) => {
                Status::error(&format!("Serialization error: {}", e));
                exit_codes::FAILURE
            }
        };
    }

    Status::header(&format!("Project '{}'", settings.schema.project.name));
    match &settings.path {
        Some(path) => output::key_value("settings", &path.display().to_string()),
        None => output::key_value("settings", "built-in defaults"),
    }
    output::key_value(
        "mode",
        &settings.schema.dependency_resolution.mode.to_string(),
    );
    output::key_value("build dir", &settings.build_dir().display().to_string());

    Status::subheader("Plugin repositories (search order)");
    for (index, repo) in resolution.plugin_repositories.iter().enumerate() {
        println!("  {}. {} ({})", index + 1, repo.name, repo.url);
    }

    Status::subheader("Dependency repositories (search order)");
    for (index, repo) in resolution.dependency_repositories.iter().enumerate() {
        println!("  {}. {} ({})", index + 1, repo.name, repo.url);
    }

    Status::subheader("Plugins");
    for pin in &settings.schema.plugins {
        println!(
            "  {} {}{}",
            pin.id,
            pin.version,
            if pin.apply { " (applied)" } else { "" }
        );
    }

    if !resolution.modules.is_empty() {
        Status::subheader("Modules");
        for module in &resolution.modules {
            if module.inherited {
                println!("  {} ({})", module.name, module.path);
            } else {
                let names: Vec<&str> =
                    module.repositories.iter().map(|r| r.name).collect();
                println!(
                    "  {} ({}) [repositories: {}]",
                    module.name,
                    module.path,
                    names.join(", ")
                );
            }
        }
    }

    exit_codes::SUCCESS
}
