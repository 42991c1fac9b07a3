//! Core library for the Buildyard build settings tool
//!
//! This crate owns everything below the command line:
//!
//! - **Settings**: TOML settings discovery, parsing, and fail-fast validation
//! - **Repositories**: the well-known artifact repositories and the search
//!   order policies that govern plugin and dependency resolution
//! - **Plugins**: pinned build plugin declarations
//! - **Tasks**: named task registration and the `clean` task
//! - **Error handling**: structured errors with codes, context, and recovery
//!   suggestions
//!
//! # Example
//!
//! ```rust,no_run
//! use buildyard_core::settings::Settings;
//! use buildyard_core::tasks::{RunMode, TaskRegistry};
//!
//! let settings = Settings::load(None).expect("Invalid settings");
//! let registry = TaskRegistry::for_settings(&settings);
//!
//! let outcome = registry.run("clean", RunMode::Execute).expect("Clean failed");
//! println!("{}", outcome.summary);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod plugin;
pub mod policy;
pub mod repository;
pub mod settings;
pub mod tasks;
pub mod validation;

pub use error::{Error, ErrorCode, Result, ResultExt};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::error::{exit_codes, Error, ErrorCode, Result, ResultExt};
    pub use crate::plugin::PluginPin;
    pub use crate::policy::{resolution_report, ResolutionReport};
    pub use crate::repository::Repository;
    pub use crate::settings::{RepositoriesMode, Settings, SettingsSchema};
    pub use crate::tasks::{CleanReport, RunMode, Task, TaskRegistry};
    pub use crate::validation::{validate_settings, ValidationResult};
}
