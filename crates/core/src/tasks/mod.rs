//! Task registration and dispatch
//!
//! Settings register named tasks; callers run them by name. The stock
//! registry carries exactly one task, `clean`, bound to the resolved
//! build output directory.

mod clean;

pub use clean::{clean_path, CleanReport, CleanTask};

use crate::error::{Error, Result};
use crate::settings::Settings;

/// How a task run treats the filesystem
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Perform the work
    Execute,
    /// Report what would happen without touching anything
    DryRun,
}

/// Outcome of a task run
#[derive(Debug, Clone)]
pub struct TaskOutcome {
    /// Whether anything changed, or would change under dry-run
    pub changed: bool,
    /// One-line human-readable summary
    pub summary: String,
}

/// A named, runnable unit of work
pub trait Task {
    /// Name used for lookup and display
    fn name(&self) -> &'static str;

    /// One-line description for task listings
    fn description(&self) -> &'static str;

    /// Run the task
    fn run(&self, mode: RunMode) -> Result<TaskOutcome>;
}

/// Named tasks registered for a settings root
#[derive(Default)]
pub struct TaskRegistry {
    tasks: Vec<Box<dyn Task>>,
}

impl TaskRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    /// Registry with the stock tasks for the given settings
    pub fn for_settings(settings: &Settings) -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(CleanTask::new(settings.build_dir())));
        registry
    }

    /// Register a task
    pub fn register(&mut self, task: Box<dyn Task>) {
        tracing::debug!(task = task.name(), "registered task");
        self.tasks.push(task);
    }

    /// Look up a task by name
    pub fn get(&self, name: &str) -> Option<&dyn Task> {
        self.tasks
            .iter()
            .find(|task| task.name() == name)
            .map(Box::as_ref)
    }

    /// Registered tasks, in registration order
    pub fn iter(&self) -> impl Iterator<Item = &dyn Task> {
        self.tasks.iter().map(Box::as_ref)
    }

    /// Number of registered tasks
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Run a task by name
    pub fn run(&self, name: &str, mode: RunMode) -> Result<TaskOutcome> {
        let task = self
            .get(name)
            .ok_or_else(|| Error::task_not_found(name))?;
        task.run(mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use std::fs;
    use tempfile::TempDir;

    fn settings_in(dir: &TempDir) -> Settings {
        let path = dir.path().join("buildyard.toml");
        fs::write(&path, "[project]\nname = \"android\"\n").unwrap();
        Settings::load(Some(&path)).unwrap()
    }

    #[test]
    fn test_stock_registry_carries_clean() {
        let dir = TempDir::new().unwrap();
        let settings = settings_in(&dir);
        let registry = TaskRegistry::for_settings(&settings);

        assert_eq!(registry.len(), 1);
        let task = registry.get("clean").unwrap();
        assert_eq!(task.name(), "clean");
        assert!(!task.description().is_empty());
    }

    #[test]
    fn test_lookup_is_exact() {
        let dir = TempDir::new().unwrap();
        let settings = settings_in(&dir);
        let registry = TaskRegistry::for_settings(&settings);

        assert!(registry.get("clean").is_some());
        assert!(registry.get("Clean").is_none());
        assert!(registry.get("assemble").is_none());
    }

    #[test]
    fn test_running_unknown_task_fails_with_task_not_found() {
        let dir = TempDir::new().unwrap();
        let settings = settings_in(&dir);
        let registry = TaskRegistry::for_settings(&settings);

        let err = registry.run("assemble", RunMode::Execute).unwrap_err();
        assert_eq!(err.code, ErrorCode::TaskNotFound);
        assert!(err.message.contains("assemble"));
    }

    #[test]
    fn test_run_dispatches_by_name() {
        let dir = TempDir::new().unwrap();
        let settings = settings_in(&dir);
        let build = settings.build_dir();
        fs::create_dir_all(build.join("tmp")).unwrap();

        let registry = TaskRegistry::for_settings(&settings);
        let outcome = registry.run("clean", RunMode::Execute).unwrap();

        assert!(outcome.changed);
        assert!(!build.exists());
    }
}
