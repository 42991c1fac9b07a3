//! Settings schema definitions
//!
//! Every section is optional; the defaults reproduce the stock Android
//! workspace settings (vendor repository first, central policy mode
//! `fail-on-project-repos`, the Android and Kotlin plugin pins, build output
//! under `build/`).

use crate::plugin::PluginPin;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Root settings schema
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsSchema {
    #[serde(default)]
    pub project: ProjectConfig,

    #[serde(default)]
    pub plugin_management: PluginManagementConfig,

    #[serde(default)]
    pub dependency_resolution: DependencyResolutionConfig,

    #[serde(default = "default_plugins")]
    pub plugins: Vec<PluginPin>,

    #[serde(default)]
    pub layout: LayoutConfig,

    #[serde(default)]
    pub modules: Vec<ModuleConfig>,
}

// Derived Default would give an empty plugin list; the built-in defaults
// must match what an empty settings file parses to.
impl Default for SettingsSchema {
    fn default() -> Self {
        Self {
            project: ProjectConfig::default(),
            plugin_management: PluginManagementConfig::default(),
            dependency_resolution: DependencyResolutionConfig::default(),
            plugins: default_plugins(),
            layout: LayoutConfig::default(),
            modules: Vec::new(),
        }
    }
}

/// Root project configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Root project name
    #[serde(default = "default_project_name")]
    pub name: String,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: default_project_name(),
        }
    }
}

/// Plugin resolution configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginManagementConfig {
    /// Repositories searched during plugin resolution, in declaration order
    #[serde(default = "default_plugin_repositories")]
    pub repositories: Vec<String>,
}

impl Default for PluginManagementConfig {
    fn default() -> Self {
        Self {
            repositories: default_plugin_repositories(),
        }
    }
}

/// Central dependency-resolution configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DependencyResolutionConfig {
    /// Policy for module-level repository declarations
    #[serde(default)]
    pub mode: RepositoriesMode,

    /// Repositories searched during dependency resolution, in declaration order
    #[serde(default = "default_dependency_repositories")]
    pub repositories: Vec<String>,
}

impl Default for DependencyResolutionConfig {
    fn default() -> Self {
        Self {
            mode: RepositoriesMode::default(),
            repositories: default_dependency_repositories(),
        }
    }
}

/// Policy for module-level repository declarations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RepositoriesMode {
    /// Module declarations take precedence over the central list
    PreferProject,
    /// Module declarations are ignored with a warning
    PreferSettings,
    /// Module declarations are a load-time error
    FailOnProjectRepos,
}

impl Default for RepositoriesMode {
    fn default() -> Self {
        RepositoriesMode::FailOnProjectRepos
    }
}

impl fmt::Display for RepositoriesMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RepositoriesMode::PreferProject => "prefer-project",
            RepositoriesMode::PreferSettings => "prefer-settings",
            RepositoriesMode::FailOnProjectRepos => "fail-on-project-repos",
        };
        write!(f, "{}", s)
    }
}

/// Project layout configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Build output directory, relative to the settings root
    #[serde(default = "default_build_dir")]
    pub build_dir: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            build_dir: default_build_dir(),
        }
    }
}

/// A subproject of the root project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleConfig {
    /// Module name
    pub name: String,

    /// Module directory, relative to the settings root (defaults to the name)
    #[serde(default)]
    pub path: Option<String>,

    /// Module-level repository declarations, governed by the central mode
    #[serde(default)]
    pub repositories: Vec<String>,
}

impl ModuleConfig {
    /// Directory of the module relative to the settings root
    pub fn relative_path(&self) -> &str {
        self.path.as_deref().unwrap_or(&self.name)
    }
}

fn default_project_name() -> String {
    "android".to_string()
}

fn default_plugin_repositories() -> Vec<String> {
    vec!["google", "maven-central", "gradle-plugin-portal"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_dependency_repositories() -> Vec<String> {
    vec!["google", "maven-central"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_build_dir() -> String {
    "build".to_string()
}

fn default_plugins() -> Vec<PluginPin> {
    vec![
        PluginPin::new("com.android.application", "8.11.1"),
        PluginPin::new("org.jetbrains.kotlin.android", "2.2.20"),
    ]
}
