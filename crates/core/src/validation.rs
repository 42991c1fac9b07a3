//! Settings validation
//!
//! Validates a parsed [`SettingsSchema`](crate::settings::SettingsSchema)
//! before it is handed to callers: repository names must resolve, the
//! repository mode governs module-level declarations, plugin pins must be
//! well-formed, and the build directory must be a sane delete target.
//!
//! Errors fail loading; warnings are retained for display.

use crate::error::{Error, ErrorCode, Result};
use crate::plugin::PluginPin;
use crate::repository::{self, Repository};
use crate::settings::{LayoutConfig, RepositoriesMode, SettingsSchema};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// A single validation finding
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationError {
    /// Settings field that failed validation
    pub field: String,
    /// Error message
    pub message: String,
    /// Error code
    pub code: String,
    /// Expected value (if applicable)
    pub expected: Option<String>,
    /// Actual value (if applicable)
    pub actual: Option<String>,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validation outcome: blocking errors plus non-blocking warnings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationResult {
    errors: Vec<ValidationError>,
    warnings: Vec<ValidationError>,
}

impl ValidationResult {
    /// Create a new empty result
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if validation passed
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get all errors
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Get all warnings
    pub fn warnings(&self) -> &[ValidationError] {
        &self.warnings
    }

    /// Add an error
    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Add a warning
    pub fn add_warning(&mut self, warning: ValidationError) {
        self.warnings.push(warning);
    }

    /// Merge another result into this one
    pub fn merge(&mut self, other: ValidationResult) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }

    /// Convert to a Result
    pub fn to_result(self) -> Result<()> {
        if self.is_valid() {
            Ok(())
        } else {
            let messages: Vec<String> = self.errors.iter().map(|e| e.to_string()).collect();
            Err(Error::new(
                ErrorCode::SettingsValidationError,
                format!("Settings validation failed: {}", messages.join("; ")),
            ))
        }
    }
}

/// Validate an entire settings schema
pub fn validate_settings(schema: &SettingsSchema) -> ValidationResult {
    let mut result = ValidationResult::new();
    result.merge(validate_central_repositories(schema));
    result.merge(validate_module_repositories(schema));
    result.merge(validate_plugins(&schema.plugins));
    result.merge(validate_modules(schema));
    result.merge(validate_layout(&schema.layout));
    result
}

/// Check the central plugin and dependency repository lists
fn validate_central_repositories(schema: &SettingsSchema) -> ValidationResult {
    let mut result = ValidationResult::new();

    check_repository_names(
        &mut result,
        "plugin_management.repositories",
        &schema.plugin_management.repositories,
        true,
    );
    check_repository_names(
        &mut result,
        "dependency_resolution.repositories",
        &schema.dependency_resolution.repositories,
        false,
    );

    if schema.plugin_management.repositories.is_empty() {
        result.add_warning(ValidationError {
            field: "plugin_management.repositories".to_string(),
            message: "No repositories declared; plugins cannot be resolved".to_string(),
            code: "EMPTY_REPOSITORIES".to_string(),
            expected: None,
            actual: None,
        });
    }
    if schema.dependency_resolution.repositories.is_empty() {
        result.add_warning(ValidationError {
            field: "dependency_resolution.repositories".to_string(),
            message: "No repositories declared; dependencies cannot be resolved".to_string(),
            code: "EMPTY_REPOSITORIES".to_string(),
            expected: None,
            actual: None,
        });
    }

    result
}

/// Enforce the repositories mode against module-level declarations
fn validate_module_repositories(schema: &SettingsSchema) -> ValidationResult {
    let mut result = ValidationResult::new();
    let mode = schema.dependency_resolution.mode;

    for module in &schema.modules {
        if module.repositories.is_empty() {
            continue;
        }
        let field = format!("modules.{}.repositories", module.name);

        match mode {
            RepositoriesMode::FailOnProjectRepos => {
                result.add_error(ValidationError {
                    field,
                    message: format!(
                        "Module '{}' declares repositories but the mode is {}",
                        module.name, mode
                    ),
                    code: "PROJECT_REPOSITORIES_FORBIDDEN".to_string(),
                    expected: Some("no module-level repositories".to_string()),
                    actual: Some(module.repositories.join(", ")),
                });
            }
            RepositoriesMode::PreferSettings => {
                result.add_warning(ValidationError {
                    field,
                    message: format!(
                        "Module '{}' declares repositories; ignored under {}",
                        module.name, mode
                    ),
                    code: "PROJECT_REPOSITORIES_IGNORED".to_string(),
                    expected: None,
                    actual: Some(module.repositories.join(", ")),
                });
            }
            RepositoriesMode::PreferProject => {
                check_repository_names(&mut result, &field, &module.repositories, false);
            }
        }
    }

    result
}

/// Check plugin pins for shape and duplicates
fn validate_plugins(plugins: &[PluginPin]) -> ValidationResult {
    let mut result = ValidationResult::new();
    let mut seen: HashSet<&str> = HashSet::new();

    for pin in plugins {
        let field = format!("plugins.{}", pin.id);

        if !pin.id_is_valid() {
            result.add_error(ValidationError {
                field: field.clone(),
                message: "Plugin id must be a reverse-DNS identifier".to_string(),
                code: "INVALID_PLUGIN_ID".to_string(),
                expected: Some("e.g. com.android.application".to_string()),
                actual: Some(pin.id.clone()),
            });
        }
        if !pin.version_is_valid() {
            result.add_error(ValidationError {
                field: field.clone(),
                message: "Plugin version must be a dotted release version".to_string(),
                code: "INVALID_PLUGIN_VERSION".to_string(),
                expected: Some("e.g. 8.11.1".to_string()),
                actual: Some(pin.version.clone()),
            });
        }
        if !seen.insert(pin.id.as_str()) {
            result.add_error(ValidationError {
                field,
                message: format!("Plugin '{}' is pinned more than once", pin.id),
                code: "DUPLICATE_PLUGIN".to_string(),
                expected: None,
                actual: Some(pin.version.clone()),
            });
        }
    }

    result
}

/// Check module declarations for shape and duplicates
fn validate_modules(schema: &SettingsSchema) -> ValidationResult {
    let mut result = ValidationResult::new();
    let mut seen: HashSet<&str> = HashSet::new();

    for module in &schema.modules {
        if module.name.trim().is_empty() {
            result.add_error(ValidationError {
                field: "modules.name".to_string(),
                message: "Module name is required".to_string(),
                code: "REQUIRED".to_string(),
                expected: Some("non-empty name".to_string()),
                actual: Some("empty".to_string()),
            });
            continue;
        }
        if !seen.insert(module.name.as_str()) {
            result.add_error(ValidationError {
                field: format!("modules.{}", module.name),
                message: format!("Module '{}' is declared more than once", module.name),
                code: "DUPLICATE_MODULE".to_string(),
                expected: None,
                actual: None,
            });
        }
    }

    result
}

/// Check that the build directory is a sane delete target
fn validate_layout(layout: &LayoutConfig) -> ValidationResult {
    let mut result = ValidationResult::new();
    let build_dir = layout.build_dir.as_str();

    if build_dir.trim().is_empty() {
        result.add_error(ValidationError {
            field: "layout.build_dir".to_string(),
            message: "Build directory is required".to_string(),
            code: "REQUIRED".to_string(),
            expected: Some("relative directory name".to_string()),
            actual: Some("empty".to_string()),
        });
        return result;
    }

    // The clean task deletes this path recursively; refuse anything that
    // could escape the settings root.
    if build_dir.split(['/', '\\']).any(|part| part == "..") {
        result.add_error(ValidationError {
            field: "layout.build_dir".to_string(),
            message: "Path traversal not allowed in the build directory".to_string(),
            code: "PATH_TRAVERSAL".to_string(),
            expected: None,
            actual: Some(build_dir.to_string()),
        });
    }

    if Path::new(build_dir).is_absolute() {
        result.add_warning(ValidationError {
            field: "layout.build_dir".to_string(),
            message: "Absolute build directory; clean will delete outside the settings root"
                .to_string(),
            code: "ABSOLUTE_PATH".to_string(),
            expected: None,
            actual: Some(build_dir.to_string()),
        });
    }

    result
}

fn check_repository_names(
    result: &mut ValidationResult,
    field: &str,
    names: &[String],
    plugin_resolution: bool,
) {
    let mut seen: HashSet<&str> = HashSet::new();

    for name in names {
        match Repository::resolve(name) {
            None => {
                result.add_error(ValidationError {
                    field: field.to_string(),
                    message: format!("Unknown repository: {}", name),
                    code: "UNKNOWN_REPOSITORY".to_string(),
                    expected: Some(repository::known_names().join(", ")),
                    actual: Some(name.clone()),
                });
            }
            Some(repo) if repo.plugin_only && !plugin_resolution => {
                result.add_error(ValidationError {
                    field: field.to_string(),
                    message: format!(
                        "Repository '{}' serves plugin resolution only",
                        name
                    ),
                    code: "PLUGIN_ONLY_REPOSITORY".to_string(),
                    expected: None,
                    actual: Some(name.clone()),
                });
            }
            Some(_) => {}
        }
        if !seen.insert(name.as_str()) {
            result.add_warning(ValidationError {
                field: field.to_string(),
                message: format!("Repository '{}' is declared more than once", name),
                code: "DUPLICATE_REPOSITORY".to_string(),
                expected: None,
                actual: Some(name.clone()),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::ModuleConfig;

    fn module(name: &str, repositories: &[&str]) -> ModuleConfig {
        ModuleConfig {
            name: name.to_string(),
            path: None,
            repositories: repositories.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_default_schema_is_valid() {
        let result = validate_settings(&SettingsSchema::default());
        assert!(result.is_valid());
        assert!(result.warnings().is_empty());
    }

    #[test]
    fn test_unknown_repository_rejected() {
        let mut schema = SettingsSchema::default();
        schema
            .dependency_resolution
            .repositories
            .push("jcenter".to_string());

        let result = validate_settings(&schema);
        assert!(!result.is_valid());
        assert_eq!(result.errors()[0].code, "UNKNOWN_REPOSITORY");
        assert!(result.errors()[0]
            .expected
            .as_deref()
            .unwrap()
            .contains("maven-central"));
    }

    #[test]
    fn test_portal_forbidden_for_dependency_resolution() {
        let mut schema = SettingsSchema::default();
        schema
            .dependency_resolution
            .repositories
            .push("gradle-plugin-portal".to_string());

        let result = validate_settings(&schema);
        assert!(!result.is_valid());
        assert_eq!(result.errors()[0].code, "PLUGIN_ONLY_REPOSITORY");
    }

    #[test]
    fn test_portal_allowed_for_plugin_resolution() {
        let result = validate_settings(&SettingsSchema::default());
        assert!(result.is_valid());
    }

    #[test]
    fn test_fail_on_project_repos_rejects_module_repositories() {
        let mut schema = SettingsSchema::default();
        schema.modules.push(module("app", &["google"]));

        let result = validate_settings(&schema);
        assert!(!result.is_valid());
        assert_eq!(result.errors()[0].code, "PROJECT_REPOSITORIES_FORBIDDEN");
        assert!(result.errors()[0].message.contains("app"));
    }

    #[test]
    fn test_prefer_settings_warns_and_passes() {
        let mut schema = SettingsSchema::default();
        schema.dependency_resolution.mode = RepositoriesMode::PreferSettings;
        schema.modules.push(module("app", &["google"]));

        let result = validate_settings(&schema);
        assert!(result.is_valid());
        assert_eq!(result.warnings()[0].code, "PROJECT_REPOSITORIES_IGNORED");
    }

    #[test]
    fn test_prefer_project_validates_module_names() {
        let mut schema = SettingsSchema::default();
        schema.dependency_resolution.mode = RepositoriesMode::PreferProject;
        schema.modules.push(module("app", &["not-a-repo"]));

        let result = validate_settings(&schema);
        assert!(!result.is_valid());
        assert_eq!(result.errors()[0].code, "UNKNOWN_REPOSITORY");
    }

    #[test]
    fn test_modules_without_repositories_are_fine() {
        let mut schema = SettingsSchema::default();
        schema.modules.push(module("app", &[]));

        let result = validate_settings(&schema);
        assert!(result.is_valid());
        assert!(result.warnings().is_empty());
    }

    #[test]
    fn test_duplicate_plugin_rejected() {
        let mut schema = SettingsSchema::default();
        schema
            .plugins
            .push(crate::plugin::PluginPin::new("com.android.application", "9.0.0"));

        let result = validate_settings(&schema);
        assert!(!result.is_valid());
        assert_eq!(result.errors()[0].code, "DUPLICATE_PLUGIN");
    }

    #[test]
    fn test_bad_plugin_shape_rejected() {
        let mut schema = SettingsSchema::default();
        schema.plugins.push(crate::plugin::PluginPin::new("app", "latest"));

        let result = validate_settings(&schema);
        let codes: Vec<&str> = result.errors().iter().map(|e| e.code.as_str()).collect();
        assert!(codes.contains(&"INVALID_PLUGIN_ID"));
        assert!(codes.contains(&"INVALID_PLUGIN_VERSION"));
    }

    #[test]
    fn test_duplicate_module_rejected() {
        let mut schema = SettingsSchema::default();
        schema.modules.push(module("app", &[]));
        schema.modules.push(module("app", &[]));

        let result = validate_settings(&schema);
        assert!(!result.is_valid());
        assert_eq!(result.errors()[0].code, "DUPLICATE_MODULE");
    }

    #[test]
    fn test_build_dir_traversal_rejected() {
        let mut schema = SettingsSchema::default();
        schema.layout.build_dir = "../elsewhere".to_string();

        let result = validate_settings(&schema);
        assert!(!result.is_valid());
        assert_eq!(result.errors()[0].code, "PATH_TRAVERSAL");
    }

    #[test]
    fn test_absolute_build_dir_warns() {
        let mut schema = SettingsSchema::default();
        schema.layout.build_dir = "/tmp/out".to_string();

        let result = validate_settings(&schema);
        assert!(result.is_valid());
        assert_eq!(result.warnings()[0].code, "ABSOLUTE_PATH");
    }

    #[test]
    fn test_duplicate_repository_warns() {
        let mut schema = SettingsSchema::default();
        schema
            .dependency_resolution
            .repositories
            .push("google".to_string());

        let result = validate_settings(&schema);
        assert!(result.is_valid());
        assert_eq!(result.warnings()[0].code, "DUPLICATE_REPOSITORY");
    }

    #[test]
    fn test_to_result_error_carries_module_name() {
        let mut schema = SettingsSchema::default();
        schema.modules.push(module("feature-auth", &["google"]));

        let err = validate_settings(&schema).to_result().unwrap_err();
        assert_eq!(err.code, ErrorCode::SettingsValidationError);
        assert!(err.message.contains("feature-auth"));
    }
}
