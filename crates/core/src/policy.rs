//! Effective repository resolution
//!
//! Pure functions over a validated schema computing the repository search
//! order that external resolution collaborators consume. Order always
//! follows declaration order.

use crate::error::{Error, ErrorCode, Result};
use crate::repository::Repository;
use crate::settings::{RepositoriesMode, SettingsSchema};
use serde::Serialize;

/// Fully resolved repository orders for a schema
///
/// Collects every list a consumer of the effective configuration needs in
/// one serializable value, with declared names expanded to full
/// repository entries.
#[derive(Debug, Clone, Serialize)]
pub struct ResolutionReport {
    /// Mode governing module-level declarations
    pub mode: RepositoriesMode,
    /// Plugin search order
    pub plugin_repositories: Vec<Repository>,
    /// Central dependency search order
    pub dependency_repositories: Vec<Repository>,
    /// Effective repositories per declared module
    pub modules: Vec<ModuleResolution>,
}

/// Effective repository list for one module
#[derive(Debug, Clone, Serialize)]
pub struct ModuleResolution {
    /// Module name
    pub name: String,
    /// Path relative to the project root
    pub path: String,
    /// Repositories searched for this module, in order
    pub repositories: Vec<Repository>,
    /// Whether the list above is the central one
    pub inherited: bool,
}

/// Repositories searched during plugin resolution, in order
pub fn plugin_repositories(schema: &SettingsSchema) -> Result<Vec<Repository>> {
    resolve_all(&schema.plugin_management.repositories)
}

/// Central repositories searched during dependency resolution, in order
pub fn dependency_repositories(schema: &SettingsSchema) -> Result<Vec<Repository>> {
    resolve_all(&schema.dependency_resolution.repositories)
}

/// Repositories effective for one module under the configured mode
///
/// Under `prefer-project` a module's own declarations replace the central
/// list; under every other mode the central list governs.
pub fn module_repositories(schema: &SettingsSchema, module_name: &str) -> Result<Vec<Repository>> {
    let module = schema
        .modules
        .iter()
        .find(|m| m.name == module_name)
        .ok_or_else(|| {
            Error::new(
                ErrorCode::InvalidInput,
                format!("Unknown module: {}", module_name),
            )
        })?;

    match schema.dependency_resolution.mode {
        RepositoriesMode::PreferProject if !module.repositories.is_empty() => {
            resolve_all(&module.repositories)
        }
        _ => dependency_repositories(schema),
    }
}

/// Resolve every repository order the schema implies
pub fn resolution_report(schema: &SettingsSchema) -> Result<ResolutionReport> {
    let central = dependency_repositories(schema)?;

    let mut modules = Vec::with_capacity(schema.modules.len());
    for module in &schema.modules {
        let repositories = module_repositories(schema, &module.name)?;
        let inherited = repositories == central;
        modules.push(ModuleResolution {
            name: module.name.clone(),
            path: module.relative_path().to_string(),
            repositories,
            inherited,
        });
    }

    Ok(ResolutionReport {
        mode: schema.dependency_resolution.mode,
        plugin_repositories: plugin_repositories(schema)?,
        dependency_repositories: central,
        modules,
    })
}

fn resolve_all(names: &[String]) -> Result<Vec<Repository>> {
    names.iter().map(|n| Repository::resolve_or_err(n)).collect()
}
