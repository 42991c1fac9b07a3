//! Settings file loading

use super::schema::SettingsSchema;
use crate::error::{Error, Result};
use crate::validation::{self, ValidationError};
use std::path::{Path, PathBuf};

/// Candidate settings files, checked in order
const SETTINGS_CANDIDATES: [&str; 3] = [
    "buildyard.toml",
    ".buildyard.toml",
    ".config/buildyard.toml",
];

/// Loaded settings plus their provenance
#[derive(Debug, Clone)]
pub struct Settings {
    /// Parsed and validated schema
    pub schema: SettingsSchema,
    /// File the schema came from, if any
    pub path: Option<PathBuf>,
    /// Directory relative paths resolve against
    pub root_dir: PathBuf,
    /// Non-blocking validation findings, retained for display
    pub warnings: Vec<ValidationError>,
}

impl Settings {
    /// Load settings from an explicit path, a discovered file, or defaults
    ///
    /// An explicit path that does not exist is an error; finding no
    /// candidate file is not. A schema that fails validation never loads.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let settings_path = match path {
            Some(p) => {
                if !p.exists() {
                    return Err(Error::settings_not_found(p));
                }
                Some(p.to_path_buf())
            }
            None => find_settings_file(),
        };

        let schema = if let Some(ref p) = settings_path {
            tracing::debug!(path = %p.display(), "loading settings file");
            load_settings_file(p)?
        } else {
            tracing::debug!("no settings file found, using built-in defaults");
            SettingsSchema::default()
        };

        let findings = validation::validate_settings(&schema);
        let warnings = findings.warnings().to_vec();
        findings.to_result()?;

        let root_dir = root_dir_for(settings_path.as_deref());

        Ok(Self {
            schema,
            path: settings_path,
            root_dir,
            warnings,
        })
    }

    /// Build output directory the clean task removes
    pub fn build_dir(&self) -> PathBuf {
        self.root_dir.join(&self.schema.layout.build_dir)
    }
}

/// Built-in defaults only (no file)
impl Default for Settings {
    fn default() -> Self {
        Self {
            schema: SettingsSchema::default(),
            path: None,
            root_dir: PathBuf::from("."),
            warnings: Vec::new(),
        }
    }
}

/// Find a settings file in the standard locations
fn find_settings_file() -> Option<PathBuf> {
    for candidate in SETTINGS_CANDIDATES {
        let path = Path::new(candidate);
        if path.exists() {
            return Some(path.to_path_buf());
        }
    }
    None
}

/// Directory paths resolve against: the settings file's parent, or the
/// working directory when defaults are in use
fn root_dir_for(settings_path: Option<&Path>) -> PathBuf {
    match settings_path.and_then(|p| p.parent()) {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Read and parse a TOML settings file
fn load_settings_file(path: &Path) -> Result<SettingsSchema> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::settings(format!(
            "Failed to read settings file {}: {}",
            path.display(),
            e
        ))
    })?;

    toml::from_str(&content)
        .map_err(|e| Error::from(e).with_context(format!("While parsing {}", path.display())))
}
