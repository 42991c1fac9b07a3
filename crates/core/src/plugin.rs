//! Plugin version pins
//!
//! Settings pin plugin versions for the external plugin-loading
//! collaborator. A pin declares an available version; it does not apply the
//! plugin unless `apply` is set.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Reverse-DNS identifier with at least two dot-separated segments
static PLUGIN_ID: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9_-]*(\.[A-Za-z][A-Za-z0-9_-]*)+$").unwrap()
});

/// Dotted release version with an optional qualifier (8.11.1, 2.2.20, 1.0-rc1)
static PLUGIN_VERSION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]+(\.[0-9]+)*(-[A-Za-z0-9.]+)?$").unwrap()
});

/// A pinned plugin version
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginPin {
    /// Plugin identifier (reverse-DNS)
    pub id: String,
    /// Pinned version
    pub version: String,
    /// Whether the plugin is applied to the root project
    #[serde(default)]
    pub apply: bool,
}

impl PluginPin {
    /// Create a pin that declares a version without applying the plugin
    pub fn new(id: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            version: version.into(),
            apply: false,
        }
    }

    /// Whether the identifier is reverse-DNS shaped
    pub fn id_is_valid(&self) -> bool {
        PLUGIN_ID.is_match(&self.id)
    }

    /// Whether the version looks like a dotted release version
    pub fn version_is_valid(&self) -> bool {
        PLUGIN_VERSION.is_match(&self.version)
    }
}
