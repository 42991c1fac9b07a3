//! Well-known artifact repositories
//!
//! Settings declare repositories by name; this module maps those names onto
//! their fixed base URLs. The set is closed: the three repositories below
//! are the only ones a settings file may reference.

use crate::error::{Error, ErrorCode, Result};
use serde::Serialize;

/// A named artifact repository with a fixed base URL
///
/// Repositories are configuration surfaced for the external resolution
/// collaborator; buildyard never contacts them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Repository {
    /// Name used in settings files
    pub name: &'static str,
    /// Base URL consumed by the external resolver
    pub url: &'static str,
    /// Whether the repository serves plugin resolution only
    pub plugin_only: bool,
}

/// Android vendor repository, searched first
pub const GOOGLE: Repository = Repository {
    name: "google",
    url: "https://dl.google.com/dl/android/maven2/",
    plugin_only: false,
};

/// General public repository, searched second
pub const MAVEN_CENTRAL: Repository = Repository {
    name: "maven-central",
    url: "https://repo.maven.apache.org/maven2/",
    plugin_only: false,
};

/// Plugin portal, searched last and only for plugin resolution
pub const GRADLE_PLUGIN_PORTAL: Repository = Repository {
    name: "gradle-plugin-portal",
    url: "https://plugins.gradle.org/m2/",
    plugin_only: true,
};

/// Every repository buildyard knows about
pub const KNOWN: [Repository; 3] = [GOOGLE, MAVEN_CENTRAL, GRADLE_PLUGIN_PORTAL];

impl Repository {
    /// Resolve a settings-file name to a known repository
    pub fn resolve(name: &str) -> Option<Repository> {
        KNOWN.iter().find(|r| r.name == name).copied()
    }

    /// Resolve a name, failing with a suggestion listing the known set
    pub fn resolve_or_err(name: &str) -> Result<Repository> {
        Self::resolve(name).ok_or_else(|| {
            Error::new(
                ErrorCode::InvalidSettingsValue,
                format!("Unknown repository: {}", name),
            )
            .with_suggestion(format!("Known repositories: {}", known_names().join(", ")))
        })
    }
}

/// Names of every known repository, in search-order precedence
pub fn known_names() -> Vec<&'static str> {
    KNOWN.iter().map(|r| r.name).collect()
}
