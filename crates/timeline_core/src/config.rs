//! Application settings.
//!
//! # Responsibility
//! - Resolve the projects root, log location and log level.
//! - Carry the name matching policy used for uniqueness checks.
//!
//! # Invariants
//! - Defaults never touch the file system.
//! - `settings.json` is optional; when present it must parse.

use crate::logging::default_log_level;
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};

/// Folder under the working directory that holds all projects.
pub const PROJECTS_DIR_NAME: &str = "projects";
/// Optional settings file inside the projects root.
pub const SETTINGS_FILE_NAME: &str = "settings.json";
/// Hidden log folder inside the projects root.
pub const LOG_DIR_NAME: &str = ".logs";

/// How names and titles are compared for uniqueness.
///
/// Default: surrounding whitespace is trimmed, comparison is
/// case-sensitive. With `trim = false` input is stored and compared as
/// typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NamePolicy {
    pub trim: bool,
    pub case_sensitive: bool,
}

impl Default for NamePolicy {
    fn default() -> Self {
        Self {
            trim: true,
            case_sensitive: true,
        }
    }
}

impl NamePolicy {
    /// Returns the form of `value` that gets stored on a record.
    pub fn normalize(&self, value: &str) -> String {
        if self.trim {
            value.trim().to_string()
        } else {
            value.to_string()
        }
    }

    /// Returns whether two names collide under this policy.
    pub fn same(&self, left: &str, right: &str) -> bool {
        let (left, right) = if self.trim {
            (left.trim(), right.trim())
        } else {
            (left, right)
        };
        if self.case_sensitive {
            left == right
        } else {
            left.to_lowercase() == right.to_lowercase()
        }
    }
}

/// Resolved application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub projects_root: PathBuf,
    pub log_dir: PathBuf,
    pub log_level: String,
    pub name_policy: NamePolicy,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct SettingsFile {
    log_level: Option<String>,
    name_policy: Option<NamePolicy>,
}

#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read settings `{}`: {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "invalid settings `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
        }
    }
}

impl AppConfig {
    /// Builds defaults for a projects root.
    pub fn with_root(projects_root: impl Into<PathBuf>) -> Self {
        let projects_root = projects_root.into();
        Self {
            log_dir: projects_root.join(LOG_DIR_NAME),
            projects_root,
            log_level: default_log_level().to_string(),
            name_policy: NamePolicy::default(),
        }
    }

    /// Defaults for `<working_dir>/projects`.
    pub fn for_working_dir(working_dir: &Path) -> Self {
        Self::with_root(working_dir.join(PROJECTS_DIR_NAME))
    }

    /// Applies `settings.json` from the projects root, if present.
    pub fn load(projects_root: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let mut config = Self::with_root(projects_root);
        let path = config.projects_root.join(SETTINGS_FILE_NAME);

        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(config),
            Err(source) => return Err(ConfigError::Io { path, source }),
        };
        let settings: SettingsFile = serde_json::from_str(&text)
            .map_err(|source| ConfigError::Parse { path, source })?;

        if let Some(level) = settings.log_level {
            config.log_level = level;
        }
        if let Some(policy) = settings.name_policy {
            config.name_policy = policy;
        }
        Ok(config)
    }
}
