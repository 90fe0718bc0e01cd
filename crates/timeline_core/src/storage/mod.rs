//! Project persistence: JSON documents, picture folders and the active
//! project pointer.
//!
//! # Responsibility
//! - Define the storage contract used by services (`ProjectStore`).
//! - Keep file layout and serialization details inside this module.
//!
//! # Invariants
//! - Saves never leave a half-written `data.json` behind (temp + rename).
//! - Read paths reject corrupt or inconsistent documents instead of
//!   masking them; only a missing document is treated as a new project.
//!
//! # Layout
//! ```text
//! <root>/.current_project
//! <root>/<name>/data.json
//! <root>/<name>/pictures/<file>
//! ```

mod document;
mod images;
mod json_store;
mod pointer;

use crate::model::project::{IntegrityError, Project};
use crate::model::validation::ValidationError;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub use json_store::JsonProjectStore;

/// Document file name inside a project folder.
pub const DATA_FILE_NAME: &str = "data.json";
/// Image folder name inside a project folder.
pub const PICTURES_DIR_NAME: &str = "pictures";
/// Active project pointer file name inside the projects root.
pub const ACTIVE_POINTER_FILE_NAME: &str = ".current_project";

pub type StorageResult<T> = Result<T, StorageError>;

/// Storage-level failure.
#[derive(Debug)]
pub enum StorageError {
    /// File-system operation failed.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Document exists but is not valid JSON for the project schema.
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// Document parsed but violates project invariants.
    InvalidData {
        path: PathBuf,
        source: IntegrityError,
    },
    /// Project could not be serialized.
    Serialize(serde_json::Error),
    InvalidProjectName(ValidationError),
    ProjectNotFound(String),
    ProjectExists(String),
    /// Source image is missing, unreadable or could not be copied.
    ImageImport {
        file: PathBuf,
        source: std::io::Error,
    },
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "i/o error at `{}`: {source}", path.display()),
            Self::Corrupt { path, source } => write!(
                f,
                "project data at `{}` is corrupt and was not loaded: {source}",
                path.display()
            ),
            Self::InvalidData { path, source } => write!(
                f,
                "project data at `{}` is inconsistent: {source}",
                path.display()
            ),
            Self::Serialize(err) => write!(f, "failed to serialize project: {err}"),
            Self::InvalidProjectName(err) => write!(f, "{err}"),
            Self::ProjectNotFound(name) => write!(f, "project not found: `{name}`"),
            Self::ProjectExists(name) => write!(f, "project already exists: `{name}`"),
            Self::ImageImport { file, source } => {
                write!(f, "could not import image `{}`: {source}", file.display())
            }
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Corrupt { source, .. } => Some(source),
            Self::InvalidData { source, .. } => Some(source),
            Self::Serialize(err) => Some(err),
            Self::InvalidProjectName(err) => Some(err),
            Self::ProjectNotFound(_) | Self::ProjectExists(_) => None,
            Self::ImageImport { source, .. } => Some(source),
        }
    }
}

impl From<ValidationError> for StorageError {
    fn from(value: ValidationError) -> Self {
        Self::InvalidProjectName(value)
    }
}

pub(crate) fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> StorageError + '_ {
    move |source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Storage contract for project documents and their folders.
pub trait ProjectStore {
    /// Lists project folder names, sorted, hidden folders excluded.
    fn list_project_names(&self) -> StorageResult<Vec<String>>;
    fn project_exists(&self, name: &str) -> bool;
    /// Creates the folder, picture folder and an empty document.
    fn create_project(&self, name: &str) -> StorageResult<()>;
    fn delete_project(&self, name: &str) -> StorageResult<()>;
    fn rename_project(&self, old: &str, new: &str) -> StorageResult<()>;
    /// Loads a project; a missing document is recreated empty.
    fn load(&self, name: &str) -> StorageResult<Project>;
    fn save(&self, project: &Project) -> StorageResult<()>;
    /// Copies an image into the project's picture folder and returns the
    /// project-relative path to store on a record.
    fn import_image(&self, project: &Project, source: &Path) -> StorageResult<String>;
    fn set_active_project(&self, name: &str) -> StorageResult<()>;
    /// Returns `None` when the pointer is absent, unreadable or blank.
    fn active_project(&self) -> Option<String>;
    fn clear_active_project(&self) -> StorageResult<()>;
}
