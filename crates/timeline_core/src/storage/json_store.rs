//! File-system `ProjectStore` backed by one JSON document per project.

use super::document::ProjectDocument;
use super::images::import_into;
use super::pointer::{clear_pointer, read_pointer, write_pointer};
use super::{
    io_error, ProjectStore, StorageError, StorageResult, DATA_FILE_NAME, PICTURES_DIR_NAME,
};
use crate::model::project::Project;
use crate::model::validation::validate_project_name;
use log::{error, info, warn};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

const TEMP_SUFFIX: &str = "tmp";

/// JSON project store rooted at a `projects/` folder.
#[derive(Debug, Clone)]
pub struct JsonProjectStore {
    root: PathBuf,
}

impl JsonProjectStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn project_dir(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    pub fn pictures_dir(&self, name: &str) -> PathBuf {
        self.project_dir(name).join(PICTURES_DIR_NAME)
    }

    pub fn data_file(&self, name: &str) -> PathBuf {
        self.project_dir(name).join(DATA_FILE_NAME)
    }

    fn ensure_project_dirs(&self, name: &str) -> StorageResult<()> {
        let pictures = self.pictures_dir(name);
        fs::create_dir_all(&pictures).map_err(io_error(&pictures))
    }

    fn write_document(&self, project: &Project) -> StorageResult<()> {
        let bytes = serde_json::to_vec_pretty(project).map_err(StorageError::Serialize)?;
        let target = self.data_file(&project.name);
        let temp = target.with_extension(format!("json.{TEMP_SUFFIX}"));

        fs::write(&temp, &bytes).map_err(io_error(&temp))?;
        if let Err(err) = fs::rename(&temp, &target) {
            let _ = fs::remove_file(&temp);
            return Err(io_error(&target)(err));
        }
        Ok(())
    }
}

impl ProjectStore for JsonProjectStore {
    fn list_project_names(&self) -> StorageResult<Vec<String>> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(io_error(&self.root)(err)),
        };

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(io_error(&self.root))?;
            if !entry.path().is_dir() {
                continue;
            }
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };
            if name.starts_with('.') {
                continue;
            }
            // Folders that could never be opened or saved are not projects.
            if let Err(err) = validate_project_name(&name) {
                warn!(
                    "event=project_list module=storage status=skipped folder={:?} error={}",
                    name, err
                );
                continue;
            }
            names.push(name);
        }
        names.sort();
        Ok(names)
    }

    fn project_exists(&self, name: &str) -> bool {
        validate_project_name(name).is_ok() && self.project_dir(name).is_dir()
    }

    fn create_project(&self, name: &str) -> StorageResult<()> {
        validate_project_name(name)?;
        if self.project_dir(name).exists() {
            return Err(StorageError::ProjectExists(name.to_string()));
        }
        self.ensure_project_dirs(name)?;
        self.write_document(&Project::empty(name, self.pictures_dir(name)))?;
        info!("event=project_create module=storage status=ok project={name}");
        Ok(())
    }

    fn delete_project(&self, name: &str) -> StorageResult<()> {
        validate_project_name(name)?;
        let dir = self.project_dir(name);
        if !dir.is_dir() {
            return Err(StorageError::ProjectNotFound(name.to_string()));
        }
        fs::remove_dir_all(&dir).map_err(io_error(&dir))?;
        info!("event=project_delete module=storage status=ok project={name}");
        Ok(())
    }

    fn rename_project(&self, old: &str, new: &str) -> StorageResult<()> {
        validate_project_name(old)?;
        validate_project_name(new)?;
        let from = self.project_dir(old);
        let to = self.project_dir(new);
        if !from.is_dir() {
            return Err(StorageError::ProjectNotFound(old.to_string()));
        }
        if to.exists() {
            return Err(StorageError::ProjectExists(new.to_string()));
        }
        fs::rename(&from, &to).map_err(io_error(&from))?;
        info!("event=project_rename module=storage status=ok from={old} to={new}");
        Ok(())
    }

    fn load(&self, name: &str) -> StorageResult<Project> {
        validate_project_name(name)?;
        let started_at = Instant::now();
        self.ensure_project_dirs(name)?;
        let path = self.data_file(name);

        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                warn!(
                    "event=project_load module=storage status=recreated project={} path={}",
                    name,
                    path.display()
                );
                let project = Project::empty(name, self.pictures_dir(name));
                self.write_document(&project)?;
                return Ok(project);
            }
            Err(err) => return Err(io_error(&path)(err)),
        };

        let document: ProjectDocument = match serde_json::from_str(&text) {
            Ok(document) => document,
            Err(source) => {
                error!(
                    "event=project_load module=storage status=error error_code=corrupt project={} error={}",
                    name, source
                );
                return Err(StorageError::Corrupt { path, source });
            }
        };
        let mut project = document.into_project(name);
        project.name = name.to_string();
        project.pictures_dir = self.pictures_dir(name);

        if let Err(source) = project.check_integrity() {
            error!(
                "event=project_load module=storage status=error error_code=invalid_data project={} error={}",
                name, source
            );
            return Err(StorageError::InvalidData { path, source });
        }

        info!(
            "event=project_load module=storage status=ok project={} characters={} places={} events={} duration_ms={}",
            name,
            project.characters.len(),
            project.places.len(),
            project.events.len(),
            started_at.elapsed().as_millis()
        );
        Ok(project)
    }

    fn save(&self, project: &Project) -> StorageResult<()> {
        validate_project_name(&project.name)?;
        let started_at = Instant::now();
        self.ensure_project_dirs(&project.name)?;

        match self.write_document(project) {
            Ok(()) => {
                info!(
                    "event=project_save module=storage status=ok project={} duration_ms={}",
                    project.name,
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=project_save module=storage status=error project={} error={}",
                    project.name, err
                );
                Err(err)
            }
        }
    }

    fn import_image(&self, project: &Project, source: &Path) -> StorageResult<String> {
        validate_project_name(&project.name)?;
        import_into(&self.pictures_dir(&project.name), source)
    }

    fn set_active_project(&self, name: &str) -> StorageResult<()> {
        validate_project_name(name)?;
        write_pointer(&self.root, name)
    }

    fn active_project(&self) -> Option<String> {
        read_pointer(&self.root)
    }

    fn clear_active_project(&self) -> StorageResult<()> {
        clear_pointer(&self.root)
    }
}
