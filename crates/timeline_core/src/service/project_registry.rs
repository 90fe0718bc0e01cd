//! Project registry: enumerate, create, open, delete and rename projects.
//!
//! # Invariants
//! - The default project is only created when no project exists.
//! - The active pointer never names a deleted project; renames move it.

use crate::model::project::Project;
use crate::storage::{ProjectStore, StorageError, StorageResult};
use log::info;

/// Name of the project created on first run.
pub const DEFAULT_PROJECT_NAME: &str = "default";

pub struct ProjectRegistry<'s, S: ProjectStore> {
    store: &'s S,
}

impl<'s, S: ProjectStore> ProjectRegistry<'s, S> {
    pub fn new(store: &'s S) -> Self {
        Self { store }
    }

    /// Project names, sorted.
    pub fn list_projects(&self) -> StorageResult<Vec<String>> {
        self.store.list_project_names()
    }

    pub fn create_project(&self, name: &str) -> StorageResult<()> {
        self.store.create_project(name)
    }

    /// Creates `default` when the registry is empty.
    ///
    /// Returns whether a project was created.
    pub fn create_default_project(&self) -> StorageResult<bool> {
        if !self.list_projects()?.is_empty() {
            return Ok(false);
        }
        self.store.create_project(DEFAULT_PROJECT_NAME)?;
        info!("event=default_project module=registry status=created");
        Ok(true)
    }

    /// Loads `name` and records it as the active project.
    pub fn open_project(&self, name: &str) -> StorageResult<Project> {
        if !self.store.project_exists(name) {
            return Err(StorageError::ProjectNotFound(name.to_string()));
        }
        let project = self.store.load(name)?;
        self.store.set_active_project(name)?;
        info!("event=project_open module=registry status=ok project={name}");
        Ok(project)
    }

    pub fn active_project(&self) -> Option<String> {
        self.store.active_project()
    }

    pub fn delete_project(&self, name: &str) -> StorageResult<()> {
        self.store.delete_project(name)?;
        if self.store.active_project().as_deref() == Some(name) {
            self.store.clear_active_project()?;
        }
        Ok(())
    }

    pub fn rename_project(&self, old: &str, new: &str) -> StorageResult<()> {
        self.store.rename_project(old, new)?;
        if self.store.active_project().as_deref() == Some(old) {
            self.store.set_active_project(new)?;
        }
        Ok(())
    }

    /// Opens the project to work on at launch.
    ///
    /// First run (no projects) creates and opens `default`. Otherwise the
    /// active project is reopened when it still exists, falling back to
    /// the first project by name.
    pub fn bootstrap(&self) -> StorageResult<Project> {
        if self.create_default_project()? {
            return self.open_project(DEFAULT_PROJECT_NAME);
        }

        let projects = self.list_projects()?;
        let name = match self.store.active_project() {
            Some(active) if projects.contains(&active) => active,
            _ => projects
                .into_iter()
                .next()
                .unwrap_or_else(|| DEFAULT_PROJECT_NAME.to_string()),
        };
        self.open_project(&name)
    }
}
