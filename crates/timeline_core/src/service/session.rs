//! Open-project session.
//!
//! # Responsibility
//! - Hold the loaded project as explicit context for every operation.
//! - Save the project immediately after each successful mutation.
//!
//! # Invariants
//! - A rejected mutation changes nothing in memory or on disk.
//! - When the save after a mutation fails, the in-memory project is rolled
//!   back so memory keeps matching the last written document.

use crate::config::NamePolicy;
use crate::model::character::{Character, CharacterId};
use crate::model::event::{Event, EventId};
use crate::model::place::{Place, PlaceId};
use crate::model::project::Project;
use crate::service::character_service::{CharacterFields, CharacterService};
use crate::service::event_service::{EventFields, EventService};
use crate::service::place_service::{PlaceFields, PlaceService};
use crate::service::{DeleteOutcome, ServiceError, ServiceResult};
use crate::storage::{ProjectStore, StorageError, StorageResult};
use crate::timeline::{self, QuickEdit, TimelineCard, TimelineFilter};
use log::warn;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub type SessionResult<T> = Result<T, SessionError>;

#[derive(Debug)]
pub enum SessionError {
    /// Rejected by validation or service rules; nothing was written.
    Service(ServiceError),
    /// Accepted, but the save failed; the change was rolled back.
    Storage(StorageError),
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Service(err) => write!(f, "{err}"),
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Service(err) => Some(err),
            Self::Storage(err) => Some(err),
        }
    }
}

impl From<ServiceError> for SessionError {
    fn from(value: ServiceError) -> Self {
        Self::Service(value)
    }
}

impl From<StorageError> for SessionError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

/// Outcome of importing several images; each file succeeds or fails alone.
#[derive(Debug, Default)]
pub struct ImageImportReport {
    /// Project-relative paths ready to put on a record.
    pub stored: Vec<String>,
    pub failures: Vec<(PathBuf, StorageError)>,
}

impl ImageImportReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

pub struct ProjectSession<'s, S: ProjectStore> {
    store: &'s S,
    project: Project,
    policy: NamePolicy,
}

impl<'s, S: ProjectStore> ProjectSession<'s, S> {
    pub fn new(store: &'s S, project: Project, policy: NamePolicy) -> Self {
        Self {
            store,
            project,
            policy,
        }
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn name(&self) -> &str {
        &self.project.name
    }

    pub fn into_project(self) -> Project {
        self.project
    }

    /// Writes the current project document.
    pub fn save(&self) -> StorageResult<()> {
        self.store.save(&self.project)
    }

    /// Discards in-memory state and reloads from disk.
    pub fn reload(&mut self) -> StorageResult<()> {
        self.project = self.store.load(&self.project.name)?;
        Ok(())
    }

    pub fn characters(&self) -> &[Character] {
        &self.project.characters
    }

    pub fn places(&self) -> &[Place] {
        &self.project.places
    }

    pub fn events(&self) -> &[Event] {
        &self.project.events
    }

    pub fn add_character(&mut self, fields: CharacterFields) -> SessionResult<Character> {
        self.commit(|project, policy| CharacterService::new(project, policy).add(fields))
    }

    pub fn edit_character(
        &mut self,
        id: CharacterId,
        fields: CharacterFields,
    ) -> SessionResult<Character> {
        self.commit(|project, policy| CharacterService::new(project, policy).edit(id, fields))
    }

    pub fn delete_character(&mut self, id: CharacterId) -> SessionResult<DeleteOutcome> {
        self.commit(|project, policy| CharacterService::new(project, policy).delete(id))
    }

    pub fn add_place(&mut self, fields: PlaceFields) -> SessionResult<Place> {
        self.commit(|project, policy| PlaceService::new(project, policy).add(fields))
    }

    pub fn edit_place(&mut self, id: PlaceId, fields: PlaceFields) -> SessionResult<Place> {
        self.commit(|project, policy| PlaceService::new(project, policy).edit(id, fields))
    }

    pub fn delete_place(&mut self, id: PlaceId) -> SessionResult<DeleteOutcome> {
        self.commit(|project, policy| PlaceService::new(project, policy).delete(id))
    }

    pub fn add_event(&mut self, fields: EventFields) -> SessionResult<Event> {
        self.commit(|project, policy| EventService::new(project, policy).add(fields))
    }

    /// Full edit of every event field.
    pub fn edit_event(&mut self, id: EventId, fields: EventFields) -> SessionResult<Event> {
        self.commit(|project, policy| EventService::new(project, policy).edit(id, fields))
    }

    /// Edit of references and dates only, from the timeline.
    pub fn quick_edit_event(&mut self, id: EventId, edit: QuickEdit) -> SessionResult<Event> {
        self.commit(|project, policy| {
            timeline::quick_edit(&mut EventService::new(project, policy), id, edit)
        })
    }

    pub fn delete_event(&mut self, id: EventId) -> SessionResult<()> {
        self.commit(|project, policy| EventService::new(project, policy).delete(id))
    }

    /// Copies each image into the picture folder independently.
    pub fn import_images<P: AsRef<Path>>(&self, sources: &[P]) -> ImageImportReport {
        let mut report = ImageImportReport::default();
        for source in sources {
            let source = source.as_ref();
            match self.store.import_image(&self.project, source) {
                Ok(stored) => report.stored.push(stored),
                Err(err) => {
                    warn!(
                        "event=image_import module=session status=error path={} error={}",
                        source.display(),
                        err
                    );
                    report.failures.push((source.to_path_buf(), err));
                }
            }
        }
        report
    }

    pub fn timeline(&self, filter: &TimelineFilter) -> Vec<TimelineCard> {
        timeline::build_timeline(&self.project, filter)
    }

    fn commit<T>(
        &mut self,
        operation: impl FnOnce(&mut Project, NamePolicy) -> ServiceResult<T>,
    ) -> SessionResult<T> {
        let snapshot = self.project.clone();
        let value = operation(&mut self.project, self.policy)?;
        if let Err(err) = self.store.save(&self.project) {
            self.project = snapshot;
            return Err(err.into());
        }
        Ok(value)
    }
}
