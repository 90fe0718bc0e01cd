//! Events tab use-cases.
//!
//! # Responsibility
//! - Add/edit/delete events with title uniqueness and reference checks.
//! - Serve as the single edit path for both full-edit and quick-edit.
//!
//! # Invariants
//! - Event titles are unique under the active `NamePolicy`.
//! - Referenced character/place ids exist in the project.
//! - Rejected edits leave the stored event untouched.

use crate::config::NamePolicy;
use crate::model::character::CharacterId;
use crate::model::event::{Event, EventId};
use crate::model::place::PlaceId;
use crate::model::project::Project;
use crate::model::EntityKind;
use crate::service::{ServiceError, ServiceResult};
use chrono::NaiveDate;
use log::info;
use std::collections::BTreeSet;

/// Full set of editable event fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventFields {
    pub title: String,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub images: Vec<String>,
    pub characters: BTreeSet<CharacterId>,
    pub places: BTreeSet<PlaceId>,
}

impl EventFields {
    pub fn new(title: impl Into<String>, start_date: NaiveDate) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            start_date,
            end_date: None,
            images: Vec::new(),
            characters: BTreeSet::new(),
            places: BTreeSet::new(),
        }
    }
}

impl From<&Event> for EventFields {
    fn from(event: &Event) -> Self {
        Self {
            title: event.title.clone(),
            description: event.description.clone(),
            start_date: event.start_date,
            end_date: event.end_date,
            images: event.images.clone(),
            characters: event.characters.clone(),
            places: event.places.clone(),
        }
    }
}

pub struct EventService<'p> {
    project: &'p mut Project,
    policy: NamePolicy,
}

impl<'p> EventService<'p> {
    pub fn new(project: &'p mut Project, policy: NamePolicy) -> Self {
        Self { project, policy }
    }

    /// Events in insertion order.
    pub fn list(&self) -> &[Event] {
        &self.project.events
    }

    pub fn get(&self, id: EventId) -> Option<&Event> {
        self.project.event(id)
    }

    pub fn add(&mut self, fields: EventFields) -> ServiceResult<Event> {
        let mut event = Event::new(String::new(), fields.start_date);
        self.apply(&mut event, fields)?;
        self.project.events.push(event.clone());
        info!("event=event_add module=service status=ok id={}", event.id);
        Ok(event)
    }

    pub fn edit(&mut self, id: EventId, fields: EventFields) -> ServiceResult<Event> {
        let index = self.index_of(id)?;
        let mut event = self.project.events[index].clone();
        self.apply(&mut event, fields)?;
        self.project.events[index] = event.clone();
        info!("event=event_edit module=service status=ok id={id}");
        Ok(event)
    }

    pub fn delete(&mut self, id: EventId) -> ServiceResult<()> {
        let index = self.index_of(id)?;
        self.project.events.remove(index);
        info!("event=event_delete module=service status=ok id={id}");
        Ok(())
    }

    fn index_of(&self, id: EventId) -> ServiceResult<usize> {
        self.project
            .events
            .iter()
            .position(|e| e.id == id)
            .ok_or(ServiceError::NotFound(EntityKind::Event, id))
    }

    fn apply(&self, event: &mut Event, fields: EventFields) -> ServiceResult<()> {
        let previous = std::mem::take(&mut event.title);
        event.title = self.policy.normalize(&fields.title);
        event.description = fields.description;
        event.start_date = fields.start_date;
        event.end_date = fields.end_date;
        event.images = fields.images;
        event.characters = fields.characters;
        event.places = fields.places;
        event.validate()?;

        // Only a new or changed title has to be free; a clash that predates
        // a policy change must not lock the event.
        let retitled = !self.policy.same(&previous, &event.title);
        if retitled
            && self
                .project
                .events
                .iter()
                .any(|other| other.id != event.id && self.policy.same(&other.title, &event.title))
        {
            return Err(ServiceError::DuplicateName {
                kind: EntityKind::Event,
                name: event.title.clone(),
            });
        }
        if let Some(missing) = event
            .characters
            .iter()
            .find(|id| self.project.character(**id).is_none())
        {
            return Err(ServiceError::UnknownCharacter(*missing));
        }
        if let Some(missing) = event.places.iter().find(|id| self.project.place(**id).is_none()) {
            return Err(ServiceError::UnknownPlace(*missing));
        }
        Ok(())
    }
}
