//! Places tab use-cases.

use crate::config::NamePolicy;
use crate::model::place::{Place, PlaceId};
use crate::model::project::Project;
use crate::model::EntityKind;
use crate::service::{DeleteOutcome, ServiceError, ServiceResult};
use log::info;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaceFields {
    pub name: String,
    pub description: String,
    pub images: Vec<String>,
}

impl PlaceFields {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

pub struct PlaceService<'p> {
    project: &'p mut Project,
    policy: NamePolicy,
}

impl<'p> PlaceService<'p> {
    pub fn new(project: &'p mut Project, policy: NamePolicy) -> Self {
        Self { project, policy }
    }

    pub fn list(&self) -> &[Place] {
        &self.project.places
    }

    pub fn get(&self, id: PlaceId) -> Option<&Place> {
        self.project.place(id)
    }

    pub fn add(&mut self, fields: PlaceFields) -> ServiceResult<Place> {
        let mut place = Place::new(String::new());
        self.apply(&mut place, fields)?;
        self.project.places.push(place.clone());
        info!("event=place_add module=service status=ok id={}", place.id);
        Ok(place)
    }

    pub fn edit(&mut self, id: PlaceId, fields: PlaceFields) -> ServiceResult<Place> {
        let index = self.index_of(id)?;
        let mut place = self.project.places[index].clone();
        self.apply(&mut place, fields)?;
        self.project.places[index] = place.clone();
        info!("event=place_edit module=service status=ok id={id}");
        Ok(place)
    }

    /// Removes the place and clears it from every event that referenced it.
    pub fn delete(&mut self, id: PlaceId) -> ServiceResult<DeleteOutcome> {
        let index = self.index_of(id)?;
        self.project.places.remove(index);

        let mut cleared_references = 0;
        for event in &mut self.project.events {
            if event.places.remove(&id) {
                cleared_references += 1;
            }
        }
        info!(
            "event=place_delete module=service status=ok id={} cleared_references={}",
            id, cleared_references
        );
        Ok(DeleteOutcome { cleared_references })
    }

    fn index_of(&self, id: PlaceId) -> ServiceResult<usize> {
        self.project
            .places
            .iter()
            .position(|p| p.id == id)
            .ok_or(ServiceError::NotFound(EntityKind::Place, id))
    }

    fn apply(&self, place: &mut Place, fields: PlaceFields) -> ServiceResult<()> {
        let previous = std::mem::take(&mut place.name);
        place.name = self.policy.normalize(&fields.name);
        place.description = fields.description;
        place.images = fields.images;
        place.validate()?;

        // Only a new or changed name has to be free; a clash that predates
        // a policy change must not lock the record.
        if self.policy.same(&previous, &place.name) {
            return Ok(());
        }
        if let Some(other) = self
            .project
            .places
            .iter()
            .find(|other| other.id != place.id && self.policy.same(&other.name, &place.name))
        {
            return Err(ServiceError::DuplicateName {
                kind: EntityKind::Place,
                name: other.name.clone(),
            });
        }
        Ok(())
    }
}
