//! Characters tab use-cases.
//!
//! # Invariants
//! - Character names are unique under the active `NamePolicy`.
//! - Delete cascades: the id is removed from every referencing event.

use crate::config::NamePolicy;
use crate::model::character::{Character, CharacterId};
use crate::model::project::Project;
use crate::model::EntityKind;
use crate::service::{DeleteOutcome, ServiceError, ServiceResult};
use log::info;

/// Editable character fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharacterFields {
    pub name: String,
    pub description: String,
    pub colour: String,
    pub images: Vec<String>,
}

impl CharacterFields {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

pub struct CharacterService<'p> {
    project: &'p mut Project,
    policy: NamePolicy,
}

impl<'p> CharacterService<'p> {
    pub fn new(project: &'p mut Project, policy: NamePolicy) -> Self {
        Self { project, policy }
    }

    /// Characters in insertion order.
    pub fn list(&self) -> &[Character] {
        &self.project.characters
    }

    pub fn get(&self, id: CharacterId) -> Option<&Character> {
        self.project.character(id)
    }

    pub fn add(&mut self, fields: CharacterFields) -> ServiceResult<Character> {
        let mut character = Character::new(String::new());
        self.apply(&mut character, fields)?;
        self.project.characters.push(character.clone());
        info!(
            "event=character_add module=service status=ok id={}",
            character.id
        );
        Ok(character)
    }

    pub fn edit(&mut self, id: CharacterId, fields: CharacterFields) -> ServiceResult<Character> {
        let index = self
            .project
            .characters
            .iter()
            .position(|c| c.id == id)
            .ok_or(ServiceError::NotFound(EntityKind::Character, id))?;

        let mut character = self.project.characters[index].clone();
        self.apply(&mut character, fields)?;
        self.project.characters[index] = character.clone();
        info!("event=character_edit module=service status=ok id={id}");
        Ok(character)
    }

    pub fn delete(&mut self, id: CharacterId) -> ServiceResult<DeleteOutcome> {
        let index = self
            .project
            .characters
            .iter()
            .position(|c| c.id == id)
            .ok_or(ServiceError::NotFound(EntityKind::Character, id))?;

        self.project.characters.remove(index);
        let cleared_references = self
            .project
            .events
            .iter_mut()
            .map(|event| event.characters.remove(&id))
            .filter(|removed| *removed)
            .count();
        info!(
            "event=character_delete module=service status=ok id={} cleared_references={}",
            id, cleared_references
        );
        Ok(DeleteOutcome { cleared_references })
    }

    /// Writes `fields` into `character` after validation; `character` is a
    /// scratch copy until the caller commits it.
    fn apply(&self, character: &mut Character, fields: CharacterFields) -> ServiceResult<()> {
        let previous = std::mem::take(&mut character.name);
        character.name = self.policy.normalize(&fields.name);
        character.description = fields.description;
        character.colour = fields.colour.trim().to_string();
        character.images = fields.images;
        character.validate()?;

        // Only a new or changed name has to be free; a clash that predates
        // a policy change must not lock the record.
        if self.policy.same(&previous, &character.name) {
            return Ok(());
        }
        let clash = self
            .project
            .characters
            .iter()
            .any(|other| {
                other.id != character.id && self.policy.same(&other.name, &character.name)
            });
        if clash {
            return Err(ServiceError::DuplicateName {
                kind: EntityKind::Character,
                name: character.name.clone(),
            });
        }
        Ok(())
    }
}
