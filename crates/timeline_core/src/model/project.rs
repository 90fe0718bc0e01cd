//! Project aggregate: the unit persisted as one `data.json` document.
//!
//! # Responsibility
//! - Own the character, place and event collections of one project.
//! - Check cross-record invariants that single records cannot see.
//!
//! # Invariants
//! - Collections keep insertion order; that order is the list order.
//! - Event titles are unique (exact match) within a project.
//! - Every event reference points to a character/place in this project.

use crate::model::character::{Character, CharacterId};
use crate::model::event::{Event, EventId};
use crate::model::place::{Place, PlaceId};
use crate::model::validation::ValidationError;
use serde::Serialize;
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// Loaded project state.
///
/// `name` and `pictures_dir` come from the folder layout and are not part
/// of the serialized document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Project {
    #[serde(skip)]
    pub name: String,
    #[serde(skip)]
    pub pictures_dir: PathBuf,
    pub characters: Vec<Character>,
    pub places: Vec<Place>,
    pub events: Vec<Event>,
}

/// Cross-record inconsistency found in a project document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntegrityError {
    Record(ValidationError),
    DuplicateId(uuid::Uuid),
    DuplicateEventTitle(String),
    DanglingCharacter { event: EventId, character: CharacterId },
    DanglingPlace { event: EventId, place: PlaceId },
}

impl Display for IntegrityError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Record(err) => write!(f, "{err}"),
            Self::DuplicateId(id) => write!(f, "id {id} is used by more than one record"),
            Self::DuplicateEventTitle(title) => write!(f, "duplicate event title `{title}`"),
            Self::DanglingCharacter { event, character } => {
                write!(f, "event {event} references missing character {character}")
            }
            Self::DanglingPlace { event, place } => {
                write!(f, "event {event} references missing place {place}")
            }
        }
    }
}

impl Error for IntegrityError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Record(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for IntegrityError {
    fn from(value: ValidationError) -> Self {
        Self::Record(value)
    }
}

impl Project {
    /// Creates an empty project bound to `name` and its picture folder.
    pub fn empty(name: impl Into<String>, pictures_dir: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            pictures_dir: pictures_dir.into(),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty() && self.places.is_empty() && self.events.is_empty()
    }

    pub fn character(&self, id: CharacterId) -> Option<&Character> {
        self.characters.iter().find(|c| c.id == id)
    }

    pub fn place(&self, id: PlaceId) -> Option<&Place> {
        self.places.iter().find(|p| p.id == id)
    }

    pub fn event(&self, id: EventId) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    /// Verifies every record and all cross-record invariants.
    pub fn check_integrity(&self) -> Result<(), IntegrityError> {
        let mut ids = HashSet::new();
        for character in &self.characters {
            character.validate()?;
            if !ids.insert(character.id) {
                return Err(IntegrityError::DuplicateId(character.id));
            }
        }
        for place in &self.places {
            place.validate()?;
            if !ids.insert(place.id) {
                return Err(IntegrityError::DuplicateId(place.id));
            }
        }

        let mut titles = HashSet::new();
        for event in &self.events {
            event.validate()?;
            if !ids.insert(event.id) {
                return Err(IntegrityError::DuplicateId(event.id));
            }
            if !titles.insert(event.title.as_str()) {
                return Err(IntegrityError::DuplicateEventTitle(event.title.clone()));
            }
            if let Some(missing) = event
                .characters
                .iter()
                .find(|id| self.character(**id).is_none())
            {
                return Err(IntegrityError::DanglingCharacter {
                    event: event.id,
                    character: *missing,
                });
            }
            if let Some(missing) = event.places.iter().find(|id| self.place(**id).is_none()) {
                return Err(IntegrityError::DanglingPlace {
                    event: event.id,
                    place: *missing,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{IntegrityError, Project};
    use crate::model::character::Character;
    use crate::model::event::Event;
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).expect("valid test date")
    }

    #[test]
    fn empty_project_is_consistent() {
        let project = Project::empty("default", "/tmp/pictures");
        assert!(project.is_empty());
        assert!(project.check_integrity().is_ok());
    }

    #[test]
    fn duplicate_titles_are_reported() {
        let mut project = Project::empty("p", "/tmp/p");
        project.events.push(Event::new("Battle of X", day(1)));
        project.events.push(Event::new("Battle of X", day(2)));
        assert_eq!(
            project.check_integrity().unwrap_err(),
            IntegrityError::DuplicateEventTitle("Battle of X".to_string())
        );
    }

    #[test]
    fn dangling_character_reference_is_reported() {
        let mut project = Project::empty("p", "/tmp/p");
        let ghost = Character::new("ghost");
        let mut event = Event::new("haunting", day(3));
        event.characters.insert(ghost.id);
        let event_id = event.id;
        project.events.push(event);

        assert_eq!(
            project.check_integrity().unwrap_err(),
            IntegrityError::DanglingCharacter {
                event: event_id,
                character: ghost.id,
            }
        );
    }
}
