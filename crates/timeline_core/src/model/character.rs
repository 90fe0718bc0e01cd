//! Character record.
//!
//! # Invariants
//! - `id` is stable and never reused for another character.
//! - `name` is non-empty after trimming.
//! - `colour` is empty or `#RRGGBB`.

use crate::model::validation::{
    is_valid_colour, require_image_paths, require_name, ValidationError,
};
use crate::model::EntityKind;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a character.
pub type CharacterId = Uuid;

/// A person (or creature) appearing in the story.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    /// Older documents carry no id; one is generated on load.
    #[serde(default = "Uuid::new_v4")]
    pub id: CharacterId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Serialized as `color` to stay readable by older project files.
    #[serde(rename = "color", alias = "colour", default)]
    pub colour: String,
    /// Project-relative image paths (`pictures/<file>`).
    #[serde(default)]
    pub images: Vec<String>,
}

impl Character {
    /// Creates a character with a generated id and empty optional fields.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: String::new(),
            colour: String::new(),
            images: Vec::new(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.is_nil() {
            return Err(ValidationError::NilId(EntityKind::Character));
        }
        require_name(EntityKind::Character, &self.name)?;
        if !is_valid_colour(&self.colour) {
            return Err(ValidationError::InvalidColour(self.colour.clone()));
        }
        require_image_paths(EntityKind::Character, &self.images)
    }
}
