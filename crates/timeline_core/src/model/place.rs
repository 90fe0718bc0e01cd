//! Place record.

use crate::model::validation::{require_image_paths, require_name, ValidationError};
use crate::model::EntityKind;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a place.
pub type PlaceId = Uuid;

/// A location where events happen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Place {
    /// Older documents carry no id; one is generated on load.
    #[serde(default = "Uuid::new_v4")]
    pub id: PlaceId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub images: Vec<String>,
}

impl Place {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: String::new(),
            images: Vec::new(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.is_nil() {
            return Err(ValidationError::NilId(EntityKind::Place));
        }
        require_name(EntityKind::Place, &self.name)?;
        require_image_paths(EntityKind::Place, &self.images)
    }
}
