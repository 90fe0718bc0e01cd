//! Use-case services over a loaded project.
//!
//! # Responsibility
//! - Character/place/event CRUD with validation and uniqueness rules.
//! - Project registry operations over a `ProjectStore`.
//! - `ProjectSession`, which saves after every successful mutation.
//!
//! # Invariants
//! - A failed operation leaves the in-memory project unchanged.
//! - Deleting a character or place clears it from every event.

pub mod character_service;
pub mod event_service;
pub mod place_service;
pub mod project_registry;
pub mod session;

use crate::model::character::CharacterId;
use crate::model::place::PlaceId;
use crate::model::validation::ValidationError;
use crate::model::EntityKind;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Error returned by character/place/event services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    Validation(ValidationError),
    NotFound(EntityKind, Uuid),
    /// Name (or event title) collides with another record of the same kind.
    DuplicateName { kind: EntityKind, name: String },
    UnknownCharacter(CharacterId),
    UnknownPlace(PlaceId),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(kind, id) => write!(f, "{kind} not found: {id}"),
            Self::DuplicateName {
                kind: EntityKind::Event,
                name,
            } => write!(f, "an event titled `{name}` already exists"),
            Self::DuplicateName { kind, name } => {
                write!(f, "a {kind} named `{name}` already exists")
            }
            Self::UnknownCharacter(id) => write!(f, "event references unknown character {id}"),
            Self::UnknownPlace(id) => write!(f, "event references unknown place {id}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for ServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Result of deleting a character or place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteOutcome {
    /// Number of events whose reference to the deleted record was cleared.
    pub cleared_references: usize,
}
