//! Domain model for characters, places, events and projects.
//!
//! # Responsibility
//! - Define the canonical records persisted in a project document.
//! - Own field-level validation shared by services and storage.
//!
//! # Invariants
//! - Every record is identified by a stable, non-nil UUID.
//! - Events reference characters and places by id, never by name.
//! - Event end dates are never earlier than start dates.

pub mod character;
pub mod event;
pub mod place;
pub mod project;
pub mod validation;

use std::fmt::{Display, Formatter};

/// Record family owned by a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Character,
    Place,
    Event,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Character => "character",
            Self::Place => "place",
            Self::Event => "event",
        }
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
