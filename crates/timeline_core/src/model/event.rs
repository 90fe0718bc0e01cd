//! Event record.
//!
//! # Responsibility
//! - Hold the dated story beat shown on the timeline.
//! - Reference participating characters and places by id.
//!
//! # Invariants
//! - `title` is non-empty after trimming; uniqueness is enforced at the
//!   project level, not here.
//! - `end_date`, when set, is >= `start_date`.
//! - Reference sets are ordered so documents serialize deterministically.

use crate::model::character::CharacterId;
use crate::model::place::PlaceId;
use crate::model::validation::{require_image_paths, require_name, ValidationError};
use crate::model::EntityKind;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeSet;
use uuid::Uuid;

/// Stable identifier for an event.
pub type EventId = Uuid;

/// Read through `storage::document`, which also accepts older layouts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub images: Vec<String>,
    pub characters: BTreeSet<CharacterId>,
    pub places: BTreeSet<PlaceId>,
}

impl Event {
    /// Creates a point event with a generated id and no references.
    pub fn new(title: impl Into<String>, start_date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: String::new(),
            start_date,
            end_date: None,
            images: Vec::new(),
            characters: BTreeSet::new(),
            places: BTreeSet::new(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.is_nil() {
            return Err(ValidationError::NilId(EntityKind::Event));
        }
        require_name(EntityKind::Event, &self.title)?;
        if let Some(end) = self.end_date {
            if end < self.start_date {
                return Err(ValidationError::EndBeforeStart {
                    start: self.start_date,
                    end,
                });
            }
        }
        require_image_paths(EntityKind::Event, &self.images)
    }

    /// Inclusive span in days; point events span one day.
    pub fn span_days(&self) -> i64 {
        match self.end_date {
            Some(end) => (end - self.start_date).num_days() + 1,
            None => 1,
        }
    }

    pub fn references_character(&self, id: CharacterId) -> bool {
        self.characters.contains(&id)
    }

    pub fn references_place(&self, id: PlaceId) -> bool {
        self.places.contains(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::Event;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
    }

    #[test]
    fn span_counts_both_ends() {
        let mut event = Event::new("siege", date(1200, 3, 1));
        assert_eq!(event.span_days(), 1);
        event.end_date = Some(date(1200, 3, 4));
        assert_eq!(event.span_days(), 4);
    }
}
