//! Quick-edit: change an event's references or dates from the timeline.

use crate::model::character::CharacterId;
use crate::model::event::{Event, EventId};
use crate::model::place::PlaceId;
use crate::model::EntityKind;
use crate::service::event_service::{EventFields, EventService};
use crate::service::{ServiceError, ServiceResult};
use chrono::NaiveDate;
use std::collections::BTreeSet;

/// Reduced field set; `None` leaves a field as it is.
///
/// `end_date: Some(None)` clears the end date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuickEdit {
    pub characters: Option<BTreeSet<CharacterId>>,
    pub places: Option<BTreeSet<PlaceId>>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<Option<NaiveDate>>,
}

/// Applies `edit` through `EventService::edit`, so title uniqueness and
/// reference checks run exactly as for a full edit.
pub fn quick_edit(
    service: &mut EventService<'_>,
    id: EventId,
    edit: QuickEdit,
) -> ServiceResult<Event> {
    let current = service
        .get(id)
        .ok_or(ServiceError::NotFound(EntityKind::Event, id))?;
    let mut fields = EventFields::from(current);

    if let Some(characters) = edit.characters {
        fields.characters = characters;
    }
    if let Some(places) = edit.places {
        fields.places = places;
    }
    if let Some(start_date) = edit.start_date {
        fields.start_date = start_date;
    }
    if let Some(end_date) = edit.end_date {
        fields.end_date = end_date;
    }
    service.edit(id, fields)
}
