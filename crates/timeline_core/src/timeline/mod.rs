//! Timeline view over a project's events.
//!
//! # Responsibility
//! - Project events into display cards ordered by start date.
//! - Filter by date window and character/place selection.
//! - Offer quick-edit on top of the events service edit path.
//!
//! # Invariants
//! - Cards are sorted by `start_date` ascending; ties keep insertion order.
//! - An empty character or place selection matches every event.

mod quick_edit;
mod render;

use crate::model::character::CharacterId;
use crate::model::event::{Event, EventId};
use crate::model::place::PlaceId;
use crate::model::project::Project;
use chrono::NaiveDate;
use std::collections::BTreeSet;

pub use quick_edit::{quick_edit, QuickEdit};
pub use render::render_text;

/// Selection applied to the timeline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimelineFilter {
    /// Keep events referencing at least one of these characters.
    pub characters: BTreeSet<CharacterId>,
    /// Keep events referencing at least one of these places.
    pub places: BTreeSet<PlaceId>,
    /// Inclusive lower bound on the start date.
    pub from: Option<NaiveDate>,
    /// Inclusive upper bound on the start date.
    pub to: Option<NaiveDate>,
}

impl TimelineFilter {
    fn matches_selection(&self, event: &Event) -> bool {
        let characters_ok = self.characters.is_empty()
            || !self.characters.is_disjoint(&event.characters);
        let places_ok = self.places.is_empty() || !self.places.is_disjoint(&event.places);
        characters_ok && places_ok
    }

    fn matches_window(&self, event: &Event) -> bool {
        self.from.map_or(true, |from| event.start_date >= from)
            && self.to.map_or(true, |to| event.start_date <= to)
    }

    pub fn matches(&self, event: &Event) -> bool {
        self.matches_selection(event) && self.matches_window(event)
    }
}

/// One event as drawn on the timeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineCard {
    pub event_id: EventId,
    pub title: String,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub span_days: i64,
    /// Names of referenced characters, in the project's character order.
    pub characters: Vec<String>,
    /// Names of referenced places, in the project's place order.
    pub places: Vec<String>,
    /// Colour of the first referenced character that has one.
    pub accent_colour: Option<String>,
    /// First image of the event, project-relative.
    pub thumbnail: Option<String>,
}

/// Builds cards for every event matching `filter`, ordered by start date.
pub fn build_timeline(project: &Project, filter: &TimelineFilter) -> Vec<TimelineCard> {
    let mut events: Vec<&Event> = project.events.iter().filter(|e| filter.matches(e)).collect();
    // Stable sort keeps insertion order for equal start dates.
    events.sort_by_key(|event| event.start_date);
    events.into_iter().map(|event| card_for(project, event)).collect()
}

/// Earliest and latest start date among events matching the filter's
/// character/place selection; the date window is ignored.
pub fn auto_date_range(
    project: &Project,
    filter: &TimelineFilter,
) -> Option<(NaiveDate, NaiveDate)> {
    let mut dates = project
        .events
        .iter()
        .filter(|event| filter.matches_selection(event))
        .map(|event| event.start_date);
    let first = dates.next()?;
    Some(dates.fold((first, first), |(min, max), date| {
        (min.min(date), max.max(date))
    }))
}

fn card_for(project: &Project, event: &Event) -> TimelineCard {
    let characters: Vec<_> = project
        .characters
        .iter()
        .filter(|c| event.references_character(c.id))
        .collect();
    let accent_colour = characters
        .iter()
        .find(|c| !c.colour.is_empty())
        .map(|c| c.colour.clone());

    TimelineCard {
        event_id: event.id,
        title: event.title.clone(),
        description: event.description.clone(),
        start_date: event.start_date,
        end_date: event.end_date,
        span_days: event.span_days(),
        characters: characters.iter().map(|c| c.name.clone()).collect(),
        places: project
            .places
            .iter()
            .filter(|p| event.references_place(p.id))
            .map(|p| p.name.clone())
            .collect(),
        accent_colour,
        thumbnail: event.images.first().cloned(),
    }
}
