//! On-disk shape of `data.json` and its upgrade into a `Project`.
//!
//! # Responsibility
//! - Accept current documents and ones written by earlier versions of the
//!   app (no record ids, event references stored as names, `date` instead
//!   of `start_date`, blank `end_date`).
//!
//! # Invariants
//! - Records without an id get a fresh one on load; it becomes stable at
//!   the next save.
//! - Id references are kept as written so dangling ids still fail the
//!   integrity check. Name references resolve to the first record with that
//!   exact name; unknown names are dropped.

use crate::model::character::Character;
use crate::model::event::{Event, EventId};
use crate::model::place::Place;
use crate::model::project::Project;
use chrono::NaiveDate;
use log::{info, warn};
use serde::{Deserialize, Deserializer};
use std::collections::BTreeSet;
use uuid::Uuid;

#[derive(Debug, Default, Deserialize)]
pub(super) struct ProjectDocument {
    #[serde(default)]
    characters: Vec<Character>,
    #[serde(default)]
    places: Vec<Place>,
    #[serde(default)]
    events: Vec<EventDocument>,
}

#[derive(Debug, Deserialize)]
struct EventDocument {
    #[serde(default = "Uuid::new_v4")]
    id: EventId,
    title: String,
    #[serde(default)]
    description: String,
    #[serde(alias = "date")]
    start_date: NaiveDate,
    #[serde(default, deserialize_with = "blank_date_as_none")]
    end_date: Option<NaiveDate>,
    #[serde(default)]
    images: Vec<String>,
    #[serde(default)]
    characters: Vec<Reference>,
    #[serde(default)]
    places: Vec<Reference>,
}

/// Event reference as written: an id, or a record name in older files.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
enum Reference {
    Id(Uuid),
    Name(String),
}

impl ProjectDocument {
    /// Builds the in-memory project, resolving name references.
    pub(super) fn into_project(self, project: &str) -> Project {
        let ProjectDocument {
            characters,
            places,
            events,
        } = self;

        let mut counts = NameCounts::default();
        let events = events
            .into_iter()
            .map(|doc| {
                let character_ids = resolve(&doc.characters, &mut counts, |name| {
                    characters.iter().find(|c| c.name == name).map(|c| c.id)
                });
                let place_ids = resolve(&doc.places, &mut counts, |name| {
                    places.iter().find(|p| p.name == name).map(|p| p.id)
                });
                Event {
                    id: doc.id,
                    title: doc.title,
                    description: doc.description,
                    start_date: doc.start_date,
                    end_date: doc.end_date,
                    images: doc.images,
                    characters: character_ids,
                    places: place_ids,
                }
            })
            .collect();

        if counts.resolved > 0 {
            info!(
                "event=project_upgrade module=storage status=ok project={} resolved_names={}",
                project, counts.resolved
            );
        }
        if counts.dropped > 0 {
            warn!(
                "event=project_upgrade module=storage status=partial project={} dropped_names={}",
                project, counts.dropped
            );
        }

        Project {
            characters,
            places,
            events,
            ..Project::default()
        }
    }
}

#[derive(Debug, Default)]
struct NameCounts {
    resolved: usize,
    dropped: usize,
}

fn resolve(
    references: &[Reference],
    counts: &mut NameCounts,
    lookup: impl Fn(&str) -> Option<Uuid>,
) -> BTreeSet<Uuid> {
    let mut ids = BTreeSet::new();
    for reference in references {
        match reference {
            Reference::Id(id) => {
                ids.insert(*id);
            }
            Reference::Name(name) => match lookup(name) {
                Some(id) => {
                    counts.resolved += 1;
                    ids.insert(id);
                }
                None => counts.dropped += 1,
            },
        }
    }
    ids
}

fn blank_date_as_none<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}
