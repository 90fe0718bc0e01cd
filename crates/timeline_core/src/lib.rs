//! Core logic for Timeline, a story planner for characters, places and
//! dated events.
//! This crate is the single source of truth for data invariants and the
//! on-disk project layout.

pub mod config;
pub mod logging;
pub mod model;
pub mod service;
pub mod storage;
pub mod timeline;

pub use config::{AppConfig, ConfigError, NamePolicy};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::character::{Character, CharacterId};
pub use model::event::{Event, EventId};
pub use model::place::{Place, PlaceId};
pub use model::project::{IntegrityError, Project};
pub use model::validation::{ValidationError, PALETTE};
pub use model::EntityKind;
pub use service::character_service::{CharacterFields, CharacterService};
pub use service::event_service::{EventFields, EventService};
pub use service::place_service::{PlaceFields, PlaceService};
pub use service::project_registry::{ProjectRegistry, DEFAULT_PROJECT_NAME};
pub use service::session::{ImageImportReport, ProjectSession, SessionError, SessionResult};
pub use service::{DeleteOutcome, ServiceError, ServiceResult};
pub use storage::{JsonProjectStore, ProjectStore, StorageError, StorageResult};
pub use timeline::{
    auto_date_range, build_timeline, quick_edit, render_text, QuickEdit, TimelineCard,
    TimelineFilter,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
