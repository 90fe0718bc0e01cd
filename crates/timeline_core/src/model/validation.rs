//! Field validation shared by every record type.
//!
//! # Invariants
//! - Validation never mutates its input.
//! - Colours are either empty or `#RRGGBB`.

use crate::model::EntityKind;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static HEX_COLOUR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("valid colour regex"));

const MAX_PROJECT_NAME_CHARS: usize = 128;

/// Named colours offered to writers when tagging a character.
pub const PALETTE: [(&str, &str); 7] = [
    ("Baby pink", "#F8C8DC"),
    ("Light blue", "#A7C7E7"),
    ("Light green", "#BEE5B0"),
    ("Red", "#EF4444"),
    ("Turquoise", "#40E0D0"),
    ("Butter yellow", "#FFE08A"),
    ("Light brown", "#C8A27E"),
];

/// Field-level validation failure for a record or project name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Record id is the nil UUID.
    NilId(EntityKind),
    /// Name (or title for events) is empty after trimming.
    EmptyName(EntityKind),
    /// Colour is neither empty nor `#RRGGBB`.
    InvalidColour(String),
    /// End date precedes start date.
    EndBeforeStart { start: NaiveDate, end: NaiveDate },
    /// An image path entry is blank.
    EmptyImagePath(EntityKind),
    /// Project name cannot be used as a folder name.
    InvalidProjectName(String),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId(kind) => write!(f, "{kind} id must not be nil"),
            Self::EmptyName(EntityKind::Event) => write!(f, "event title must not be empty"),
            Self::EmptyName(kind) => write!(f, "{kind} name must not be empty"),
            Self::InvalidColour(value) => {
                write!(f, "invalid colour `{value}`; expected empty or #RRGGBB")
            }
            Self::EndBeforeStart { start, end } => {
                write!(f, "end date ({end}) must be >= start date ({start})")
            }
            Self::EmptyImagePath(kind) => write!(f, "{kind} image path must not be empty"),
            Self::InvalidProjectName(name) => write!(f, "invalid project name `{name}`"),
        }
    }
}

impl Error for ValidationError {}

pub(crate) fn require_name(kind: EntityKind, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyName(kind));
    }
    Ok(())
}

pub(crate) fn require_image_paths(
    kind: EntityKind,
    images: &[String],
) -> Result<(), ValidationError> {
    if images.iter().any(|path| path.trim().is_empty()) {
        return Err(ValidationError::EmptyImagePath(kind));
    }
    Ok(())
}

/// Returns whether `value` is an accepted colour (empty or `#RRGGBB`).
pub fn is_valid_colour(value: &str) -> bool {
    value.is_empty() || HEX_COLOUR_RE.is_match(value)
}

/// Validates a project name used verbatim as a folder name.
///
/// Rejects blank names, path separators, `.`/`..`, hidden names and names
/// longer than 128 characters.
pub fn validate_project_name(name: &str) -> Result<(), ValidationError> {
    let trimmed = name.trim();
    let invalid = trimmed.is_empty()
        || trimmed != name
        || trimmed.starts_with('.')
        || trimmed.contains(['/', '\\', '\0'])
        || trimmed.chars().count() > MAX_PROJECT_NAME_CHARS;
    if invalid {
        return Err(ValidationError::InvalidProjectName(name.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{is_valid_colour, validate_project_name, PALETTE};

    #[test]
    fn palette_colours_are_valid() {
        for (_, hex) in PALETTE {
            assert!(is_valid_colour(hex), "{hex} should be valid");
        }
        assert!(is_valid_colour(""));
        assert!(!is_valid_colour("red"));
        assert!(!is_valid_colour("#12345"));
    }

    #[test]
    fn project_name_rules() {
        assert!(validate_project_name("default").is_ok());
        assert!(validate_project_name("My Novel").is_ok());
        for bad in ["", "  ", ".", "..", ".hidden", "a/b", "a\\b", " padded "] {
            assert!(validate_project_name(bad).is_err(), "`{bad}` should be rejected");
        }
        assert!(validate_project_name(&"x".repeat(129)).is_err());
    }
}
