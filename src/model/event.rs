use std::fmt;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::validation::{ValidationError, parse_capacity, validate_location, validate_name};

/// Free-text fields of an [`EventDraft`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextField {
    Name,
    Location,
    /// Raw capacity text; converted to a number only when the draft is validated.
    Capacity,
}

/// Date fields of an [`EventDraft`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateField {
    Date,
}

/// Any field of an [`EventDraft`], used to key per-field UI state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKey {
    Name,
    Location,
    Date,
    Capacity,
}

impl From<TextField> for FieldKey {
    fn from(field: TextField) -> Self {
        match field {
            TextField::Name => Self::Name,
            TextField::Location => Self::Location,
            TextField::Capacity => Self::Capacity,
        }
    }
}

impl From<DateField> for FieldKey {
    fn from(field: DateField) -> Self {
        match field {
            DateField::Date => Self::Date,
        }
    }
}

impl ValidationError {
    /// The draft field this error refers to.
    pub fn field(&self) -> FieldKey {
        match self {
            Self::EmptyName => FieldKey::Name,
            Self::EmptyLocation => FieldKey::Location,
            Self::InvalidCapacity(_) => FieldKey::Capacity,
        }
    }
}

/// The in-progress, not yet persisted event held by the new-event screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDraft {
    pub name: String,
    pub date: NaiveDate,
    pub location: String,
    pub capacity: String,
    /// URL of a banner uploaded by an earlier submission attempt, or empty.
    pub banner_url: String,
}

impl EventDraft {
    /// Creates an empty draft dated `today`.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            name: String::new(),
            date: today,
            location: String::new(),
            capacity: String::new(),
            banner_url: String::new(),
        }
    }

    /// Returns the current text of a free-text field.
    pub fn text(&self, field: TextField) -> &str {
        match field {
            TextField::Name => &self.name,
            TextField::Location => &self.location,
            TextField::Capacity => &self.capacity,
        }
    }

    /// Mutable access to a free-text field.
    pub(crate) fn text_mut(&mut self, field: TextField) -> &mut String {
        match field {
            TextField::Name => &mut self.name,
            TextField::Location => &mut self.location,
            TextField::Capacity => &mut self.capacity,
        }
    }

    /// Returns the value of a date field.
    pub fn date(&self, field: DateField) -> NaiveDate {
        match field {
            DateField::Date => self.date,
        }
    }

    /// Validates the draft and assembles the payload for the persistence service.
    ///
    /// Fields are checked in display order and the first failure is returned.
    pub fn validate(&self, banner_url: String) -> Result<NewEvent, ValidationError> {
        validate_name(&self.name)?;
        validate_location(&self.location)?;
        let capacity = parse_capacity(&self.capacity)?;
        Ok(NewEvent {
            name: self.name.trim().to_string(),
            date: self.date,
            location: self.location.trim().to_string(),
            capacity,
            banner_url,
        })
    }
}

/// Payload accepted by the event persistence service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEvent {
    pub name: String,
    pub date: NaiveDate,
    pub location: String,
    pub capacity: u32,
    /// Durable banner URL, or empty when the event has no banner.
    pub banner_url: String,
}

/// Handle to an image the user picked on the local machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalImage(PathBuf);

impl LocalImage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    pub fn path(&self) -> &Path {
        &self.0
    }

    /// File name for display, falling back to the full path.
    pub fn display_name(&self) -> String {
        self.0
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.0.display().to_string())
    }
}

/// Bearer credential for the current session.
#[derive(Clone, PartialEq, Eq)]
pub struct IdToken(String);

impl IdToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Never print the credential itself.
impl fmt::Debug for IdToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("IdToken(..)")
    }
}
