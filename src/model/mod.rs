mod event;
mod validation;

pub use event::{DateField, EventDraft, FieldKey, IdToken, LocalImage, NewEvent, TextField};
pub use validation::{ValidationError, parse_capacity, validate_location, validate_name};
