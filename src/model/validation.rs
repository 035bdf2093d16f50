use thiserror::Error;

/// Validation errors for event draft fields.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("event name cannot be empty")]
    EmptyName,
    #[error("event location cannot be empty")]
    EmptyLocation,
    #[error("capacity must be a positive whole number, got {0:?}")]
    InvalidCapacity(String),
}

/// Validates an event name: must contain something other than whitespace.
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        Err(ValidationError::EmptyName)
    } else {
        Ok(())
    }
}

/// Validates an event location: must contain something other than whitespace.
pub fn validate_location(location: &str) -> Result<(), ValidationError> {
    if location.trim().is_empty() {
        Err(ValidationError::EmptyLocation)
    } else {
        Ok(())
    }
}

/// Parses the capacity text typed by the user.
///
/// Surrounding whitespace is ignored. Zero, negative, fractional and
/// non-numeric input are all rejected.
pub fn parse_capacity(capacity: &str) -> Result<u32, ValidationError> {
    match capacity.trim().parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ValidationError::InvalidCapacity(capacity.to_string())),
    }
}
