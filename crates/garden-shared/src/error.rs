use thiserror::Error;

/// Reasons a create or update payload is refused after it has been parsed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("name must not be blank")]
    BlankName,

    #[error("wateringFrequency must be at least 1 day")]
    ZeroWateringFrequency,
}
