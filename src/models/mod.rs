pub mod movie;
pub mod user;

pub use movie::{Movie, MovieForm, ValidMovie};
pub use user::{LoginForm, SettingsForm, User};

use thiserror::Error;

/// A form field that was missing, empty or too long.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Missing(&'static str),

    #[error("{field} must be {max} characters or less")]
    TooLong { field: &'static str, max: usize },
}

/// Returns the field value if present, non-empty and at
/// most `max` characters long. Length counts characters, not bytes.
pub(crate) fn bounded_field(
    field: &'static str,
    value: Option<String>,
    max: usize,
) -> Result<String, ValidationError> {
    let value = value
        .filter(|v| !v.is_empty())
        .ok_or(ValidationError::Missing(field))?;

    if value.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }

    Ok(value)
}
