use serde::Deserialize;

use super::{ValidationError, bounded_field};
use crate::constants::limits::MAX_NAME_LEN;
use crate::entities::users;

/// The owner account without its password hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub username: Option<String>,
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            username: model.username,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SettingsForm {
    pub name: Option<String>,
}

impl SettingsForm {
    /// Returns the new display name if it is present and short enough.
    pub fn validate(self) -> Result<String, ValidationError> {
        bounded_field("name", self.name, MAX_NAME_LEN)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginForm {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl LoginForm {
    /// Both fields must be non-empty; no length limit applies at login.
    pub fn into_credentials(self) -> Result<(String, String), ValidationError> {
        let username = self
            .username
            .filter(|u| !u.is_empty())
            .ok_or(ValidationError::Missing("username"))?;
        let password = self
            .password
            .filter(|p| !p.is_empty())
            .ok_or(ValidationError::Missing("password"))?;
        Ok((username, password))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(name: &str) -> SettingsForm {
        SettingsForm {
            name: Some(name.to_string()),
        }
    }

    #[test]
    fn name_limit_is_twenty_characters() {
        assert!(settings(&"x".repeat(20)).validate().is_ok());
        assert!(settings(&"x".repeat(21)).validate().is_err());
        assert!(settings("").validate().is_err());
        assert!(SettingsForm::default().validate().is_err());
    }

    #[test]
    fn login_requires_both_fields() {
        let form = LoginForm {
            username: Some("admin".to_string()),
            password: Some(String::new()),
        };
        assert_eq!(
            form.into_credentials(),
            Err(ValidationError::Missing("password"))
        );

        let form = LoginForm {
            username: Some("admin".to_string()),
            password: Some("hunter2".to_string()),
        };
        assert_eq!(
            form.into_credentials(),
            Ok(("admin".to_string(), "hunter2".to_string()))
        );
    }
}
