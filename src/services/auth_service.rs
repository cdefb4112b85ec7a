//! Domain service for the owner account: login, session user lookup,
//! display-name settings and credential bootstrap.

use thiserror::Error;

use crate::db::OwnerChange;
use crate::models::{SettingsForm, User, ValidationError};

/// Errors specific to authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Deliberately carries no detail about which part did not match.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User not found")]
    UserNotFound,

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for AuthError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(format!("{err:#}"))
    }
}

/// Domain service trait for authentication.
#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    /// Verifies credentials against the owner account.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] if login fails for any reason.
    async fn login(&self, username: &str, password: &str) -> Result<User, AuthError>;

    /// Resolves a session's user id. `None` means the session is stale.
    async fn load_user(&self, id: i32) -> Result<Option<User>, AuthError>;

    /// The owner account, if one has been created.
    async fn owner(&self) -> Result<Option<User>, AuthError>;

    /// Validates and applies a new display name for the owner.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Validation`] and leaves the name unchanged if invalid.
    async fn update_display_name(&self, form: SettingsForm) -> Result<User, AuthError>;

    /// Sets the owner's username and password, creating the owner if needed.
    async fn set_owner_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<(User, OwnerChange), AuthError>;
}
