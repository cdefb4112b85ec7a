//! `SeaORM` implementation of the `AuthService` trait.

use crate::config::SecurityConfig;
use crate::constants::forge::ADMIN_NAME;
use crate::constants::limits::MAX_USERNAME_LEN;
use crate::db::{OwnerChange, Store};
use crate::models::{SettingsForm, User, ValidationError};
use crate::services::auth_service::{AuthError, AuthService};
use async_trait::async_trait;
use tracing::{info, warn};

pub struct SeaOrmAuthService {
    store: Store,
    security: SecurityConfig,
}

impl SeaOrmAuthService {
    #[must_use]
    pub const fn new(store: Store, security: SecurityConfig) -> Self {
        Self { store, security }
    }
}

#[async_trait]
impl AuthService for SeaOrmAuthService {
    async fn login(&self, username: &str, password: &str) -> Result<User, AuthError> {
        match self.store.verify_owner_password(username, password).await? {
            Some(user) => {
                info!(user_id = user.id, "Login succeeded");
                Ok(user)
            }
            None => {
                warn!("Failed login attempt");
                Err(AuthError::InvalidCredentials)
            }
        }
    }

    async fn load_user(&self, id: i32) -> Result<Option<User>, AuthError> {
        Ok(self.store.get_user(id).await?)
    }

    async fn owner(&self) -> Result<Option<User>, AuthError> {
        Ok(self.store.get_owner().await?)
    }

    async fn update_display_name(&self, form: SettingsForm) -> Result<User, AuthError> {
        let name = form.validate()?;

        let user = self
            .store
            .update_owner_name(&name)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        info!(user_id = user.id, "Display name updated");
        Ok(user)
    }

    async fn set_owner_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<(User, OwnerChange), AuthError> {
        if username.is_empty() {
            return Err(ValidationError::Missing("username").into());
        }
        if username.chars().count() > MAX_USERNAME_LEN {
            return Err(ValidationError::TooLong {
                field: "username",
                max: MAX_USERNAME_LEN,
            }
            .into());
        }
        if password.is_empty() {
            return Err(ValidationError::Missing("password").into());
        }

        let result = self
            .store
            .upsert_owner_credentials(username, password, ADMIN_NAME, &self.security)
            .await?;

        Ok(result)
    }
}
