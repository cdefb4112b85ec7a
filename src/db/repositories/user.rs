use anyhow::{Context, Result};
use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryOrder, Set,
};
use tokio::task;

use crate::config::SecurityConfig;
use crate::entities::users;
use crate::models::User;

/// Whether a credential upsert created the owner row or updated it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnerChange {
    Created,
    Updated,
}

/// Access to the owner row. The application keeps a single account; the
/// owner is the row with the lowest id.
pub struct UserRepository {
    conn: DatabaseConnection,
}

impl UserRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    async fn owner_model(&self) -> Result<Option<users::Model>> {
        users::Entity::find()
            .order_by_asc(users::Column::Id)
            .one(&self.conn)
            .await
            .context("Failed to query owner account")
    }

    pub async fn owner(&self) -> Result<Option<User>> {
        Ok(self.owner_model().await?.map(User::from))
    }

    /// Get user by ID
    pub async fn get_by_id(&self, id: i32) -> Result<Option<User>> {
        let user = users::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query user by ID")?;

        Ok(user.map(User::from))
    }

    /// Checks a username/password pair against the owner account.
    ///
    /// Returns `Ok(None)` for every kind of mismatch (no owner, no
    /// credentials set, wrong username, wrong password) so callers cannot
    /// tell them apart.
    /// Note: This uses `spawn_blocking` because Argon2 hashing is CPU-intensive
    /// and would block the async runtime if run directly.
    pub async fn verify_owner_password(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>> {
        let Some(owner) = self.owner_model().await? else {
            return Ok(None);
        };

        if owner.username.as_deref() != Some(username) {
            return Ok(None);
        }

        let Some(password_hash) = owner.password_hash.clone() else {
            return Ok(None);
        };

        let password = password.to_string();

        let is_valid = task::spawn_blocking(move || {
            let parsed_hash = PasswordHash::new(&password_hash)
                .map_err(|e| anyhow::anyhow!("Invalid password hash format: {e}"))?;

            let argon2 = Argon2::default();
            Ok::<bool, anyhow::Error>(
                argon2
                    .verify_password(password.as_bytes(), &parsed_hash)
                    .is_ok(),
            )
        })
        .await
        .context("Password verification task panicked")??;

        Ok(is_valid.then(|| User::from(owner)))
    }

    /// Renames the owner. Returns `None` when no owner exists yet.
    pub async fn update_owner_name(&self, name: &str) -> Result<Option<User>> {
        let Some(owner) = self.owner_model().await? else {
            return Ok(None);
        };

        let mut active = owner.into_active_model();
        active.name = Set(name.to_string());

        let model = active
            .update(&self.conn)
            .await
            .context("Failed to update owner name")?;

        Ok(Some(User::from(model)))
    }

    /// Sets the owner's display name, creating the owner if missing.
    pub async fn ensure_owner_named(&self, name: &str) -> Result<User> {
        if let Some(user) = self.update_owner_name(name).await? {
            return Ok(user);
        }

        let active = users::ActiveModel {
            name: Set(name.to_string()),
            ..Default::default()
        };

        let model = active
            .insert(&self.conn)
            .await
            .context("Failed to create owner account")?;

        Ok(User::from(model))
    }

    /// Sets login credentials on the owner, creating it with `default_name`
    /// when no owner exists.
    pub async fn upsert_owner_credentials(
        &self,
        username: &str,
        password: &str,
        default_name: &str,
        config: &SecurityConfig,
    ) -> Result<(User, OwnerChange)> {
        let password = password.to_string();
        let config = config.clone();
        let password_hash = task::spawn_blocking(move || hash_password(&password, Some(&config)))
            .await
            .context("Password hashing task panicked")??;

        if let Some(owner) = self.owner_model().await? {
            let mut active = owner.into_active_model();
            active.username = Set(Some(username.to_string()));
            active.password_hash = Set(Some(password_hash));

            let model = active
                .update(&self.conn)
                .await
                .context("Failed to update owner credentials")?;

            return Ok((User::from(model), OwnerChange::Updated));
        }

        let active = users::ActiveModel {
            name: Set(default_name.to_string()),
            username: Set(Some(username.to_string())),
            password_hash: Set(Some(password_hash)),
            ..Default::default()
        };

        let model = active
            .insert(&self.conn)
            .await
            .context("Failed to create owner account")?;

        Ok((User::from(model), OwnerChange::Created))
    }
}

/// Hash a password using Argon2id with optional custom params.
/// If config is None, uses the crate's default params.
pub fn hash_password(password: &str, config: Option<&SecurityConfig>) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    let argon2 = if let Some(cfg) = config {
        let params = Params::new(
            cfg.argon2_memory_cost_kib,
            cfg.argon2_time_cost,
            cfg.argon2_parallelism,
            None, // output length (use default)
        )
        .map_err(|e| anyhow::anyhow!("Invalid Argon2 params: {e}"))?;
        Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
    } else {
        Argon2::default()
    };

    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {e}"))?;

    Ok(hash.to_string())
}
