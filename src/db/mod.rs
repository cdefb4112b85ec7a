use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use sea_orm_migration::MigratorTrait;
use std::path::Path;
use std::time::Duration;
use tower_sessions_sqlx_store::SqliteStore;
use tracing::info;

use crate::config::SecurityConfig;
use crate::models::{Movie, User, ValidMovie};

pub mod migrator;
pub mod repositories;

pub use repositories::user::{OwnerChange, hash_password};

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,

    /// Server-side session records, kept in the same database.
    pub sessions: SqliteStore,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        if let Some(path) = sqlite_file_path(db_url) {
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !path.exists() {
                std::fs::File::create(path)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        let sessions = SqliteStore::new(conn.get_sqlite_connection_pool().clone());
        sessions.migrate().await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn, sessions })
    }

    /// Drops every table and re-applies all migrations. The session table is
    /// dropped too, which logs everybody out.
    pub async fn reset_schema(&self) -> Result<()> {
        migrator::Migrator::fresh(&self.conn).await?;
        self.sessions.migrate().await?;
        info!("Database schema dropped and recreated");
        Ok(())
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn movie_repo(&self) -> repositories::movie::MovieRepository {
        repositories::movie::MovieRepository::new(self.conn.clone())
    }

    pub fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    pub async fn list_movies(&self) -> Result<Vec<Movie>> {
        self.movie_repo().list().await
    }

    pub async fn get_movie(&self, id: i32) -> Result<Option<Movie>> {
        self.movie_repo().get(id).await
    }

    pub async fn count_movies(&self) -> Result<u64> {
        self.movie_repo().count().await
    }

    pub async fn add_movie(&self, movie: &ValidMovie) -> Result<Movie> {
        self.movie_repo().insert(movie).await
    }

    pub async fn update_movie(&self, id: i32, movie: &ValidMovie) -> Result<Option<Movie>> {
        self.movie_repo().update(id, movie).await
    }

    pub async fn delete_movie(&self, id: i32) -> Result<bool> {
        self.movie_repo().delete(id).await
    }

    pub async fn get_owner(&self) -> Result<Option<User>> {
        self.user_repo().owner().await
    }

    pub async fn get_user(&self, id: i32) -> Result<Option<User>> {
        self.user_repo().get_by_id(id).await
    }

    pub async fn verify_owner_password(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>> {
        self.user_repo()
            .verify_owner_password(username, password)
            .await
    }

    pub async fn update_owner_name(&self, name: &str) -> Result<Option<User>> {
        self.user_repo().update_owner_name(name).await
    }

    pub async fn ensure_owner_named(&self, name: &str) -> Result<User> {
        self.user_repo().ensure_owner_named(name).await
    }

    pub async fn upsert_owner_credentials(
        &self,
        username: &str,
        password: &str,
        default_name: &str,
        config: &SecurityConfig,
    ) -> Result<(User, OwnerChange)> {
        self.user_repo()
            .upsert_owner_credentials(username, password, default_name, config)
            .await
    }
}

/// Filesystem path behind a `sqlite:` URL, or `None` for in-memory and
/// non-sqlite URLs.
fn sqlite_file_path(db_url: &str) -> Option<&Path> {
    let rest = db_url
        .strip_prefix("sqlite://")
        .or_else(|| db_url.strip_prefix("sqlite:"))?;
    let path = rest.split('?').next().unwrap_or(rest);

    if path.is_empty() || path.contains(":memory:") {
        return None;
    }

    Some(Path::new(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqlite_paths_are_extracted() {
        assert_eq!(
            sqlite_file_path("sqlite:data/watchlist.db"),
            Some(Path::new("data/watchlist.db"))
        );
        assert_eq!(
            sqlite_file_path("sqlite:///tmp/w.db?mode=rwc"),
            Some(Path::new("/tmp/w.db"))
        );
        assert_eq!(sqlite_file_path("sqlite::memory:"), None);
        assert_eq!(sqlite_file_path("postgres://localhost/db"), None);
    }
}
