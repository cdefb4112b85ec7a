use std::sync::Arc;

use crate::config::Config;
use crate::db::Store;
use crate::services::{AuthService, MovieService, SeaOrmAuthService, SeaOrmMovieService};

/// Application context built once at startup and handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,

    pub store: Store,

    pub movies: Arc<dyn MovieService>,

    pub auth: Arc<dyn AuthService>,
}

impl AppState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_url,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        Ok(Self::with_store(config, store))
    }

    #[must_use]
    pub fn with_store(config: Config, store: Store) -> Self {
        let movies: Arc<dyn MovieService> = Arc::new(SeaOrmMovieService::new(store.clone()));
        let auth: Arc<dyn AuthService> = Arc::new(SeaOrmAuthService::new(
            store.clone(),
            config.security.clone(),
        ));

        Self {
            config: Arc::new(config),
            store,
            movies,
            auth,
        }
    }

    #[must_use]
    pub fn store(&self) -> &Store {
        &self.store
    }
}
