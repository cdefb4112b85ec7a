//! `SeaORM` implementation of the `MovieService` trait.

use crate::db::Store;
use crate::models::{Movie, MovieForm};
use crate::services::movie_service::{MovieError, MovieService};
use async_trait::async_trait;
use tracing::info;

pub struct SeaOrmMovieService {
    store: Store,
}

impl SeaOrmMovieService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl MovieService for SeaOrmMovieService {
    async fn list(&self) -> Result<Vec<Movie>, MovieError> {
        Ok(self.store.list_movies().await?)
    }

    async fn get(&self, id: i32) -> Result<Movie, MovieError> {
        self.store
            .get_movie(id)
            .await?
            .ok_or(MovieError::NotFound(id))
    }

    async fn create(&self, form: MovieForm) -> Result<Movie, MovieError> {
        let valid = form.validate()?;
        let movie = self.store.add_movie(&valid).await?;

        info!(id = movie.id, title = %movie.title, "Movie created");
        Ok(movie)
    }

    async fn update(&self, id: i32, form: MovieForm) -> Result<Movie, MovieError> {
        self.get(id).await?;

        let valid = form.validate()?;
        let movie = self
            .store
            .update_movie(id, &valid)
            .await?
            .ok_or(MovieError::NotFound(id))?;

        info!(id, title = %movie.title, "Movie updated");
        Ok(movie)
    }

    async fn delete(&self, id: i32) -> Result<(), MovieError> {
        if !self.store.delete_movie(id).await? {
            return Err(MovieError::NotFound(id));
        }

        info!(id, "Movie deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ValidationError;

    #[tokio::test]
    async fn error_conversions_work() {
        let db_err = sea_orm::DbErr::Custom("test".to_string());
        let movie_err: MovieError = db_err.into();
        assert!(matches!(movie_err, MovieError::Database(_)));

        let movie_err: MovieError = ValidationError::Missing("title").into();
        assert!(matches!(movie_err, MovieError::Validation(_)));
    }
}
