use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, ModelTrait,
    PaginatorTrait, QueryOrder, Set,
};

use crate::entities::movies;
use crate::models::{Movie, ValidMovie};

pub struct MovieRepository {
    conn: DatabaseConnection,
}

impl MovieRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// All movies in insertion order
    pub async fn list(&self) -> Result<Vec<Movie>> {
        let rows = movies::Entity::find()
            .order_by_asc(movies::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list movies")?;

        Ok(rows.into_iter().map(Movie::from).collect())
    }

    pub async fn get(&self, id: i32) -> Result<Option<Movie>> {
        let row = movies::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query movie by ID")?;

        Ok(row.map(Movie::from))
    }

    pub async fn count(&self) -> Result<u64> {
        movies::Entity::find()
            .count(&self.conn)
            .await
            .context("Failed to count movies")
    }

    pub async fn insert(&self, movie: &ValidMovie) -> Result<Movie> {
        let active = movies::ActiveModel {
            title: Set(movie.title().to_string()),
            year: Set(movie.year().to_string()),
            ..Default::default()
        };

        let model = active
            .insert(&self.conn)
            .await
            .context("Failed to insert movie")?;

        Ok(Movie::from(model))
    }

    /// Overwrites title and year. Returns `None` if the row does not exist.
    pub async fn update(&self, id: i32, movie: &ValidMovie) -> Result<Option<Movie>> {
        let Some(existing) = movies::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query movie for update")?
        else {
            return Ok(None);
        };

        let mut active = existing.into_active_model();
        active.title = Set(movie.title().to_string());
        active.year = Set(movie.year().to_string());

        let model = active
            .update(&self.conn)
            .await
            .context("Failed to update movie")?;

        Ok(Some(Movie::from(model)))
    }

    /// Returns `false` if there was nothing to delete.
    pub async fn delete(&self, id: i32) -> Result<bool> {
        let Some(existing) = movies::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query movie for delete")?
        else {
            return Ok(false);
        };

        existing
            .delete(&self.conn)
            .await
            .context("Failed to delete movie")?;

        Ok(true)
    }
}
