//! Domain service for the movie list.
//!
//! Validates typed form input and returns tagged outcomes; the web layer
//! maps them to redirects and status codes.

use thiserror::Error;

use crate::models::{Movie, MovieForm, ValidationError};

/// Errors specific to movie operations.
#[derive(Debug, Error)]
pub enum MovieError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Movie {0} not found")]
    NotFound(i32),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sea_orm::DbErr> for MovieError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for MovieError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(format!("{err:#}"))
    }
}

/// Domain service trait for movie CRUD.
#[async_trait::async_trait]
pub trait MovieService: Send + Sync {
    async fn list(&self) -> Result<Vec<Movie>, MovieError>;

    /// # Errors
    ///
    /// Returns [`MovieError::NotFound`] if no movie has this id.
    async fn get(&self, id: i32) -> Result<Movie, MovieError>;

    /// Validates and inserts a new movie.
    ///
    /// # Errors
    ///
    /// Returns [`MovieError::Validation`] and stores nothing if the form is invalid.
    async fn create(&self, form: MovieForm) -> Result<Movie, MovieError>;

    /// Replaces title and year of an existing movie, keeping its id.
    ///
    /// The lookup happens before validation, so a missing movie is reported
    /// as [`MovieError::NotFound`] even when the form is also invalid.
    async fn update(&self, id: i32, form: MovieForm) -> Result<Movie, MovieError>;

    /// # Errors
    ///
    /// Returns [`MovieError::NotFound`] and changes nothing if no movie has this id.
    async fn delete(&self, id: i32) -> Result<(), MovieError>;
}
