use axum::{
    Form,
    extract::{
        Path, State,
        rejection::{FormRejection, PathRejection},
    },
    response::{Html, Response},
};
use std::sync::Arc;
use tower_sessions::Session;

use super::{AppError, PageContext, flash, views};
use crate::constants::flash::{INVALID_INPUT, ITEM_CREATED, ITEM_DELETED, ITEM_UPDATED};
use crate::models::MovieForm;
use crate::services::MovieError;
use crate::state::AppState;

/// A non-numeric id segment is treated like an unknown movie.
fn movie_id(path: Result<Path<i32>, PathRejection>) -> Result<i32, AppError> {
    let Path(id) = path?;
    Ok(id)
}

/// GET /
pub async fn index(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Html<String>, AppError> {
    let ctx = PageContext::load(&state, &session).await?;
    let movies = state.movies.list().await?;
    Ok(Html(views::index(&ctx, &movies)))
}

/// POST /
pub async fn create(
    State(state): State<Arc<AppState>>,
    session: Session,
    form: Result<Form<MovieForm>, FormRejection>,
) -> Result<Response, AppError> {
    let Form(form) = form?;

    match state.movies.create(form).await {
        Ok(_) => flash::redirect(&session, ITEM_CREATED, "/").await,
        Err(MovieError::Validation(e)) => {
            tracing::debug!("Rejected new movie: {e}");
            flash::redirect(&session, INVALID_INPUT, "/").await
        }
        Err(e) => Err(e.into()),
    }
}

/// GET /movie/edit/{id}
pub async fn edit_page(
    State(state): State<Arc<AppState>>,
    session: Session,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Html<String>, AppError> {
    let id = movie_id(path)?;
    let movie = state.movies.get(id).await?;
    let ctx = PageContext::load(&state, &session).await?;
    Ok(Html(views::edit(&ctx, &movie)))
}

/// POST /movie/edit/{id}
///
/// On invalid input the caller goes back to this movie's edit page, unlike
/// creation which always returns to the listing.
pub async fn update(
    State(state): State<Arc<AppState>>,
    session: Session,
    path: Result<Path<i32>, PathRejection>,
    form: Result<Form<MovieForm>, FormRejection>,
) -> Result<Response, AppError> {
    let id = movie_id(path)?;
    let Form(form) = form?;

    match state.movies.update(id, form).await {
        Ok(_) => flash::redirect(&session, ITEM_UPDATED, "/").await,
        Err(MovieError::Validation(e)) => {
            tracing::debug!("Rejected edit of movie {id}: {e}");
            flash::redirect(&session, INVALID_INPUT, &format!("/movie/edit/{id}")).await
        }
        Err(e) => Err(e.into()),
    }
}

/// POST /movie/delete/{id}
pub async fn delete(
    State(state): State<Arc<AppState>>,
    session: Session,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Response, AppError> {
    let id = movie_id(path)?;
    state.movies.delete(id).await?;
    flash::redirect(&session, ITEM_DELETED, "/").await
}
