use axum::{
    extract::{
        Request, State,
        rejection::{FormRejection, PathRejection},
    },
    http::StatusCode,
    middleware::Next,
    response::{Html, IntoResponse, Response},
};
use std::fmt;
use std::sync::Arc;
use tower_sessions::Session;

use super::{PageContext, views};
use crate::services::{AuthError, MovieError};
use crate::state::AppState;

/// Failures that end the request with an error page instead of a redirect.
#[derive(Debug)]
pub enum AppError {
    BadRequest(String),

    NotFound(String),

    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl AppError {
    pub fn not_found(resource: &str, id: impl fmt::Display) -> Self {
        AppError::NotFound(format!("{} {} not found", resource, id))
    }

    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::BadRequest(msg) => tracing::debug!("Bad request: {}", msg),
            AppError::NotFound(msg) => tracing::debug!("Not found: {}", msg),
            AppError::Internal(msg) => tracing::error!("Internal error: {}", msg),
        }

        let status = self.status();
        let mut response =
            (status, Html(views::error_page(&PageContext::default(), status))).into_response();
        response.extensions_mut().insert(ErrorPage(status));
        response
    }
}

/// Marks a response produced by [`AppError`] so [`render_error_page`] can
/// redraw it with the site header.
#[derive(Debug, Clone, Copy)]
struct ErrorPage(StatusCode);

/// Re-renders error pages with the owner heading and login-aware navigation.
/// Pending flashes are left for the next regular page.
pub async fn render_error_page(
    State(state): State<Arc<AppState>>,
    session: Session,
    request: Request,
    next: Next,
) -> Response {
    let response = next.run(request).await;

    let Some(&ErrorPage(status)) = response.extensions().get::<ErrorPage>() else {
        return response;
    };

    match PageContext::header(&state, &session).await {
        Ok(ctx) => (status, Html(views::error_page(&ctx, status))).into_response(),
        Err(e) => {
            tracing::warn!("Could not load page header for error page: {}", e);
            response
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(format!("{err:#}"))
    }
}

impl From<tower_sessions::session::Error> for AppError {
    fn from(err: tower_sessions::session::Error) -> Self {
        AppError::Internal(format!("Session error: {err}"))
    }
}

impl From<FormRejection> for AppError {
    fn from(rejection: FormRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::NotFound(rejection.body_text())
    }
}

impl From<MovieError> for AppError {
    fn from(err: MovieError) -> Self {
        match err {
            MovieError::NotFound(id) => AppError::not_found("Movie", id),
            MovieError::Validation(e) => AppError::BadRequest(e.to_string()),
            MovieError::Database(msg) => AppError::Internal(msg),
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Validation(e) => AppError::BadRequest(e.to_string()),
            other => AppError::Internal(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_match_error_classes() {
        assert_eq!(
            AppError::BadRequest(String::new()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::not_found("Movie", 7).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Internal("boom".to_string()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn missing_movie_maps_to_not_found() {
        let err: AppError = MovieError::NotFound(3).into();
        assert!(matches!(err, AppError::NotFound(msg) if msg == "Movie 3 not found"));
    }

    #[test]
    fn error_responses_are_marked_for_rendering() {
        let response = AppError::not_found("Movie", 1).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(matches!(
            response.extensions().get::<ErrorPage>(),
            Some(ErrorPage(StatusCode::NOT_FOUND))
        ));
    }

    #[test]
    fn credential_failures_never_render_details() {
        let err: AppError = AuthError::InvalidCredentials.into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
