use axum::{
    Form,
    extract::{Request, State, rejection::FormRejection},
    middleware::Next,
    response::{Html, Response},
};
use std::sync::Arc;
use tower_sessions::Session;

use super::{AppError, PageContext, flash, views};
use crate::constants::flash::{
    BAD_CREDENTIALS, GOODBYE, INVALID_INPUT, LOGIN_REQUIRED, LOGIN_SUCCESS,
};
use crate::models::{LoginForm, User};
use crate::services::AuthError;
use crate::state::AppState;

/// Session key holding the authenticated user's id.
pub const SESSION_USER_KEY: &str = "user_id";

/// The authenticated user, attached to requests that passed [`require_login`].
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// Resolves the session to a user row. A session pointing at a row that no
/// longer exists counts as anonymous.
pub async fn session_user(state: &AppState, session: &Session) -> Result<Option<User>, AppError> {
    let Some(id) = session.get::<i32>(SESSION_USER_KEY).await? else {
        return Ok(None);
    };

    Ok(state.auth.load_user(id).await?)
}

// ============================================================================
// Middleware
// ============================================================================

/// Route guard: anonymous callers are sent to the login page before the
/// handler runs.
pub async fn require_login(
    State(state): State<Arc<AppState>>,
    session: Session,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    match session_user(&state, &session).await? {
        Some(user) => {
            request.extensions_mut().insert(CurrentUser(user));
            Ok(next.run(request).await)
        }
        None => flash::redirect(&session, LOGIN_REQUIRED, "/login").await,
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /login
pub async fn login_page(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Html<String>, AppError> {
    let ctx = PageContext::load(&state, &session).await?;
    Ok(Html(views::login(&ctx)))
}

/// POST /login
pub async fn login(
    State(state): State<Arc<AppState>>,
    session: Session,
    form: Result<Form<LoginForm>, FormRejection>,
) -> Result<Response, AppError> {
    let Form(form) = form?;

    let Ok((username, password)) = form.into_credentials() else {
        return flash::redirect(&session, INVALID_INPUT, "/login").await;
    };

    match state.auth.login(&username, &password).await {
        Ok(user) => {
            session.cycle_id().await?;
            session.insert(SESSION_USER_KEY, user.id).await?;
            flash::redirect(&session, LOGIN_SUCCESS, "/").await
        }
        Err(AuthError::InvalidCredentials) => {
            flash::redirect(&session, BAD_CREDENTIALS, "/login").await
        }
        Err(e) => Err(e.into()),
    }
}

/// GET /logout
pub async fn logout(session: Session) -> Result<Response, AppError> {
    session.clear().await;
    session.cycle_id().await?;
    flash::redirect(&session, GOODBYE, "/").await
}
