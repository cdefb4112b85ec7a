use axum::{
    Extension, Form,
    extract::{State, rejection::FormRejection},
    response::{Html, Response},
};
use std::sync::Arc;
use tower_sessions::Session;

use super::{AppError, CurrentUser, PageContext, flash, views};
use crate::constants::flash::{INVALID_INPUT, SETTINGS_UPDATED};
use crate::models::SettingsForm;
use crate::services::AuthError;
use crate::state::AppState;

/// GET /settings
pub async fn settings_page(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    session: Session,
) -> Result<Html<String>, AppError> {
    let ctx = PageContext::load(&state, &session).await?;
    Ok(Html(views::settings(&ctx, &user.name)))
}

/// POST /settings
pub async fn update(
    State(state): State<Arc<AppState>>,
    session: Session,
    form: Result<Form<SettingsForm>, FormRejection>,
) -> Result<Response, AppError> {
    let Form(form) = form?;

    match state.auth.update_display_name(form).await {
        Ok(_) => flash::redirect(&session, SETTINGS_UPDATED, "/").await,
        Err(AuthError::Validation(e)) => {
            tracing::debug!("Rejected display name: {e}");
            flash::redirect(&session, INVALID_INPUT, "/settings").await
        }
        Err(e) => Err(e.into()),
    }
}
