use axum::{
    Router, middleware,
    routing::{get, post},
};
use rand::Rng;
use sha2::{Digest, Sha512};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tower_sessions::cookie::{Key, SameSite};
use tower_sessions::{Expiry, Session, SessionManagerLayer};

use crate::config::ServerConfig;
use crate::state::AppState;

mod assets;
pub mod auth;
mod error;
pub mod flash;
mod movies;
mod settings;
pub mod views;

pub use auth::CurrentUser;
pub use error::AppError;
pub use views::PageContext;

impl PageContext {
    /// Gathers the owner, the session's authentication state and the pending
    /// flashes (consuming them).
    pub async fn load(state: &AppState, session: &Session) -> Result<Self, AppError> {
        let mut ctx = Self::header(state, session).await?;
        ctx.flashes = flash::take(session).await?;
        Ok(ctx)
    }

    /// Owner and authentication state only; pending flashes stay queued.
    pub async fn header(state: &AppState, session: &Session) -> Result<Self, AppError> {
        let authenticated = auth::session_user(state, session).await?.is_some();
        let owner = state.auth.owner().await?;

        Ok(Self {
            owner,
            authenticated,
            flashes: Vec::new(),
        })
    }
}

/// Derives the 64-byte cookie signing key from the configured secret, or
/// from random bytes when none is configured.
#[must_use]
pub fn session_key(server: &ServerConfig) -> Key {
    let digest = match &server.session_secret {
        Some(secret) => Sha512::digest(secret.as_bytes()),
        None => {
            tracing::warn!(
                "No session secret configured; generated a random one. Sessions will not survive a restart"
            );
            let bytes: [u8; 32] = rand::rng().random();
            Sha512::digest(bytes)
        }
    };

    Key::from(digest.as_slice())
}

pub fn router(state: Arc<AppState>) -> Router {
    let server = state.config.server.clone();

    let session_layer = SessionManagerLayer::new(state.store().sessions.clone())
        .with_name(server.cookie_name.clone())
        .with_secure(server.secure_cookies)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::minutes(
            server.session_inactivity_minutes,
        )))
        .with_signed(session_key(&server));

    let protected_routes = create_protected_router(state.clone());

    Router::new()
        .merge(protected_routes)
        .route("/", get(movies::index).post(movies::create))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/static/{*path}", get(assets::serve_asset))
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            error::render_error_page,
        ))
        .layer(session_layer)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn create_protected_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/movie/edit/{id}",
            get(movies::edit_page).post(movies::update),
        )
        .route("/movie/delete/{id}", post(movies::delete))
        .route(
            "/settings",
            get(settings::settings_page).post(settings::update),
        )
        .route("/logout", get(auth::logout))
        .route_layer(middleware::from_fn_with_state(state, auth::require_login))
}

async fn not_found() -> AppError {
    AppError::NotFound("No such route".to_string())
}
