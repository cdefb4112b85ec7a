//! Persistence and bootstrap behaviour of the owner account and movie table.

use sea_orm::{ConnectionTrait, DbBackend, Statement};
use tower_sessions::ExpiredDeletion;
use tower_sessions::session::{Id, Record};
use tower_sessions::session_store::SessionStore;
use watchlist::config::{Config, SecurityConfig};
use watchlist::db::{OwnerChange, Store};
use watchlist::models::{MovieForm, SettingsForm};
use watchlist::services::{AuthError, MovieError};
use watchlist::state::AppState;

fn fast_security() -> SecurityConfig {
    SecurityConfig {
        argon2_memory_cost_kib: 64,
        argon2_time_cost: 1,
        argon2_parallelism: 1,
    }
}

async fn temp_state() -> AppState {
    let db_path =
        std::env::temp_dir().join(format!("watchlist-store-test-{}.db", uuid::Uuid::new_v4()));

    let mut config = Config::default();
    config.general.database_url = format!("sqlite:{}", db_path.display());
    config.security = fast_security();

    AppState::new(config)
        .await
        .expect("failed to create app state")
}

#[tokio::test]
async fn owner_is_created_once_then_updated() {
    let state = temp_state().await;

    let (created, change) = state
        .auth
        .set_owner_credentials("admin", "first")
        .await
        .unwrap();
    assert_eq!(change, OwnerChange::Created);
    assert_eq!(created.name, "Admin");

    let (updated, change) = state
        .auth
        .set_owner_credentials("root", "second")
        .await
        .unwrap();
    assert_eq!(change, OwnerChange::Updated);
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.username.as_deref(), Some("root"));

    assert!(matches!(
        state.auth.login("admin", "first").await,
        Err(AuthError::InvalidCredentials)
    ));
    assert_eq!(state.auth.login("root", "second").await.unwrap().id, created.id);
}

#[tokio::test]
async fn forge_style_owner_has_no_credentials() {
    let state = temp_state().await;

    let owner = state.store().ensure_owner_named("Grey Li").await.unwrap();
    assert_eq!(owner.username, None);

    let again = state.store().ensure_owner_named("Grey Li").await.unwrap();
    assert_eq!(again.id, owner.id);

    assert!(matches!(
        state.auth.login("Grey Li", "anything").await,
        Err(AuthError::InvalidCredentials)
    ));

    let (with_login, change) = state
        .auth
        .set_owner_credentials("grey", "pw")
        .await
        .unwrap();
    assert_eq!(change, OwnerChange::Updated);
    assert_eq!(with_login.name, "Grey Li");
}

#[tokio::test]
async fn login_without_owner_fails_generically() {
    let state = temp_state().await;

    assert!(matches!(
        state.auth.login("admin", "pw").await,
        Err(AuthError::InvalidCredentials)
    ));
}

#[tokio::test]
async fn admin_credentials_are_validated() {
    let state = temp_state().await;

    assert!(matches!(
        state.auth.set_owner_credentials("", "pw").await,
        Err(AuthError::Validation(_))
    ));
    assert!(matches!(
        state
            .auth
            .set_owner_credentials(&"u".repeat(21), "pw")
            .await,
        Err(AuthError::Validation(_))
    ));
    assert!(matches!(
        state.auth.set_owner_credentials("admin", "").await,
        Err(AuthError::Validation(_))
    ));
    assert!(state.auth.owner().await.unwrap().is_none());
}

#[tokio::test]
async fn display_name_needs_an_owner() {
    let state = temp_state().await;

    let form = SettingsForm {
        name: Some("Ann".to_string()),
    };
    assert!(matches!(
        state.auth.update_display_name(form).await,
        Err(AuthError::UserNotFound)
    ));
}

#[tokio::test]
async fn movies_keep_insertion_order() {
    let state = temp_state().await;

    for (title, year) in [("B", "2001"), ("A", "1999"), ("C", "2010")] {
        state.movies.create(MovieForm::new(title, year)).await.unwrap();
    }

    let titles: Vec<String> = state
        .movies
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|m| m.title)
        .collect();
    assert_eq!(titles, ["B", "A", "C"]);
    assert_eq!(state.store().count_movies().await.unwrap(), 3);
}

#[tokio::test]
async fn update_checks_existence_before_input() {
    let state = temp_state().await;

    assert!(matches!(
        state.movies.update(42, MovieForm::new("", "")).await,
        Err(MovieError::NotFound(42))
    ));
    assert!(matches!(
        state.movies.delete(42).await,
        Err(MovieError::NotFound(42))
    ));
}

#[tokio::test]
async fn reset_schema_drops_data() {
    let state = temp_state().await;
    state
        .movies
        .create(MovieForm::new("Arrival", "2016"))
        .await
        .unwrap();

    state.store().reset_schema().await.unwrap();

    assert_eq!(state.store().count_movies().await.unwrap(), 0);
    assert!(state.store().get_owner().await.unwrap().is_none());
}

#[tokio::test]
async fn reopening_keeps_data() {
    let db_path =
        std::env::temp_dir().join(format!("watchlist-reopen-test-{}.db", uuid::Uuid::new_v4()));
    let url = format!("sqlite:{}", db_path.display());

    {
        let state = AppState::with_store(
            Config::default(),
            Store::new(&url).await.unwrap(),
        );
        state
            .movies
            .create(MovieForm::new("Leon", "1994"))
            .await
            .unwrap();
    }

    let store = Store::new(&url).await.unwrap();
    let movies = store.list_movies().await.unwrap();
    assert_eq!(movies.len(), 1);
    assert_eq!(movies[0].title, "Leon");
}

async fn session_rows(store: &Store) -> i64 {
    let row = store
        .conn
        .query_one(Statement::from_string(
            DbBackend::Sqlite,
            "SELECT COUNT(*) AS n FROM tower_sessions",
        ))
        .await
        .unwrap()
        .unwrap();
    row.try_get("", "n").unwrap()
}

#[tokio::test]
async fn expired_sessions_are_purged() {
    let state = temp_state().await;
    let sessions = &state.store().sessions;
    let now = time::OffsetDateTime::now_utc();

    let mut stale = Record {
        id: Id::default(),
        data: Default::default(),
        expiry_date: now - time::Duration::minutes(5),
    };
    let mut live = Record {
        id: Id::default(),
        data: Default::default(),
        expiry_date: now + time::Duration::minutes(60),
    };
    sessions.create(&mut stale).await.unwrap();
    sessions.create(&mut live).await.unwrap();
    assert_eq!(session_rows(state.store()).await, 2);

    sessions.delete_expired().await.unwrap();

    assert_eq!(session_rows(state.store()).await, 1);
    assert!(sessions.load(&live.id).await.unwrap().is_some());
    assert!(sessions.load(&stale.id).await.unwrap().is_none());
}

#[tokio::test]
async fn reset_schema_keeps_session_table() {
    let state = temp_state().await;

    state.store().reset_schema().await.unwrap();

    assert_eq!(session_rows(state.store()).await, 0);
}
