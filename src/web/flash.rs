//! One-shot notifications carried in the session to the next rendered page.

use axum::response::{IntoResponse, Redirect, Response};
use tower_sessions::Session;

use super::AppError;

const FLASH_KEY: &str = "_flashes";

pub async fn push(session: &Session, message: &str) -> Result<(), AppError> {
    let mut pending: Vec<String> = session.get(FLASH_KEY).await?.unwrap_or_default();
    pending.push(message.to_string());
    session.insert(FLASH_KEY, pending).await?;
    Ok(())
}

/// Removes and returns every pending message.
pub async fn take(session: &Session) -> Result<Vec<String>, AppError> {
    Ok(session
        .remove::<Vec<String>>(FLASH_KEY)
        .await?
        .unwrap_or_default())
}

/// Queues `message` and answers with a 303 redirect to `to`.
pub async fn redirect(session: &Session, message: &str, to: &str) -> Result<Response, AppError> {
    push(session, message).await?;
    Ok(Redirect::to(to).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tower_sessions::MemoryStore;

    fn session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    #[tokio::test]
    async fn messages_are_taken_once_in_order() {
        let session = session();
        push(&session, "first").await.unwrap();
        push(&session, "second").await.unwrap();

        assert_eq!(take(&session).await.unwrap(), vec!["first", "second"]);
        assert!(take(&session).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn redirect_queues_message() {
        let session = session();
        let response = redirect(&session, "Item created.", "/").await.unwrap();

        assert_eq!(response.status(), axum::http::StatusCode::SEE_OTHER);
        assert_eq!(response.headers()["location"], "/");
        assert_eq!(take(&session).await.unwrap(), vec!["Item created."]);
    }
}
