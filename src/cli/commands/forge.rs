use crate::config::Config;
use crate::constants::forge::{OWNER_NAME, SAMPLE_MOVIES};
use crate::models::MovieForm;
use crate::state::AppState;

/// Names the owner and inserts the sample movies.
pub async fn cmd_forge(config: &Config) -> anyhow::Result<()> {
    let state = AppState::new(config.clone()).await?;

    state.store().ensure_owner_named(OWNER_NAME).await?;

    for (title, year) in SAMPLE_MOVIES {
        state.movies.create(MovieForm::new(*title, *year)).await?;
    }

    println!("Done.");
    Ok(())
}
