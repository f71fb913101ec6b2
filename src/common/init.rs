use crate::common::state::AppState;
use crate::live::{LiveMatches, MatchTopics};
use crate::repositories;
use crate::settings::AppSettings;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use std::sync::Arc;

pub fn initialize_logging(settings: &AppSettings) {
    tracing_subscriber::fmt()
        .with_max_level(settings.level)
        // .json()
        .with_timer(tracing_subscriber::fmt::time())
        .with_level(true)
        .compact()
        .init();
}

pub async fn initialize_state(settings: &AppSettings) -> anyhow::Result<AppState> {
    let db = initialize_db(settings).await?;
    Ok(AppState {
        db,
        live: Arc::new(LiveMatches::default()),
        topics: Arc::new(MatchTopics::default()),
    })
}

pub async fn initialize_db(settings: &AppSettings) -> anyhow::Result<Pool<Sqlite>> {
    let options = SqliteConnectOptions::from_str(&settings.database_url)?.create_if_missing(true);
    let db = SqlitePoolOptions::new()
        .acquire_timeout(settings.db_wait_timeout)
        .max_connections(settings.db_max_connections as _)
        .connect_with(options)
        .await?;
    sqlx::raw_sql(repositories::SCHEMA).execute(&db).await?;
    Ok(db)
}
