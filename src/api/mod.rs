use crate::common::context::Context;
use crate::common::init;
use crate::common::state::AppState;
use crate::live::{LiveMatches, MatchTopics};
use crate::settings::AppSettings;
use crate::usecases::scoring;
use crate::workers::clock;
use axum::Router;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use sqlx::{Pool, Sqlite};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

pub mod v1;

pub struct RequestContext {
    pub db: Pool<Sqlite>,
    pub live: Arc<LiveMatches>,
    pub topics: Arc<MatchTopics>,
}

pub fn router() -> Router<AppState> {
    Router::new().nest("/api/v1", v1::router())
}

pub async fn serve(settings: &AppSettings) -> anyhow::Result<()> {
    let state = init::initialize_state(settings).await?;
    if let Err(e) = scoring::rehydrate(&state).await {
        anyhow::bail!("Failed to restore live scoring sessions: {e}");
    }
    let clock = clock::spawn(state.clone());

    let app = router().with_state(state);
    let addr = SocketAddr::from((settings.app_host, settings.app_port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Serving on {addr}");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    clock.abort();
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

impl FromRequestParts<AppState> for RequestContext {
    type Rejection = Infallible;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self {
            db: state.db.clone(),
            live: state.live.clone(),
            topics: state.topics.clone(),
        })
    }
}

impl Context for RequestContext {
    fn db(&self) -> &Pool<Sqlite> {
        &self.db
    }

    fn live(&self) -> &LiveMatches {
        &self.live
    }

    fn topics(&self) -> &MatchTopics {
        &self.topics
    }
}
