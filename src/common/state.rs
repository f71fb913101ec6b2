use crate::common::context::Context;
use crate::live::{LiveMatches, MatchTopics};
use sqlx::{Pool, Sqlite};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub db: Pool<Sqlite>,
    pub live: Arc<LiveMatches>,
    pub topics: Arc<MatchTopics>,
}

impl Context for AppState {
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
