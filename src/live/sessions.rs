use crate::models::matches::Match;
use hashbrown::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard, RwLock};
use uuid::Uuid;

/// The authoritative in-memory state of one live match. The mutex
/// serializes all submissions against this match; submissions against
/// different matches never contend with each other.
pub struct LiveSession {
    state: Mutex<Match>,
}

impl LiveSession {
    pub fn new(state: Match) -> Self {
        Self {
            state: Mutex::new(state),
        }
    }

    pub async fn lock(&self) -> MutexGuard<'_, Match> {
        self.state.lock().await
    }
}

/// Registry of matches currently being scored, keyed by match id.
#[derive(Default)]
pub struct LiveMatches {
    sessions: RwLock<HashMap<Uuid, Arc<LiveSession>>>,
}

impl LiveMatches {
    pub async fn get(&self, match_id: Uuid) -> Option<Arc<LiveSession>> {
        self.sessions.read().await.get(&match_id).cloned()
    }

    /// Registers a session for the match, or hands back the session that
    /// a racing caller registered first.
    pub async fn insert_or_existing(&self, match_id: Uuid, state: Match) -> Arc<LiveSession> {
        let mut sessions = self.sessions.write().await;
        sessions
            .entry(match_id)
            .or_insert_with(|| Arc::new(LiveSession::new(state)))
            .clone()
    }

    pub async fn remove(&self, match_id: Uuid) -> Option<Arc<LiveSession>> {
        self.sessions.write().await.remove(&match_id)
    }

    pub async fn ids(&self) -> Vec<Uuid> {
        self.sessions.read().await.keys().copied().collect()
    }
}
