use crate::models::matches::{Match, MatchStatus};
use crate::models::sports::SportState;
use serde::Serialize;
use uuid::Uuid;

/// One broadcast update on a match channel. Subscribers receive a frame
/// for every committed revision, in commit order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchFrame {
    pub match_id: Uuid,
    pub revision: i64,
    pub status: MatchStatus,
    pub score1: f64,
    pub score2: f64,
    pub sport_state: Option<SportState>,
}

impl From<&Match> for MatchFrame {
    fn from(m: &Match) -> Self {
        MatchFrame {
            match_id: m.id,
            revision: m.revision,
            status: m.status,
            score1: m.score1,
            score2: m.score2,
            sport_state: m.sport_state.clone(),
        }
    }
}
