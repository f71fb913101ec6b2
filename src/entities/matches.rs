use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// A match as stored in the `matches` table. Sport state is a JSON column;
/// the typed view lives in `models::matches::Match`.
#[derive(Debug, Clone, FromRow)]
pub struct MatchRow {
    pub id: Uuid,
    pub sport: String,
    pub team1_id: Uuid,
    pub team2_id: Uuid,
    pub team1_name: String,
    pub team2_name: String,
    pub tournament_id: Option<Uuid>,
    pub status: String,
    pub score1: f64,
    pub score2: f64,
    pub sport_state: Option<String>,
    pub duration_minutes: Option<i64>,
    pub scheduled_at: DateTime<Utc>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub venue: Option<String>,
    pub referee: Option<String>,
    pub winner_team_id: Option<Uuid>,
    pub result: Option<String>,
    pub notes: Option<String>,
    pub revision: i64,
    pub created_at: DateTime<Utc>,
}
