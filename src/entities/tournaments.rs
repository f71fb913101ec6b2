use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// A tournament as stored in the `tournaments` table. `team_ids` is a JSON
/// column holding an array of team ids; the matches played under a tournament
/// are found through `matches.tournament_id`.
#[derive(Debug, Clone, FromRow)]
pub struct TournamentRow {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub sport: String,
    pub status: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub team_ids: String,
    pub max_teams: Option<i64>,
    pub format: Option<String>,
    pub rules: Option<String>,
    pub prizes: Option<String>,
    pub created_at: DateTime<Utc>,
}
