use crate::common::error::AppError;
use crate::entities::matches::MatchRow;
use crate::models::sports::{Sport, SportState};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    Upcoming,
    Live,
    Finished,
}

impl MatchStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            MatchStatus::Upcoming => "upcoming",
            MatchStatus::Live => "live",
            MatchStatus::Finished => "finished",
        }
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatchStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "upcoming" => MatchStatus::Upcoming,
            "live" => MatchStatus::Live,
            "finished" => MatchStatus::Finished,
            other => anyhow::bail!("unknown match status: {other}"),
        })
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub id: Uuid,
    pub sport: Sport,
    pub team1_id: Uuid,
    pub team2_id: Uuid,
    pub team1_name: String,
    pub team2_name: String,
    pub tournament_id: Option<Uuid>,
    pub status: MatchStatus,
    pub score1: f64,
    pub score2: f64,
    pub sport_state: Option<SportState>,
    pub duration_minutes: Option<u32>,
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

impl Match {
    pub fn as_row(&self) -> crate::common::error::ServiceResult<MatchRow> {
        let sport_state = match &self.sport_state {
            Some(state) => Some(serde_json::to_string(state)?),
            None => None,
        };
        Ok(MatchRow {
            id: self.id,
            sport: self.sport.to_string(),
            team1_id: self.team1_id,
            team2_id: self.team2_id,
            team1_name: self.team1_name.clone(),
            team2_name: self.team2_name.clone(),
            tournament_id: self.tournament_id,
            status: self.status.to_string(),
            score1: self.score1,
            score2: self.score2,
            sport_state,
            duration_minutes: self.duration_minutes.map(i64::from),
            scheduled_at: self.scheduled_at,
            start_time: self.start_time,
            end_time: self.end_time,
            venue: self.venue.clone(),
            referee: self.referee.clone(),
            winner_team_id: self.winner_team_id,
            result: self.result.clone(),
            notes: self.notes.clone(),
            revision: self.revision,
            created_at: self.created_at,
        })
    }
}

impl TryFrom<MatchRow> for Match {
    type Error = AppError;

    fn try_from(row: MatchRow) -> Result<Self, Self::Error> {
        let sport_state = match &row.sport_state {
            Some(raw) => Some(serde_json::from_str(raw)?),
            None => None,
        };
        Ok(Match {
            id: row.id,
            sport: row.sport.parse()?,
            team1_id: row.team1_id,
            team2_id: row.team2_id,
            team1_name: row.team1_name,
            team2_name: row.team2_name,
            tournament_id: row.tournament_id,
            status: row.status.parse()?,
            score1: row.score1,
            score2: row.score2,
            sport_state,
            duration_minutes: row.duration_minutes.map(|d| d as u32),
            scheduled_at: row.scheduled_at,
            start_time: row.start_time,
            end_time: row.end_time,
            venue: row.venue,
            referee: row.referee,
            winner_team_id: row.winner_team_id,
            result: row.result,
            notes: row.notes,
            revision: row.revision,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMatchRequest {
    pub sport: Sport,
    pub team1_id: Uuid,
    pub team2_id: Uuid,
    #[serde(default)]
    pub tournament_id: Option<Uuid>,
    #[serde(default)]
    pub scheduled_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub venue: Option<String>,
    #[serde(default)]
    pub referee: Option<String>,
    #[serde(default)]
    pub duration_minutes: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchFilters {
    #[serde(default)]
    pub sport: Option<Sport>,
    #[serde(default)]
    pub status: Option<MatchStatus>,
    #[serde(default)]
    pub tournament_id: Option<Uuid>,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub limit: Option<u32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchListResponse {
    pub matches: Vec<Match>,
}
