use crate::common::error::AppError;
use crate::entities::tournaments::TournamentRow;
use crate::models::sports::Sport;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TournamentStatus {
    Upcoming,
    Ongoing,
    Completed,
    Cancelled,
}

impl TournamentStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            TournamentStatus::Upcoming => "upcoming",
            TournamentStatus::Ongoing => "ongoing",
            TournamentStatus::Completed => "completed",
            TournamentStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for TournamentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TournamentStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "upcoming" => TournamentStatus::Upcoming,
            "ongoing" => TournamentStatus::Ongoing,
            "completed" => TournamentStatus::Completed,
            "cancelled" => TournamentStatus::Cancelled,
            other => anyhow::bail!("unknown tournament status: {other}"),
        })
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tournament {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub sport: Sport,
    pub status: TournamentStatus,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub team_ids: Vec<Uuid>,
    /// Filled from the matches table on detail lookups.
    pub match_ids: Vec<Uuid>,
    pub max_teams: Option<u32>,
    pub format: Option<String>,
    pub rules: Option<String>,
    pub prizes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Tournament {
    pub fn as_row(&self) -> crate::common::error::ServiceResult<TournamentRow> {
        Ok(TournamentRow {
            id: self.id,
            name: self.name.clone(),
            description: self.description.clone(),
            sport: self.sport.to_string(),
            status: self.status.to_string(),
            start_date: self.start_date,
            end_date: self.end_date,
            team_ids: serde_json::to_string(&self.team_ids)?,
            max_teams: self.max_teams.map(i64::from),
            format: self.format.clone(),
            rules: self.rules.clone(),
            prizes: self.prizes.clone(),
            created_at: self.created_at,
        })
    }
}

impl TryFrom<TournamentRow> for Tournament {
    type Error = AppError;

    fn try_from(row: TournamentRow) -> Result<Self, Self::Error> {
        Ok(Tournament {
            id: row.id,
            name: row.name,
            description: row.description,
            sport: row.sport.parse()?,
            status: row.status.parse()?,
            start_date: row.start_date,
            end_date: row.end_date,
            team_ids: serde_json::from_str(&row.team_ids)?,
            match_ids: Vec::new(),
            max_teams: row.max_teams.map(|n| n as u32),
            format: row.format,
            rules: row.rules,
            prizes: row.prizes,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTournamentRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub sport: Sport,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[serde(default)]
    pub team_ids: Vec<Uuid>,
    #[serde(default)]
    pub max_teams: Option<u32>,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub rules: Option<String>,
    #[serde(default)]
    pub prizes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTournamentRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<TournamentStatus>,
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub team_ids: Option<Vec<Uuid>>,
    #[serde(default)]
    pub max_teams: Option<u32>,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub rules: Option<String>,
    #[serde(default)]
    pub prizes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentFilters {
    #[serde(default)]
    pub sport: Option<Sport>,
    #[serde(default)]
    pub status: Option<TournamentStatus>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentListResponse {
    pub tournaments: Vec<Tournament>,
}
