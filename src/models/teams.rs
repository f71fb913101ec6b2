use crate::common::error::AppError;
use crate::entities::teams::{TeamMember, TeamRow};
use crate::models::sports::Sport;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: Uuid,
    pub name: String,
    pub sport: Sport,
    pub members: Vec<TeamMember>,
    pub captain: String,
    pub vice_captain: Option<String>,
    pub tournament_id: Option<Uuid>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl Team {
    pub fn as_row(&self) -> crate::common::error::ServiceResult<TeamRow> {
        Ok(TeamRow {
            id: self.id,
            name: self.name.clone(),
            sport: self.sport.to_string(),
            members: serde_json::to_string(&self.members)?,
            captain: self.captain.clone(),
            vice_captain: self.vice_captain.clone(),
            tournament_id: self.tournament_id,
            active: self.active,
            created_at: self.created_at,
        })
    }
}

impl TryFrom<TeamRow> for Team {
    type Error = AppError;

    fn try_from(row: TeamRow) -> Result<Self, Self::Error> {
        Ok(Team {
            id: row.id,
            name: row.name,
            sport: row.sport.parse()?,
            members: serde_json::from_str(&row.members)?,
            captain: row.captain,
            vice_captain: row.vice_captain,
            tournament_id: row.tournament_id,
            active: row.active,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTeamRequest {
    pub name: String,
    pub sport: Sport,
    pub members: Vec<TeamMember>,
    pub captain: String,
    #[serde(default)]
    pub vice_captain: Option<String>,
    #[serde(default)]
    pub tournament_id: Option<Uuid>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTeamRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub members: Option<Vec<TeamMember>>,
    #[serde(default)]
    pub captain: Option<String>,
    #[serde(default)]
    pub vice_captain: Option<String>,
    #[serde(default)]
    pub tournament_id: Option<Uuid>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamFilters {
    #[serde(default)]
    pub sport: Option<Sport>,
    #[serde(default)]
    pub tournament_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamListResponse {
    pub teams: Vec<Team>,
}
