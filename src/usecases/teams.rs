use crate::common::context::Context;
use crate::common::error::{AppError, ServiceResult, unexpected};
use crate::models::teams::{CreateTeamRequest, Team, TeamFilters, UpdateTeamRequest};
use crate::repositories::teams;
use crate::usecases::tournaments;
use chrono::Utc;
use tracing::info;
use uuid::Uuid;

const MAX_NAME_LENGTH: usize = 50;

pub async fn create<C: Context>(ctx: &C, request: CreateTeamRequest) -> ServiceResult<Team> {
    let name = request.name.trim().to_owned();
    if name.is_empty() || name.len() > MAX_NAME_LENGTH {
        return Err(AppError::TeamsInvalidName);
    }
    if request.members.is_empty() {
        return Err(AppError::TeamsInvalidMembers);
    }
    if request.captain.trim().is_empty() {
        return Err(AppError::TeamsInvalidCaptain);
    }
    if let Some(tournament_id) = request.tournament_id {
        let tournament = tournaments::fetch_one(ctx, tournament_id).await?;
        if tournament.sport != request.sport {
            return Err(AppError::TeamsSportMismatch);
        }
    }

    let team = Team {
        id: Uuid::new_v4(),
        name,
        sport: request.sport,
        members: request.members,
        captain: request.captain,
        vice_captain: request.vice_captain,
        tournament_id: request.tournament_id,
        active: true,
        created_at: Utc::now(),
    };
    match teams::create(ctx, &team.as_row()?).await {
        Ok(()) => {
            info!(team_id = %team.id, sport = %team.sport, "Team created");
            Ok(team)
        }
        Err(e) => unexpected(e),
    }
}

pub async fn fetch_one<C: Context>(ctx: &C, team_id: Uuid) -> ServiceResult<Team> {
    match teams::fetch_one(ctx, team_id).await {
        Ok(row) => Ok(Team::try_from(row)?),
        Err(sqlx::Error::RowNotFound) => Err(AppError::TeamsNotFound),
        Err(e) => unexpected(e),
    }
}

pub async fn fetch_many<C: Context>(ctx: &C, filters: &TeamFilters) -> ServiceResult<Vec<Team>> {
    match teams::fetch_many(ctx, filters).await {
        Ok(rows) => rows.into_iter().map(Team::try_from).collect(),
        Err(e) => unexpected(e),
    }
}

pub async fn update<C: Context>(
    ctx: &C,
    team_id: Uuid,
    request: UpdateTeamRequest,
) -> ServiceResult<Team> {
    let mut team = fetch_one(ctx, team_id).await?;
    if !team.active {
        return Err(AppError::TeamsNotFound);
    }

    if let Some(name) = request.name {
        let name = name.trim().to_owned();
        if name.is_empty() || name.len() > MAX_NAME_LENGTH {
            return Err(AppError::TeamsInvalidName);
        }
        team.name = name;
    }
    if let Some(members) = request.members {
        if members.is_empty() {
            return Err(AppError::TeamsInvalidMembers);
        }
        team.members = members;
    }
    if let Some(captain) = request.captain {
        if captain.trim().is_empty() {
            return Err(AppError::TeamsInvalidCaptain);
        }
        team.captain = captain;
    }
    if let Some(vice_captain) = request.vice_captain {
        team.vice_captain = Some(vice_captain);
    }
    if let Some(tournament_id) = request.tournament_id {
        let tournament = tournaments::fetch_one(ctx, tournament_id).await?;
        if tournament.sport != team.sport {
            return Err(AppError::TeamsSportMismatch);
        }
        team.tournament_id = Some(tournament_id);
    }

    match teams::update(ctx, &team.as_row()?).await {
        Ok(()) => Ok(team),
        Err(e) => unexpected(e),
    }
}

/// Soft delete; the row stays behind so finished matches keep their
/// team names.
pub async fn deactivate<C: Context>(ctx: &C, team_id: Uuid) -> ServiceResult<()> {
    let team = fetch_one(ctx, team_id).await?;
    if !team.active {
        return Err(AppError::TeamsNotFound);
    }

    match teams::deactivate(ctx, team_id).await {
        Ok(()) => {
            info!(team_id = %team_id, "Team deactivated");
            Ok(())
        }
        Err(e) => unexpected(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::init;
    use crate::common::state::AppState;
    use crate::entities::teams::TeamMember;
    use crate::models::sports::Sport;
    use crate::settings::AppSettings;
    use std::net::{IpAddr, Ipv4Addr};
    use std::time::Duration;
    use tracing::Level;

    async fn test_state() -> AppState {
        let settings = AppSettings {
            level: Level::DEBUG,
            app_host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            app_port: 0,
            database_url: "sqlite::memory:".to_string(),
            db_max_connections: 1,
            db_wait_timeout: Duration::from_secs(5),
            store_write_attempts: 3,
            store_retry_backoff: Duration::from_millis(10),
        };
        init::initialize_state(&settings).await.unwrap()
    }

    fn roster() -> Vec<TeamMember> {
        vec![
            TeamMember {
                name: "Kiran".to_string(),
                position: Some("Forward".to_string()),
                is_captain: true,
                is_vice_captain: false,
            },
            TeamMember {
                name: "Dev".to_string(),
                position: None,
                is_captain: false,
                is_vice_captain: true,
            },
        ]
    }

    fn request(name: &str) -> CreateTeamRequest {
        CreateTeamRequest {
            name: name.to_string(),
            sport: Sport::Football,
            members: roster(),
            captain: "Kiran".to_string(),
            vice_captain: Some("Dev".to_string()),
            tournament_id: None,
        }
    }

    #[tokio::test]
    async fn test_created_team_can_be_fetched_back() {
        let ctx = test_state().await;
        let created = create(&ctx, request("United")).await.unwrap();

        let fetched = fetch_one(&ctx, created.id).await.unwrap();
        assert_eq!(fetched.name, "United");
        assert_eq!(fetched.sport, Sport::Football);
        assert_eq!(fetched.members, roster());
        assert!(fetched.active);
    }

    #[tokio::test]
    async fn test_create_rejects_blank_and_oversized_names() {
        let ctx = test_state().await;
        assert!(matches!(
            create(&ctx, request("   ")).await,
            Err(AppError::TeamsInvalidName)
        ));
        assert!(matches!(
            create(&ctx, request(&"x".repeat(51))).await,
            Err(AppError::TeamsInvalidName)
        ));
    }

    #[tokio::test]
    async fn test_create_requires_members_and_captain() {
        let ctx = test_state().await;

        let mut no_members = request("United");
        no_members.members.clear();
        assert!(matches!(
            create(&ctx, no_members).await,
            Err(AppError::TeamsInvalidMembers)
        ));

        let mut no_captain = request("United");
        no_captain.captain = " ".to_string();
        assert!(matches!(
            create(&ctx, no_captain).await,
            Err(AppError::TeamsInvalidCaptain)
        ));
    }

    #[tokio::test]
    async fn test_create_rejects_unknown_tournament() {
        let ctx = test_state().await;
        let mut orphan = request("United");
        orphan.tournament_id = Some(Uuid::new_v4());
        assert!(matches!(
            create(&ctx, orphan).await,
            Err(AppError::TournamentsNotFound)
        ));
    }

    #[tokio::test]
    async fn test_fetch_unknown_team_is_not_found() {
        let ctx = test_state().await;
        assert!(matches!(
            fetch_one(&ctx, Uuid::new_v4()).await,
            Err(AppError::TeamsNotFound)
        ));
    }

    #[tokio::test]
    async fn test_update_replaces_name_and_captain() {
        let ctx = test_state().await;
        let created = create(&ctx, request("United")).await.unwrap();

        let updated = update(
            &ctx,
            created.id,
            UpdateTeamRequest {
                name: Some("City".to_string()),
                captain: Some("Dev".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.name, "City");
        assert_eq!(updated.captain, "Dev");

        let fetched = fetch_one(&ctx, created.id).await.unwrap();
        assert_eq!(fetched.name, "City");
    }

    #[tokio::test]
    async fn test_update_validates_replacement_fields() {
        let ctx = test_state().await;
        let created = create(&ctx, request("United")).await.unwrap();

        assert!(matches!(
            update(
                &ctx,
                created.id,
                UpdateTeamRequest {
                    members: Some(vec![]),
                    ..Default::default()
                },
            )
            .await,
            Err(AppError::TeamsInvalidMembers)
        ));
    }

    #[tokio::test]
    async fn test_deactivated_team_leaves_listing() {
        let ctx = test_state().await;
        let kept = create(&ctx, request("United")).await.unwrap();
        let retired = create(&ctx, request("City")).await.unwrap();

        deactivate(&ctx, retired.id).await.unwrap();

        let listed = fetch_many(&ctx, &TeamFilters::default()).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, kept.id);

        assert!(matches!(
            deactivate(&ctx, retired.id).await,
            Err(AppError::TeamsNotFound)
        ));
    }

    #[tokio::test]
    async fn test_listing_filters_by_sport() {
        let ctx = test_state().await;
        create(&ctx, request("United")).await.unwrap();
        let mut cricket = request("Strikers");
        cricket.sport = Sport::Cricket;
        create(&ctx, cricket).await.unwrap();

        let filters = TeamFilters {
            sport: Some(Sport::Cricket),
            tournament_id: None,
        };
        let listed = fetch_many(&ctx, &filters).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "Strikers");
    }
}
