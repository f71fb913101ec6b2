use crate::common::context::Context;
use crate::common::error::{AppError, ServiceResult, unexpected};
use crate::models::matches::Match;
use crate::models::sports::Sport;
use crate::models::teams::Team;
use crate::models::tournaments::{
    CreateTournamentRequest, Tournament, TournamentFilters, TournamentStatus,
    UpdateTournamentRequest,
};
use crate::repositories::{matches, tournaments};
use crate::usecases::teams;
use chrono::Utc;
use tracing::info;
use uuid::Uuid;

const MAX_NAME_LENGTH: usize = 100;
const MAX_DESCRIPTION_LENGTH: usize = 500;
const CAPACITY_RANGE: std::ops::RangeInclusive<u32> = 2..=32;

pub async fn create<C: Context>(
    ctx: &C,
    request: CreateTournamentRequest,
) -> ServiceResult<Tournament> {
    let name = request.name.trim().to_owned();
    if name.is_empty() || name.len() > MAX_NAME_LENGTH {
        return Err(AppError::TournamentsInvalidName);
    }
    if let Some(description) = &request.description
        && description.len() > MAX_DESCRIPTION_LENGTH
    {
        return Err(AppError::TournamentsInvalidDescription);
    }
    if request.end_date <= request.start_date {
        return Err(AppError::TournamentsInvalidDates);
    }
    if let Some(max_teams) = request.max_teams
        && !CAPACITY_RANGE.contains(&max_teams)
    {
        return Err(AppError::TournamentsInvalidCapacity);
    }
    check_roster(ctx, request.sport, &request.team_ids, request.max_teams).await?;

    let tournament = Tournament {
        id: Uuid::new_v4(),
        name,
        description: request.description,
        sport: request.sport,
        status: TournamentStatus::Upcoming,
        start_date: request.start_date,
        end_date: request.end_date,
        team_ids: request.team_ids,
        match_ids: Vec::new(),
        max_teams: request.max_teams,
        format: request.format,
        rules: request.rules,
        prizes: request.prizes,
        created_at: Utc::now(),
    };
    match tournaments::create(ctx, &tournament.as_row()?).await {
        Ok(()) => {
            info!(
                tournament_id = %tournament.id,
                sport = %tournament.sport,
                "Tournament created"
            );
            Ok(tournament)
        }
        Err(e) => unexpected(e),
    }
}

pub async fn fetch_one<C: Context>(ctx: &C, tournament_id: Uuid) -> ServiceResult<Tournament> {
    let mut tournament = fetch_record(ctx, tournament_id).await?;
    tournament.match_ids = match matches::fetch_by_tournament(ctx, tournament_id).await {
        Ok(rows) => rows.into_iter().map(|row| row.id).collect(),
        Err(e) => return unexpected(e),
    };
    Ok(tournament)
}

pub async fn fetch_many<C: Context>(
    ctx: &C,
    filters: &TournamentFilters,
) -> ServiceResult<Vec<Tournament>> {
    match tournaments::fetch_many(ctx, filters).await {
        Ok(rows) => rows.into_iter().map(Tournament::try_from).collect(),
        Err(e) => unexpected(e),
    }
}

pub async fn update<C: Context>(
    ctx: &C,
    tournament_id: Uuid,
    request: UpdateTournamentRequest,
) -> ServiceResult<Tournament> {
    let mut tournament = fetch_record(ctx, tournament_id).await?;

    if let Some(name) = request.name {
        let name = name.trim().to_owned();
        if name.is_empty() || name.len() > MAX_NAME_LENGTH {
            return Err(AppError::TournamentsInvalidName);
        }
        tournament.name = name;
    }
    if let Some(description) = request.description {
        if description.len() > MAX_DESCRIPTION_LENGTH {
            return Err(AppError::TournamentsInvalidDescription);
        }
        tournament.description = Some(description);
    }
    if let Some(status) = request.status {
        tournament.status = status;
    }
    if let Some(start_date) = request.start_date {
        tournament.start_date = start_date;
    }
    if let Some(end_date) = request.end_date {
        tournament.end_date = end_date;
    }
    if tournament.end_date <= tournament.start_date {
        return Err(AppError::TournamentsInvalidDates);
    }
    if let Some(max_teams) = request.max_teams {
        if !CAPACITY_RANGE.contains(&max_teams) {
            return Err(AppError::TournamentsInvalidCapacity);
        }
        tournament.max_teams = Some(max_teams);
    }
    if let Some(team_ids) = request.team_ids {
        tournament.team_ids = team_ids;
    }
    check_roster(ctx, tournament.sport, &tournament.team_ids, tournament.max_teams).await?;
    if let Some(format) = request.format {
        tournament.format = Some(format);
    }
    if let Some(rules) = request.rules {
        tournament.rules = Some(rules);
    }
    if let Some(prizes) = request.prizes {
        tournament.prizes = Some(prizes);
    }

    match tournaments::update(ctx, &tournament.as_row()?).await {
        Ok(()) => Ok(tournament),
        Err(e) => unexpected(e),
    }
}

pub async fn delete<C: Context>(ctx: &C, tournament_id: Uuid) -> ServiceResult<()> {
    fetch_record(ctx, tournament_id).await?;
    match tournaments::delete(ctx, tournament_id).await {
        Ok(()) => {
            info!(tournament_id = %tournament_id, "Tournament deleted");
            Ok(())
        }
        Err(e) => unexpected(e),
    }
}

/// The roster in its registration order.
pub async fn teams_of<C: Context>(ctx: &C, tournament_id: Uuid) -> ServiceResult<Vec<Team>> {
    let tournament = fetch_record(ctx, tournament_id).await?;
    let mut roster = Vec::with_capacity(tournament.team_ids.len());
    for team_id in tournament.team_ids {
        roster.push(teams::fetch_one(ctx, team_id).await?);
    }
    Ok(roster)
}

pub async fn matches_of<C: Context>(ctx: &C, tournament_id: Uuid) -> ServiceResult<Vec<Match>> {
    fetch_record(ctx, tournament_id).await?;
    match matches::fetch_by_tournament(ctx, tournament_id).await {
        Ok(rows) => rows.into_iter().map(Match::try_from).collect(),
        Err(e) => unexpected(e),
    }
}

/// The tournament without its derived match list.
async fn fetch_record<C: Context>(ctx: &C, tournament_id: Uuid) -> ServiceResult<Tournament> {
    match tournaments::fetch_one(ctx, tournament_id).await {
        Ok(row) => Ok(Tournament::try_from(row)?),
        Err(sqlx::Error::RowNotFound) => Err(AppError::TournamentsNotFound),
        Err(e) => unexpected(e),
    }
}

async fn check_roster<C: Context>(
    ctx: &C,
    sport: Sport,
    team_ids: &[Uuid],
    max_teams: Option<u32>,
) -> ServiceResult<()> {
    if let Some(max_teams) = max_teams
        && team_ids.len() > max_teams as usize
    {
        return Err(AppError::TournamentsInvalidCapacity);
    }
    for team_id in team_ids {
        let team = teams::fetch_one(ctx, *team_id).await?;
        if !team.active {
            return Err(AppError::TeamsNotFound);
        }
        if team.sport != sport {
            return Err(AppError::TeamsSportMismatch);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::init;
    use crate::common::state::AppState;
    use crate::entities::teams::TeamMember;
    use crate::models::matches::CreateMatchRequest;
    use crate::models::teams::CreateTeamRequest;
    use crate::settings::AppSettings;
    use crate::usecases::matches as match_records;
    use chrono::TimeDelta;
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

    async fn team(ctx: &AppState, name: &str, sport: Sport) -> Team {
        teams::create(
            ctx,
            CreateTeamRequest {
                name: name.to_string(),
                sport,
                members: vec![TeamMember {
                    name: "Ash".to_string(),
                    position: None,
                    is_captain: true,
                    is_vice_captain: false,
                }],
                captain: "Ash".to_string(),
                vice_captain: None,
                tournament_id: None,
            },
        )
        .await
        .unwrap()
    }

    fn request(team_ids: Vec<Uuid>) -> CreateTournamentRequest {
        let start = Utc::now() + TimeDelta::days(1);
        CreateTournamentRequest {
            name: "Spring Cup".to_string(),
            description: None,
            sport: Sport::Volleyball,
            start_date: start,
            end_date: start + TimeDelta::days(7),
            team_ids,
            max_teams: Some(8),
            format: Some("knockout".to_string()),
            rules: None,
            prizes: None,
        }
    }

    #[tokio::test]
    async fn test_created_tournament_round_trips() {
        let ctx = test_state().await;
        let spikers = team(&ctx, "Spikers", Sport::Volleyball).await;
        let blockers = team(&ctx, "Blockers", Sport::Volleyball).await;

        let created = create(&ctx, request(vec![spikers.id, blockers.id]))
            .await
            .unwrap();
        assert_eq!(created.status, TournamentStatus::Upcoming);

        let fetched = fetch_one(&ctx, created.id).await.unwrap();
        assert_eq!(fetched.name, "Spring Cup");
        assert_eq!(fetched.team_ids, vec![spikers.id, blockers.id]);
        assert!(fetched.match_ids.is_empty());
    }

    #[tokio::test]
    async fn test_create_validates_name_dates_and_capacity() {
        let ctx = test_state().await;

        let mut blank = request(vec![]);
        blank.name = "  ".to_string();
        assert!(matches!(
            create(&ctx, blank).await,
            Err(AppError::TournamentsInvalidName)
        ));

        let mut backwards = request(vec![]);
        backwards.end_date = backwards.start_date;
        assert!(matches!(
            create(&ctx, backwards).await,
            Err(AppError::TournamentsInvalidDates)
        ));

        let mut solo = request(vec![]);
        solo.max_teams = Some(1);
        assert!(matches!(
            create(&ctx, solo).await,
            Err(AppError::TournamentsInvalidCapacity)
        ));

        let mut wordy = request(vec![]);
        wordy.description = Some("d".repeat(501));
        assert!(matches!(
            create(&ctx, wordy).await,
            Err(AppError::TournamentsInvalidDescription)
        ));
    }

    #[tokio::test]
    async fn test_roster_must_fit_capacity() {
        let ctx = test_state().await;
        let mut team_ids = Vec::new();
        for name in ["Aces", "Blocks", "Courts"] {
            team_ids.push(team(&ctx, name, Sport::Volleyball).await.id);
        }

        let mut crowded = request(team_ids);
        crowded.max_teams = Some(2);
        assert!(matches!(
            create(&ctx, crowded).await,
            Err(AppError::TournamentsInvalidCapacity)
        ));
    }

    #[tokio::test]
    async fn test_roster_teams_must_share_the_sport() {
        let ctx = test_state().await;
        let spikers = team(&ctx, "Spikers", Sport::Volleyball).await;
        let bowlers = team(&ctx, "Bowlers", Sport::Cricket).await;

        assert!(matches!(
            create(&ctx, request(vec![spikers.id, bowlers.id])).await,
            Err(AppError::TeamsSportMismatch)
        ));
    }

    #[tokio::test]
    async fn test_match_ids_follow_scheduled_matches() {
        let ctx = test_state().await;
        let spikers = team(&ctx, "Spikers", Sport::Volleyball).await;
        let blockers = team(&ctx, "Blockers", Sport::Volleyball).await;
        let created = create(&ctx, request(vec![spikers.id, blockers.id]))
            .await
            .unwrap();

        let m = match_records::create(
            &ctx,
            CreateMatchRequest {
                sport: Sport::Volleyball,
                team1_id: spikers.id,
                team2_id: blockers.id,
                tournament_id: Some(created.id),
                scheduled_at: None,
                venue: None,
                referee: None,
                duration_minutes: None,
            },
        )
        .await
        .unwrap();

        let fetched = fetch_one(&ctx, created.id).await.unwrap();
        assert_eq!(fetched.match_ids, vec![m.id]);

        let listed = matches_of(&ctx, created.id).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, m.id);
    }

    #[tokio::test]
    async fn test_update_moves_status_and_dates() {
        let ctx = test_state().await;
        let created = create(&ctx, request(vec![])).await.unwrap();

        let updated = update(
            &ctx,
            created.id,
            UpdateTournamentRequest {
                status: Some(TournamentStatus::Ongoing),
                end_date: Some(created.end_date + TimeDelta::days(3)),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.status, TournamentStatus::Ongoing);

        assert!(matches!(
            update(
                &ctx,
                created.id,
                UpdateTournamentRequest {
                    end_date: Some(created.start_date - TimeDelta::days(1)),
                    ..Default::default()
                },
            )
            .await,
            Err(AppError::TournamentsInvalidDates)
        ));
    }

    #[tokio::test]
    async fn test_teams_of_returns_roster_in_listed_order() {
        let ctx = test_state().await;
        let spikers = team(&ctx, "Spikers", Sport::Volleyball).await;
        let blockers = team(&ctx, "Blockers", Sport::Volleyball).await;
        let created = create(&ctx, request(vec![blockers.id, spikers.id]))
            .await
            .unwrap();

        let roster = teams_of(&ctx, created.id).await.unwrap();
        let names: Vec<&str> = roster.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Blockers", "Spikers"]);
    }

    #[tokio::test]
    async fn test_deleted_tournament_is_gone() {
        let ctx = test_state().await;
        let created = create(&ctx, request(vec![])).await.unwrap();

        delete(&ctx, created.id).await.unwrap();
        assert!(matches!(
            fetch_one(&ctx, created.id).await,
            Err(AppError::TournamentsNotFound)
        ));
        assert!(matches!(
            delete(&ctx, created.id).await,
            Err(AppError::TournamentsNotFound)
        ));
    }

    #[tokio::test]
    async fn test_listing_filters_by_status() {
        let ctx = test_state().await;
        let first = create(&ctx, request(vec![])).await.unwrap();
        let second = create(&ctx, request(vec![])).await.unwrap();
        update(
            &ctx,
            second.id,
            UpdateTournamentRequest {
                status: Some(TournamentStatus::Cancelled),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let filters = TournamentFilters {
            sport: None,
            status: Some(TournamentStatus::Upcoming),
        };
        let listed = fetch_many(&ctx, &filters).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, first.id);
    }
}
