use crate::common::context::Context;
use crate::common::error::{AppError, ServiceResult, unexpected};
use crate::models::matches::{CreateMatchRequest, Match, MatchFilters, MatchStatus};
use crate::repositories::matches;
use crate::rules::football;
use crate::usecases::{teams, tournaments};
use chrono::Utc;
use tracing::info;
use uuid::Uuid;

pub async fn create<C: Context>(ctx: &C, request: CreateMatchRequest) -> ServiceResult<Match> {
    if request.team1_id == request.team2_id {
        return Err(AppError::MatchesTeamsIdentical);
    }
    if let Some(duration) = request.duration_minutes
        && !football::DURATION_PRESETS.contains(&duration)
    {
        return Err(AppError::MatchesInvalidDuration);
    }

    let team1 = teams::fetch_one(ctx, request.team1_id).await?;
    let team2 = teams::fetch_one(ctx, request.team2_id).await?;
    if !team1.active || !team2.active {
        return Err(AppError::TeamsNotFound);
    }
    if team1.sport != request.sport || team2.sport != request.sport {
        return Err(AppError::TeamsSportMismatch);
    }
    if let Some(tournament_id) = request.tournament_id {
        tournaments::fetch_one(ctx, tournament_id).await?;
    }

    let now = Utc::now();
    let m = Match {
        id: Uuid::new_v4(),
        sport: request.sport,
        team1_id: team1.id,
        team2_id: team2.id,
        team1_name: team1.name,
        team2_name: team2.name,
        tournament_id: request.tournament_id,
        status: MatchStatus::Upcoming,
        score1: 0.0,
        score2: 0.0,
        sport_state: None,
        duration_minutes: request.duration_minutes,
        scheduled_at: request.scheduled_at.unwrap_or(now),
        start_time: None,
        end_time: None,
        venue: request.venue,
        referee: request.referee,
        winner_team_id: None,
        result: None,
        notes: None,
        revision: 0,
        created_at: now,
    };
    match matches::create(ctx, &m.as_row()?).await {
        Ok(()) => {
            info!(match_id = %m.id, sport = %m.sport, "Match created");
            Ok(m)
        }
        Err(e) => unexpected(e),
    }
}

pub async fn fetch_one<C: Context>(ctx: &C, match_id: Uuid) -> ServiceResult<Match> {
    match matches::fetch_one(ctx, match_id).await {
        Ok(row) => Match::try_from(row),
        Err(sqlx::Error::RowNotFound) => Err(AppError::MatchesNotFound),
        Err(e) => unexpected(e),
    }
}

pub async fn fetch_many<C: Context>(
    ctx: &C,
    filters: &MatchFilters,
) -> ServiceResult<Vec<Match>> {
    match matches::fetch_many(ctx, filters).await {
        Ok(rows) => rows.into_iter().map(Match::try_from).collect(),
        Err(e) => unexpected(e),
    }
}

pub async fn fetch_live<C: Context>(ctx: &C) -> ServiceResult<Vec<Match>> {
    match matches::fetch_live(ctx).await {
        Ok(rows) => rows.into_iter().map(Match::try_from).collect(),
        Err(e) => unexpected(e),
    }
}

/// Removing a live match would orphan its scoring session; it has to be
/// ended first.
pub async fn delete<C: Context>(ctx: &C, match_id: Uuid) -> ServiceResult<()> {
    let m = fetch_one(ctx, match_id).await?;
    if m.status == MatchStatus::Live {
        return Err(AppError::MatchesStillLive);
    }
    match matches::delete(ctx, match_id).await {
        Ok(()) => {
            ctx.live().remove(match_id).await;
            ctx.topics().close(match_id).await;
            info!(match_id = %match_id, "Match deleted");
            Ok(())
        }
        Err(e) => unexpected(e),
    }
}
