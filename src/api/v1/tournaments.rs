use crate::api::RequestContext;
use crate::common::error::{ServiceResponse, ServiceResult};
use crate::models::matches::MatchListResponse;
use crate::models::teams::TeamListResponse;
use crate::models::tournaments::{
    CreateTournamentRequest, Tournament, TournamentFilters, TournamentListResponse,
    UpdateTournamentRequest,
};
use crate::usecases::tournaments;
use axum::Json;
use axum::extract::{Path, Query};
use axum::http::StatusCode;
use uuid::Uuid;

pub async fn create(
    ctx: RequestContext,
    Json(request): Json<CreateTournamentRequest>,
) -> ServiceResponse<Tournament> {
    let created = tournaments::create(&ctx, request).await?;
    Ok(Json(created))
}

pub async fn list(
    ctx: RequestContext,
    Query(filters): Query<TournamentFilters>,
) -> ServiceResponse<TournamentListResponse> {
    let tournaments = tournaments::fetch_many(&ctx, &filters).await?;
    Ok(Json(TournamentListResponse { tournaments }))
}

pub async fn fetch(
    ctx: RequestContext,
    Path(tournament_id): Path<Uuid>,
) -> ServiceResponse<Tournament> {
    let tournament = tournaments::fetch_one(&ctx, tournament_id).await?;
    Ok(Json(tournament))
}

pub async fn update(
    ctx: RequestContext,
    Path(tournament_id): Path<Uuid>,
    Json(request): Json<UpdateTournamentRequest>,
) -> ServiceResponse<Tournament> {
    let updated = tournaments::update(&ctx, tournament_id, request).await?;
    Ok(Json(updated))
}

pub async fn delete(
    ctx: RequestContext,
    Path(tournament_id): Path<Uuid>,
) -> ServiceResult<StatusCode> {
    tournaments::delete(&ctx, tournament_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_teams(
    ctx: RequestContext,
    Path(tournament_id): Path<Uuid>,
) -> ServiceResponse<TeamListResponse> {
    let teams = tournaments::teams_of(&ctx, tournament_id).await?;
    Ok(Json(TeamListResponse { teams }))
}

pub async fn list_matches(
    ctx: RequestContext,
    Path(tournament_id): Path<Uuid>,
) -> ServiceResponse<MatchListResponse> {
    let matches = tournaments::matches_of(&ctx, tournament_id).await?;
    Ok(Json(MatchListResponse { matches }))
}
