use crate::api::RequestContext;
use crate::common::error::{ServiceResponse, ServiceResult};
use crate::models::teams::{
    CreateTeamRequest, Team, TeamFilters, TeamListResponse, UpdateTeamRequest,
};
use crate::usecases::teams;
use axum::Json;
use axum::extract::{Path, Query};
use axum::http::StatusCode;
use uuid::Uuid;

pub async fn create(
    ctx: RequestContext,
    Json(request): Json<CreateTeamRequest>,
) -> ServiceResponse<Team> {
    let created = teams::create(&ctx, request).await?;
    Ok(Json(created))
}

pub async fn list(
    ctx: RequestContext,
    Query(filters): Query<TeamFilters>,
) -> ServiceResponse<TeamListResponse> {
    let teams = teams::fetch_many(&ctx, &filters).await?;
    Ok(Json(TeamListResponse { teams }))
}

pub async fn fetch(ctx: RequestContext, Path(team_id): Path<Uuid>) -> ServiceResponse<Team> {
    let team = teams::fetch_one(&ctx, team_id).await?;
    Ok(Json(team))
}

pub async fn update(
    ctx: RequestContext,
    Path(team_id): Path<Uuid>,
    Json(request): Json<UpdateTeamRequest>,
) -> ServiceResponse<Team> {
    let updated = teams::update(&ctx, team_id, request).await?;
    Ok(Json(updated))
}

pub async fn delete(
    ctx: RequestContext,
    Path(team_id): Path<Uuid>,
) -> ServiceResult<StatusCode> {
    teams::deactivate(&ctx, team_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
