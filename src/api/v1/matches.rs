use crate::api::RequestContext;
use crate::common::error::{ServiceResponse, ServiceResult};
use crate::models::matches::{CreateMatchRequest, Match, MatchFilters, MatchListResponse};
use crate::models::scoring::{EndMatchRequest, SubmitActionRequest};
use crate::usecases::{matches, scoring};
use axum::Json;
use axum::extract::{Path, Query};
use axum::http::StatusCode;
use uuid::Uuid;

pub async fn create(
    ctx: RequestContext,
    Json(request): Json<CreateMatchRequest>,
) -> ServiceResponse<Match> {
    let created = matches::create(&ctx, request).await?;
    Ok(Json(created))
}

pub async fn list(
    ctx: RequestContext,
    Query(filters): Query<MatchFilters>,
) -> ServiceResponse<MatchListResponse> {
    let matches = matches::fetch_many(&ctx, &filters).await?;
    Ok(Json(MatchListResponse { matches }))
}

pub async fn list_live(ctx: RequestContext) -> ServiceResponse<MatchListResponse> {
    let matches = matches::fetch_live(&ctx).await?;
    Ok(Json(MatchListResponse { matches }))
}

pub async fn fetch(
    ctx: RequestContext,
    Path(match_id): Path<Uuid>,
) -> ServiceResponse<Match> {
    let m = matches::fetch_one(&ctx, match_id).await?;
    Ok(Json(m))
}

pub async fn delete(
    ctx: RequestContext,
    Path(match_id): Path<Uuid>,
) -> ServiceResult<StatusCode> {
    matches::delete(&ctx, match_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn start(
    ctx: RequestContext,
    Path(match_id): Path<Uuid>,
) -> ServiceResponse<Match> {
    let started = scoring::start_match(&ctx, match_id).await?;
    Ok(Json(started))
}

pub async fn submit_action(
    ctx: RequestContext,
    Path(match_id): Path<Uuid>,
    Json(request): Json<SubmitActionRequest>,
) -> ServiceResponse<Match> {
    let committed = scoring::submit_action(&ctx, match_id, request).await?;
    Ok(Json(committed))
}

pub async fn end(
    ctx: RequestContext,
    Path(match_id): Path<Uuid>,
    request: Option<Json<EndMatchRequest>>,
) -> ServiceResponse<Match> {
    let request = request.map(|Json(r)| r).unwrap_or_default();
    let finished = scoring::end_match(&ctx, match_id, request).await?;
    Ok(Json(finished))
}
