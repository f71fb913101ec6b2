pub mod live;
pub mod matches;
pub mod teams;
pub mod tournaments;

use crate::common::state::AppState;
use axum::Router;
use axum::routing::{get, post};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/matches", post(matches::create).get(matches::list))
        .route("/matches/live", get(matches::list_live))
        .route(
            "/matches/{match_id}",
            get(matches::fetch).delete(matches::delete),
        )
        .route("/matches/{match_id}/start", post(matches::start))
        .route("/matches/{match_id}/actions", post(matches::submit_action))
        .route("/matches/{match_id}/end", post(matches::end))
        .route("/matches/{match_id}/live", get(live::watch))
        .route("/teams", post(teams::create).get(teams::list))
        .route(
            "/teams/{team_id}",
            get(teams::fetch).put(teams::update).delete(teams::delete),
        )
        .route(
            "/tournaments",
            post(tournaments::create).get(tournaments::list),
        )
        .route(
            "/tournaments/{tournament_id}",
            get(tournaments::fetch)
                .put(tournaments::update)
                .delete(tournaments::delete),
        )
        .route(
            "/tournaments/{tournament_id}/teams",
            get(tournaments::list_teams),
        )
        .route(
            "/tournaments/{tournament_id}/matches",
            get(tournaments::list_matches),
        )
}
