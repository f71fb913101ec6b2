//! The whole life of a match through the public service API: teams are
//! registered, the match is created, started, scored, watched and ended.

use arena_service::common::error::AppError;
use arena_service::common::init;
use arena_service::common::state::AppState;
use arena_service::entities::teams::TeamMember;
use arena_service::models::matches::{CreateMatchRequest, Match, MatchStatus};
use arena_service::models::scoring::{
    EndMatchRequest, RallyAction, ScoreAction, SubmitActionRequest,
};
use arena_service::models::sports::{Sport, TeamSide};
use arena_service::models::teams::CreateTeamRequest;
use arena_service::settings::AppSettings;
use arena_service::usecases::{matches, scoring, teams};
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

async fn volleyball_match(ctx: &AppState) -> Match {
    let mut team_ids = Vec::new();
    for name in ["Spikers", "Blockers"] {
        let team = teams::create(
            ctx,
            CreateTeamRequest {
                name: name.to_string(),
                sport: Sport::Volleyball,
                members: vec![TeamMember {
                    name: "Riley".to_string(),
                    position: Some("Setter".to_string()),
                    is_captain: true,
                    is_vice_captain: false,
                }],
                captain: "Riley".to_string(),
                vice_captain: None,
                tournament_id: None,
            },
        )
        .await
        .unwrap();
        team_ids.push(team.id);
    }

    matches::create(
        ctx,
        CreateMatchRequest {
            sport: Sport::Volleyball,
            team1_id: team_ids[0],
            team2_id: team_ids[1],
            tournament_id: None,
            scheduled_at: None,
            venue: Some("Centre Court".to_string()),
            referee: None,
            duration_minutes: None,
        },
    )
    .await
    .unwrap()
}

fn point(side: TeamSide) -> SubmitActionRequest {
    SubmitActionRequest {
        action: ScoreAction::Volleyball(RallyAction::RecordPoint { side }),
        expected_revision: None,
    }
}

#[tokio::test]
async fn test_full_match_story() {
    let ctx = test_state().await;
    let created = volleyball_match(&ctx).await;
    assert_eq!(created.status, MatchStatus::Upcoming);
    assert_eq!(created.revision, 0);

    let started = scoring::start_match(&ctx, created.id).await.unwrap();
    assert_eq!(started.status, MatchStatus::Live);
    assert_eq!(started.revision, 1);

    let mut early_viewer = scoring::subscribe(&ctx, created.id).await.unwrap();
    assert_eq!(early_viewer.snapshot.revision, 1);

    // Team1 takes the set to love.
    for _ in 0..25 {
        scoring::submit_action(&ctx, created.id, point(TeamSide::Team1))
            .await
            .unwrap();
    }

    // A viewer joining mid-match snapshots the current revision and only
    // sees updates from there on.
    let mut late_viewer = scoring::subscribe(&ctx, created.id).await.unwrap();
    assert_eq!(late_viewer.snapshot.revision, 26);
    assert_eq!(late_viewer.snapshot.score1, 1.0);

    scoring::submit_action(&ctx, created.id, point(TeamSide::Team2))
        .await
        .unwrap();
    assert_eq!(late_viewer.updates.recv().await.unwrap().revision, 27);

    let finished = scoring::end_match(
        &ctx,
        created.id,
        EndMatchRequest {
            notes: Some("Straight sets".to_string()),
        },
    )
    .await
    .unwrap();
    assert_eq!(finished.status, MatchStatus::Finished);
    assert_eq!(finished.revision, 28);
    assert_eq!(finished.winner_team_id, Some(created.team1_id));
    assert_eq!(finished.result.as_deref(), Some("Spikers 1-0 Blockers"));

    // The early viewer saw every committed revision exactly once, in
    // order, and then the stream ended.
    let mut expected_revision = 2;
    while let Some(frame) = early_viewer.updates.recv().await {
        assert_eq!(frame.revision, expected_revision);
        expected_revision += 1;
    }
    assert_eq!(expected_revision, 29);

    assert!(matches!(
        scoring::end_match(&ctx, created.id, EndMatchRequest::default()).await,
        Err(AppError::MatchesNotLive)
    ));

    let stored = matches::fetch_one(&ctx, created.id).await.unwrap();
    assert_eq!(stored.status, MatchStatus::Finished);
    assert_eq!(stored.notes.as_deref(), Some("Straight sets"));
}

#[tokio::test]
async fn test_live_matches_cannot_be_deleted() {
    let ctx = test_state().await;
    let created = volleyball_match(&ctx).await;
    scoring::start_match(&ctx, created.id).await.unwrap();

    let live = matches::fetch_live(&ctx).await.unwrap();
    assert!(live.iter().any(|m| m.id == created.id));

    assert!(matches!(
        matches::delete(&ctx, created.id).await,
        Err(AppError::MatchesStillLive)
    ));

    scoring::end_match(&ctx, created.id, EndMatchRequest::default())
        .await
        .unwrap();
    matches::delete(&ctx, created.id).await.unwrap();
    assert!(matches!(
        matches::fetch_one(&ctx, created.id).await,
        Err(AppError::MatchesNotFound)
    ));
}

#[tokio::test]
async fn test_stale_writers_are_fenced_off() {
    let ctx = test_state().await;
    let created = volleyball_match(&ctx).await;
    scoring::start_match(&ctx, created.id).await.unwrap();

    let committed = scoring::submit_action(&ctx, created.id, point(TeamSide::Team1))
        .await
        .unwrap();
    assert_eq!(committed.revision, 2);

    let stale = SubmitActionRequest {
        action: ScoreAction::Volleyball(RallyAction::RecordPoint {
            side: TeamSide::Team2,
        }),
        expected_revision: Some(1),
    };
    assert!(matches!(
        scoring::submit_action(&ctx, created.id, stale).await,
        Err(AppError::ScoringRevisionConflict)
    ));
}
