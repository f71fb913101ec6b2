use crate::common::context::Context;
use crate::common::error::{AppError, ServiceResult, unexpected};
use crate::live::LiveSession;
use crate::models::live::MatchFrame;
use crate::models::matches::{Match, MatchStatus};
use crate::models::scoring::{EndMatchRequest, FootballAction, ScoreAction, SubmitActionRequest};
use crate::repositories::matches;
use crate::rules;
use crate::settings::AppSettings;
use crate::usecases::matches as match_records;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{error, info, warn};
use uuid::Uuid;

/// Snapshot plus the update stream continuing from it, handed to a viewer
/// joining a match.
pub struct Subscription {
    pub snapshot: MatchFrame,
    pub updates: UnboundedReceiver<MatchFrame>,
}

/// Moves a match from Upcoming to Live: initializes the sport's zero
/// state, stamps the start time and commits the first revision.
pub async fn start_match<C: Context>(ctx: &C, match_id: Uuid) -> ServiceResult<Match> {
    let stored = match_records::fetch_one(ctx, match_id).await?;
    if stored.status != MatchStatus::Upcoming {
        return Err(AppError::MatchesNotUpcoming);
    }

    let session = ctx.live().insert_or_existing(match_id, stored).await;
    let mut state = session.lock().await;
    if state.status != MatchStatus::Upcoming {
        return Err(AppError::MatchesNotUpcoming);
    }

    let sport_state = rules::zero_state(state.sport, state.duration_minutes);
    let (score1, score2) = rules::aggregate_scores(&sport_state);

    let mut next = state.clone();
    next.status = MatchStatus::Live;
    next.start_time = Some(Utc::now());
    next.sport_state = Some(sport_state);
    next.score1 = score1;
    next.score2 = score2;
    next.revision += 1;

    match persist_with_retry(ctx, &next, state.revision).await {
        Ok(()) => {}
        // The row moved under us, which from Upcoming only a racing start
        // can cause.
        Err(AppError::ScoringRevisionConflict) => return Err(AppError::MatchesNotUpcoming),
        Err(e) => return Err(e),
    }

    *state = next;
    publish(ctx, &state).await;
    info!(match_id = %match_id, sport = %state.sport, "Match started");
    Ok(state.clone())
}

/// Applies one scoring action to a live match. All submissions for the
/// same match are serialized on its session; the new state is committed
/// to the store and broadcast before the next submission is admitted.
pub async fn submit_action<C: Context>(
    ctx: &C,
    match_id: Uuid,
    request: SubmitActionRequest,
) -> ServiceResult<Match> {
    let action = stamp_wall_clock(request.action);

    let session = live_session(ctx, match_id).await?;
    let mut state = session.lock().await;
    if state.status != MatchStatus::Live {
        return Err(AppError::MatchesNotLive);
    }
    if let Some(expected) = request.expected_revision
        && expected != state.revision
    {
        return Err(AppError::ScoringRevisionConflict);
    }
    if action.sport() != state.sport {
        return Err(AppError::ScoringSportMismatch);
    }
    let Some(sport_state) = &state.sport_state else {
        return unexpected(anyhow::anyhow!("live match {match_id} has no sport state"));
    };

    let next_state = rules::apply(sport_state, action)?;
    let (score1, score2) = rules::aggregate_scores(&next_state);

    let mut next = state.clone();
    next.sport_state = Some(next_state);
    next.score1 = score1;
    next.score2 = score2;
    next.revision += 1;

    persist_with_retry(ctx, &next, state.revision).await?;
    *state = next;
    publish(ctx, &state).await;
    Ok(state.clone())
}

/// Moves a match from Live to Finished: freezes the sport state, stamps
/// the end time and records winner and result from the final scores.
pub async fn end_match<C: Context>(
    ctx: &C,
    match_id: Uuid,
    request: EndMatchRequest,
) -> ServiceResult<Match> {
    let session = live_session(ctx, match_id).await?;
    let mut state = session.lock().await;
    if state.status != MatchStatus::Live {
        return Err(AppError::MatchesNotLive);
    }

    let mut next = state.clone();
    next.status = MatchStatus::Finished;
    next.end_time = Some(Utc::now());
    if let Some(notes) = request.notes {
        next.notes = Some(notes);
    }
    next.winner_team_id = winner_team_id(&next);
    next.result = Some(final_result(&next));
    next.revision += 1;

    persist_with_retry(ctx, &next, state.revision).await?;
    *state = next;
    publish(ctx, &state).await;
    let finished = state.clone();
    drop(state);

    ctx.live().remove(match_id).await;
    ctx.topics().close(match_id).await;

    info!(
        match_id = %match_id,
        result = finished.result.as_deref().unwrap_or_default(),
        "Match ended"
    );
    Ok(finished)
}

/// Joins a viewer to a match. The snapshot carries the current state; the
/// receiver then yields every later revision in commit order.
pub async fn subscribe<C: Context>(ctx: &C, match_id: Uuid) -> ServiceResult<Subscription> {
    if let Some(session) = ctx.live().get(match_id).await {
        // Snapshotting while registered under the session lock pins the
        // snapshot to the exact revision the update stream continues from.
        let state = session.lock().await;
        let updates = ctx.topics().subscribe(match_id).await;
        return Ok(Subscription {
            snapshot: MatchFrame::from(&*state),
            updates,
        });
    }

    // No live session. Register first, then snapshot from the store: a
    // commit in between is delivered twice rather than skipped.
    let updates = ctx.topics().subscribe(match_id).await;
    let current = match match_records::fetch_one(ctx, match_id).await {
        Ok(current) => current,
        Err(e) => {
            drop(updates);
            ctx.topics().prune(match_id).await;
            return Err(e);
        }
    };
    Ok(Subscription {
        snapshot: MatchFrame::from(&current),
        updates,
    })
}

/// Re-registers scoring sessions for every match the store still marks
/// live, so a restart does not strand them.
pub async fn rehydrate<C: Context>(ctx: &C) -> ServiceResult<usize> {
    let rows = match matches::fetch_live(ctx).await {
        Ok(rows) => rows,
        Err(e) => return unexpected(e),
    };

    let mut restored = 0;
    for row in rows {
        let match_id = row.id;
        match Match::try_from(row) {
            Ok(m) => {
                ctx.live().insert_or_existing(match_id, m).await;
                restored += 1;
            }
            Err(e) => warn!(match_id = %match_id, "Skipping unreadable live match: {e}"),
        }
    }
    if restored > 0 {
        info!(restored, "Restored live scoring sessions");
    }
    Ok(restored)
}

/// Looks up the scoring session for a match, falling back to the store
/// for matches that went live before this process did.
async fn live_session<C: Context>(ctx: &C, match_id: Uuid) -> ServiceResult<Arc<LiveSession>> {
    if let Some(session) = ctx.live().get(match_id).await {
        return Ok(session);
    }

    let stored = match_records::fetch_one(ctx, match_id).await?;
    if stored.status != MatchStatus::Live {
        return Err(AppError::MatchesNotLive);
    }
    Ok(ctx.live().insert_or_existing(match_id, stored).await)
}

/// Goal times come from the server clock, so rule application itself
/// never has to read it.
fn stamp_wall_clock(action: ScoreAction) -> ScoreAction {
    match action {
        ScoreAction::Football(FootballAction::RecordGoal { team, scorer, .. }) => {
            ScoreAction::Football(FootballAction::RecordGoal {
                team,
                scorer,
                recorded_at: Some(Utc::now()),
            })
        }
        action => action,
    }
}

async fn publish<C: Context>(ctx: &C, state: &Match) {
    ctx.topics().publish(state.id, MatchFrame::from(state)).await;
}

async fn persist_with_retry<C: Context>(
    ctx: &C,
    next: &Match,
    expected_revision: i64,
) -> ServiceResult<()> {
    let settings = AppSettings::get();
    let row = next.as_row()?;
    let mut attempt = 0;
    loop {
        attempt += 1;
        match matches::update_checked(ctx, &row, expected_revision).await {
            Ok(true) => return Ok(()),
            Ok(false) => return Err(AppError::ScoringRevisionConflict),
            Err(e) => {
                if attempt >= settings.store_write_attempts {
                    error!(match_id = %next.id, attempt, "Giving up persisting match state: {e}");
                    return Err(AppError::StoreUnavailable);
                }
                let backoff = settings.store_retry_backoff * 2u32.pow(attempt - 1);
                warn!(
                    match_id = %next.id,
                    attempt,
                    "Persisting match state failed, retrying in {backoff:?}: {e}"
                );
                tokio::time::sleep(backoff).await;
            }
        }
    }
}

fn winner_team_id(m: &Match) -> Option<Uuid> {
    if m.score1 > m.score2 {
        Some(m.team1_id)
    } else if m.score2 > m.score1 {
        Some(m.team2_id)
    } else {
        None
    }
}

fn final_result(m: &Match) -> String {
    format!(
        "{} {}-{} {}",
        m.team1_name,
        format_score(m.score1),
        format_score(m.score2),
        m.team2_name
    )
}

/// Whole scores print as integers; chess half points keep the fraction.
fn format_score(score: f64) -> String {
    if score.fract() == 0.0 {
        format!("{}", score as i64)
    } else {
        format!("{score}")
    }
}
