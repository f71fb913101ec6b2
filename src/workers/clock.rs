use crate::common::context::Context;
use crate::common::state::AppState;
use crate::models::matches::Match;
use crate::models::scoring::{
    BasketballAction, ChessAction, FootballAction, ScoreAction, SubmitActionRequest,
};
use crate::models::sports::SportState;
use crate::usecases::scoring;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::debug;

const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Drives the once-per-second countdowns of every live match whose clock
/// is running. Ticks go through the same submission path as operator
/// actions, so they commit revisions and broadcast like any other change.
pub fn spawn(state: AppState) -> JoinHandle<()> {
    tokio::spawn(run(state))
}

async fn run(state: AppState) {
    let mut interval = tokio::time::interval(TICK_INTERVAL);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    loop {
        interval.tick().await;
        tick_all(&state).await;
    }
}

async fn tick_all(ctx: &AppState) {
    for match_id in ctx.live().ids().await {
        let Some(session) = ctx.live().get(match_id).await else {
            continue;
        };
        let action = {
            let state = session.lock().await;
            tick_action(&state)
        };
        let Some(action) = action else {
            continue;
        };

        let request = SubmitActionRequest {
            action,
            expected_revision: None,
        };
        // A match can end or pause between the check and the submission;
        // the rejected tick is simply dropped.
        if let Err(e) = scoring::submit_action(ctx, match_id, request).await {
            debug!(match_id = %match_id, "Tick not applied: {e}");
        }
    }
}

/// The tick this match needs right now, if any. Cricket and the rally
/// sports have no clock; basketball and chess clocks park at zero until
/// an operator acts.
fn tick_action(state: &Match) -> Option<ScoreAction> {
    match state.sport_state.as_ref()? {
        SportState::Football(football) if football.clock_running => {
            Some(ScoreAction::Football(FootballAction::Tick))
        }
        SportState::Basketball(basketball)
            if basketball.clock_running && basketball.seconds_remaining > 0 =>
        {
            Some(ScoreAction::Basketball(BasketballAction::Tick))
        }
        SportState::Chess(chess) if *chess.clocks.get(chess.active_side) > 0 => {
            Some(ScoreAction::Chess(ChessAction::Tick))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::matches::MatchStatus;
    use crate::models::scoring::CricketAction;
    use crate::models::sports::Sport;
    use crate::rules;
    use chrono::Utc;
    use uuid::Uuid;

    fn live_match(sport: Sport, sport_state: SportState) -> Match {
        let now = Utc::now();
        Match {
            id: Uuid::new_v4(),
            sport,
            team1_id: Uuid::new_v4(),
            team2_id: Uuid::new_v4(),
            team1_name: "Home".to_string(),
            team2_name: "Away".to_string(),
            tournament_id: None,
            status: MatchStatus::Live,
            score1: 0.0,
            score2: 0.0,
            sport_state: Some(sport_state),
            duration_minutes: None,
            scheduled_at: now,
            start_time: Some(now),
            end_time: None,
            venue: None,
            referee: None,
            winner_team_id: None,
            result: None,
            notes: None,
            revision: 1,
            created_at: now,
        }
    }

    #[test]
    fn test_football_ticks_only_while_clock_runs() {
        let parked = live_match(Sport::Football, rules::zero_state(Sport::Football, None));
        assert_eq!(tick_action(&parked), None);

        let kicked_off = rules::apply(
            parked.sport_state.as_ref().unwrap(),
            ScoreAction::Football(FootballAction::Kickoff),
        )
        .unwrap();
        let running = live_match(Sport::Football, kicked_off);
        assert_eq!(
            tick_action(&running),
            Some(ScoreAction::Football(FootballAction::Tick))
        );
    }

    #[test]
    fn test_chess_ticks_until_the_active_clock_empties() {
        let fresh = live_match(Sport::Chess, rules::zero_state(Sport::Chess, None));
        assert_eq!(
            tick_action(&fresh),
            Some(ScoreAction::Chess(ChessAction::Tick))
        );

        let mut drained = fresh.sport_state.clone().unwrap();
        for _ in 0..rules::chess::CLOCK_SECONDS {
            drained = rules::apply(&drained, ScoreAction::Chess(ChessAction::Tick)).unwrap();
        }
        let expired = live_match(Sport::Chess, drained);
        assert_eq!(tick_action(&expired), None);
    }

    #[test]
    fn test_clockless_sports_never_tick() {
        for sport in [Sport::Cricket, Sport::Volleyball, Sport::TableTennis] {
            let m = live_match(sport, rules::zero_state(sport, None));
            assert_eq!(tick_action(&m), None);
        }
    }

    #[test]
    fn test_missing_sport_state_never_ticks() {
        let mut m = live_match(Sport::Football, rules::zero_state(Sport::Football, None));
        m.sport_state = None;
        assert_eq!(tick_action(&m), None);
    }

    #[test]
    fn test_scoring_actions_do_not_make_cricket_tick() {
        let m = live_match(Sport::Cricket, rules::zero_state(Sport::Cricket, None));
        let after = rules::apply(
            m.sport_state.as_ref().unwrap(),
            ScoreAction::Cricket(CricketAction::RecordRun { runs: 4 }),
        )
        .unwrap();
        let scored = live_match(Sport::Cricket, after);
        assert_eq!(tick_action(&scored), None);
    }
}
