pub mod badminton;
pub mod basketball;
pub mod chess;
pub mod cricket;
pub mod football;
pub mod table_tennis;
pub mod volleyball;

use crate::common::error::{AppError, ServiceResult};
use crate::models::scoring::ScoreAction;
use crate::models::sports::{Sport, SportState};

/// The state a match starts from when it goes live. `duration_minutes` is
/// only meaningful for football; every other sport ignores it.
pub fn zero_state(sport: Sport, duration_minutes: Option<u32>) -> SportState {
    match sport {
        Sport::Cricket => SportState::Cricket(cricket::zero_state()),
        Sport::Football => SportState::Football(football::zero_state(duration_minutes)),
        Sport::Basketball => SportState::Basketball(basketball::zero_state()),
        Sport::Chess => SportState::Chess(chess::zero_state()),
        Sport::Volleyball => SportState::Volleyball(volleyball::zero_state()),
        Sport::Badminton => SportState::Badminton(badminton::zero_state()),
        Sport::TableTennis => SportState::TableTennis(table_tennis::zero_state()),
    }
}

/// Applies one action, returning the next state. The input is never
/// touched, so a rejected action leaves the caller's state as it was.
pub fn apply(state: &SportState, action: ScoreAction) -> ServiceResult<SportState> {
    match (state, action) {
        (SportState::Cricket(state), ScoreAction::Cricket(action)) => {
            Ok(SportState::Cricket(cricket::apply(state, action)?))
        }
        (SportState::Football(state), ScoreAction::Football(action)) => {
            Ok(SportState::Football(football::apply(state, action)?))
        }
        (SportState::Basketball(state), ScoreAction::Basketball(action)) => {
            Ok(SportState::Basketball(basketball::apply(state, action)?))
        }
        (SportState::Chess(state), ScoreAction::Chess(action)) => {
            Ok(SportState::Chess(chess::apply(state, action)?))
        }
        (SportState::Volleyball(state), ScoreAction::Volleyball(action)) => {
            Ok(SportState::Volleyball(volleyball::apply(state, action)?))
        }
        (SportState::Badminton(state), ScoreAction::Badminton(action)) => {
            Ok(SportState::Badminton(badminton::apply(state, action)?))
        }
        (SportState::TableTennis(state), ScoreAction::TableTennis(action)) => {
            Ok(SportState::TableTennis(table_tennis::apply(state, action)?))
        }
        _ => Err(AppError::ScoringSportMismatch),
    }
}

/// Headline scoreline derived from sport state. Fractional values only
/// occur for chess, where results accumulate in half points.
pub fn aggregate_scores(state: &SportState) -> (f64, f64) {
    match state {
        SportState::Cricket(state) => (state.runs as f64, 0.0),
        SportState::Football(state) => {
            let (team1, team2) = football::goal_totals(state);
            (team1 as f64, team2 as f64)
        }
        SportState::Basketball(state) => {
            (state.points.team1 as f64, state.points.team2 as f64)
        }
        SportState::Chess(state) => (
            state.half_points.white as f64 / 2.0,
            state.half_points.black as f64 / 2.0,
        ),
        SportState::Volleyball(state) => {
            (state.sets_won.team1 as f64, state.sets_won.team2 as f64)
        }
        SportState::Badminton(state) => {
            (state.games_won.team1 as f64, state.games_won.team2 as f64)
        }
        SportState::TableTennis(state) => {
            (state.games_won.team1 as f64, state.games_won.team2 as f64)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::scoring::RallyAction;
    use crate::models::sports::TeamSide;

    #[test]
    fn test_zero_state_kind_matches_sport() {
        for sport in Sport::ALL {
            assert_eq!(zero_state(sport, None).sport(), sport);
        }
    }

    #[test]
    fn test_apply_rejects_wrong_sport_action() {
        let state = zero_state(Sport::Volleyball, None);
        let action = ScoreAction::Badminton(RallyAction::RecordPoint {
            side: TeamSide::Team1,
        });
        assert!(matches!(
            apply(&state, action),
            Err(AppError::ScoringSportMismatch)
        ));
    }

    #[test]
    fn test_aggregate_scores_of_zero_states() {
        for sport in Sport::ALL {
            assert_eq!(aggregate_scores(&zero_state(sport, None)), (0.0, 0.0));
        }
    }
}
