use crate::common::error::{AppError, ServiceResult};
use crate::models::scoring::BasketballAction;
use crate::models::sports::BasketballState;

pub const QUARTER_SECONDS: u32 = 12 * 60;

pub fn zero_state() -> BasketballState {
    BasketballState {
        quarter: 1,
        seconds_remaining: QUARTER_SECONDS,
        clock_running: false,
        points: Default::default(),
        fouls: Default::default(),
    }
}

pub fn apply(state: &BasketballState, action: BasketballAction) -> ServiceResult<BasketballState> {
    let mut next = *state;
    match action {
        BasketballAction::RecordPoints { team, points } => {
            if !(1..=3).contains(&points) {
                return Err(AppError::ScoringInvalidAction(
                    "a basket scores one, two or three points",
                ));
            }
            *next.points.get_mut(team) += points;
        }
        BasketballAction::RecordFoul { team } => {
            *next.fouls.get_mut(team) += 1;
        }
        BasketballAction::AdvanceQuarter => {
            next.quarter += 1;
            next.seconds_remaining = QUARTER_SECONDS;
            next.clock_running = false;
        }
        BasketballAction::Pause => {
            if !next.clock_running {
                return Err(AppError::ScoringInvalidAction("the clock is not running"));
            }
            next.clock_running = false;
        }
        BasketballAction::Resume => {
            if next.clock_running {
                return Err(AppError::ScoringInvalidAction("the clock is already running"));
            }
            if next.seconds_remaining == 0 {
                return Err(AppError::ScoringInvalidAction("the quarter clock has expired"));
            }
            next.clock_running = true;
        }
        BasketballAction::Tick => {
            if !next.clock_running {
                return Err(AppError::ScoringInvalidAction("the clock is not running"));
            }
            next.seconds_remaining = next.seconds_remaining.saturating_sub(1);
            if next.seconds_remaining == 0 {
                next.clock_running = false;
            }
        }
    }
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::sports::TeamSide;

    #[test]
    fn test_points_add_to_the_scoring_team() {
        let state = apply(
            &zero_state(),
            BasketballAction::RecordPoints {
                team: TeamSide::Team1,
                points: 3,
            },
        )
        .unwrap();
        let state = apply(
            &state,
            BasketballAction::RecordPoints {
                team: TeamSide::Team2,
                points: 2,
            },
        )
        .unwrap();
        assert_eq!(state.points.team1, 3);
        assert_eq!(state.points.team2, 2);
    }

    #[test]
    fn test_point_value_outside_one_to_three_rejected() {
        for points in [0, 4, 10] {
            assert!(matches!(
                apply(
                    &zero_state(),
                    BasketballAction::RecordPoints {
                        team: TeamSide::Team1,
                        points,
                    },
                ),
                Err(AppError::ScoringInvalidAction(_))
            ));
        }
    }

    #[test]
    fn test_fouls_count_separately_from_points() {
        let state = apply(
            &zero_state(),
            BasketballAction::RecordFoul {
                team: TeamSide::Team2,
            },
        )
        .unwrap();
        assert_eq!(state.fouls.team2, 1);
        assert_eq!(state.points.team2, 0);
    }

    #[test]
    fn test_advance_quarter_resets_a_stopped_clock() {
        let state = apply(&zero_state(), BasketballAction::Resume).unwrap();
        let state = apply(&state, BasketballAction::Tick).unwrap();
        let state = apply(&state, BasketballAction::AdvanceQuarter).unwrap();
        assert_eq!(state.quarter, 2);
        assert_eq!(state.seconds_remaining, QUARTER_SECONDS);
        assert!(!state.clock_running);
    }

    #[test]
    fn test_clock_stops_at_zero_without_advancing_quarter() {
        let mut state = apply(&zero_state(), BasketballAction::Resume).unwrap();
        for _ in 0..QUARTER_SECONDS {
            state = apply(&state, BasketballAction::Tick).unwrap();
        }
        assert_eq!(state.seconds_remaining, 0);
        assert_eq!(state.quarter, 1);
        assert!(!state.clock_running);
        assert!(apply(&state, BasketballAction::Resume).is_err());
    }
}
