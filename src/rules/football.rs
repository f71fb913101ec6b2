use crate::common::error::{AppError, ServiceResult};
use crate::models::scoring::FootballAction;
use crate::models::sports::{FootballPhase, FootballState, GoalEvent, TeamSide};
use chrono::DateTime;

pub const DEFAULT_DURATION_MINUTES: u32 = 90;
pub const DURATION_PRESETS: [u32; 6] = [5, 15, 30, 60, 90, 120];

pub const fn half_seconds(duration_minutes: u32) -> u32 {
    duration_minutes * 60 / 2
}

pub fn zero_state(duration_minutes: Option<u32>) -> FootballState {
    let duration_minutes = duration_minutes.unwrap_or(DEFAULT_DURATION_MINUTES);
    FootballState {
        phase: FootballPhase::PreMatch,
        seconds_remaining: half_seconds(duration_minutes),
        duration_minutes,
        clock_running: false,
        goals: Vec::new(),
    }
}

pub fn apply(state: &FootballState, action: FootballAction) -> ServiceResult<FootballState> {
    let mut next = state.clone();
    match action {
        FootballAction::Kickoff => {
            if next.phase != FootballPhase::PreMatch {
                return Err(AppError::ScoringInvalidAction(
                    "kick-off is only valid before the first half",
                ));
            }
            next.phase = FootballPhase::FirstHalf;
            next.seconds_remaining = half_seconds(next.duration_minutes);
            next.clock_running = true;
        }
        FootballAction::Pause => {
            if !in_play(&next) || !next.clock_running {
                return Err(AppError::ScoringInvalidAction("the clock is not running"));
            }
            next.clock_running = false;
        }
        FootballAction::Resume => {
            if !in_play(&next) {
                return Err(AppError::ScoringInvalidAction("play is not in progress"));
            }
            if next.clock_running {
                return Err(AppError::ScoringInvalidAction("the clock is already running"));
            }
            next.clock_running = true;
        }
        FootballAction::EndFirstHalf => {
            if next.phase != FootballPhase::FirstHalf {
                return Err(AppError::ScoringInvalidAction(
                    "the first half is not in progress",
                ));
            }
            next.phase = FootballPhase::HalfTime;
            next.seconds_remaining = 0;
            next.clock_running = false;
        }
        FootballAction::StartSecondHalf => {
            if next.phase != FootballPhase::HalfTime {
                return Err(AppError::ScoringInvalidAction(
                    "the match is not at half time",
                ));
            }
            next.phase = FootballPhase::SecondHalf;
            next.seconds_remaining = half_seconds(next.duration_minutes);
            next.clock_running = true;
        }
        FootballAction::EndSecondHalf => {
            if next.phase != FootballPhase::SecondHalf {
                return Err(AppError::ScoringInvalidAction(
                    "the second half is not in progress",
                ));
            }
            next.phase = FootballPhase::FullTime;
            next.seconds_remaining = 0;
            next.clock_running = false;
        }
        FootballAction::RecordGoal {
            team,
            scorer,
            recorded_at,
        } => {
            if !in_play(&next) {
                return Err(AppError::ScoringInvalidAction(
                    "goals can only be recorded during play",
                ));
            }
            next.goals.push(GoalEvent {
                team,
                scorer,
                minute: goal_minute(&next),
                wall_clock: recorded_at.unwrap_or(DateTime::UNIX_EPOCH),
            });
        }
        FootballAction::Tick => {
            if !in_play(&next) || !next.clock_running {
                return Err(AppError::ScoringInvalidAction("the clock is not running"));
            }
            next.seconds_remaining = next.seconds_remaining.saturating_sub(1);
            if next.seconds_remaining == 0 {
                next.clock_running = false;
                next.phase = match next.phase {
                    FootballPhase::FirstHalf => FootballPhase::HalfTime,
                    _ => FootballPhase::FullTime,
                };
            }
        }
    }
    Ok(next)
}

pub fn goal_totals(state: &FootballState) -> (u32, u32) {
    state
        .goals
        .iter()
        .fold((0, 0), |(team1, team2), goal| match goal.team {
            TeamSide::Team1 => (team1 + 1, team2),
            TeamSide::Team2 => (team1, team2 + 1),
        })
}

fn in_play(state: &FootballState) -> bool {
    matches!(
        state.phase,
        FootballPhase::FirstHalf | FootballPhase::SecondHalf
    )
}

/// Elapsed match minute, floored, never below 1. Second-half elapsed time
/// starts counting from duration/2.
fn goal_minute(state: &FootballState) -> u32 {
    let half = half_seconds(state.duration_minutes);
    let elapsed = match state.phase {
        FootballPhase::SecondHalf => half + (half - state.seconds_remaining),
        _ => half - state.seconds_remaining,
    };
    (elapsed / 60).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::sports::TeamSide;

    fn tick_n(mut state: FootballState, n: u32) -> FootballState {
        for _ in 0..n {
            state = apply(&state, FootballAction::Tick).unwrap();
        }
        state
    }

    fn goal(team: TeamSide) -> FootballAction {
        FootballAction::RecordGoal {
            team,
            scorer: "No. 9".to_string(),
            recorded_at: None,
        }
    }

    #[test]
    fn test_default_duration_is_ninety_minutes() {
        let state = zero_state(None);
        assert_eq!(state.duration_minutes, 90);
        assert_eq!(state.seconds_remaining, 45 * 60);
    }

    #[test]
    fn test_kickoff_starts_first_half() {
        let state = apply(&zero_state(Some(10)), FootballAction::Kickoff).unwrap();
        assert_eq!(state.phase, FootballPhase::FirstHalf);
        assert_eq!(state.seconds_remaining, 300);
        assert!(state.clock_running);
    }

    #[test]
    fn test_first_half_runs_out_into_half_time() {
        let state = apply(&zero_state(Some(10)), FootballAction::Kickoff).unwrap();
        let state = tick_n(state, 300);
        assert_eq!(state.phase, FootballPhase::HalfTime);
        assert_eq!(state.seconds_remaining, 0);
        assert!(!state.clock_running);
    }

    #[test]
    fn test_second_half_runs_out_into_full_time() {
        let state = apply(&zero_state(Some(10)), FootballAction::Kickoff).unwrap();
        let state = apply(&state, FootballAction::EndFirstHalf).unwrap();
        let state = apply(&state, FootballAction::StartSecondHalf).unwrap();
        let state = tick_n(state, 300);
        assert_eq!(state.phase, FootballPhase::FullTime);
        assert!(!state.clock_running);
    }

    #[test]
    fn test_tick_rejected_while_paused() {
        let state = apply(&zero_state(Some(10)), FootballAction::Kickoff).unwrap();
        let state = apply(&state, FootballAction::Pause).unwrap();
        assert!(apply(&state, FootballAction::Tick).is_err());

        let state = apply(&state, FootballAction::Resume).unwrap();
        assert!(apply(&state, FootballAction::Tick).is_ok());
    }

    #[test]
    fn test_phases_cannot_be_skipped() {
        let state = zero_state(None);
        assert!(apply(&state, FootballAction::StartSecondHalf).is_err());
        assert!(apply(&state, FootballAction::EndSecondHalf).is_err());

        let state = apply(&state, FootballAction::Kickoff).unwrap();
        assert!(apply(&state, FootballAction::Kickoff).is_err());
    }

    #[test]
    fn test_goal_minute_floors_at_one() {
        let state = apply(&zero_state(None), FootballAction::Kickoff).unwrap();
        let state = tick_n(state, 30);
        let state = apply(&state, goal(TeamSide::Team1)).unwrap();
        assert_eq!(state.goals[0].minute, 1);
    }

    #[test]
    fn test_goal_minute_counts_from_half_way_in_second_half() {
        let state = apply(&zero_state(None), FootballAction::Kickoff).unwrap();
        let state = apply(&state, FootballAction::EndFirstHalf).unwrap();
        let state = apply(&state, FootballAction::StartSecondHalf).unwrap();
        let state = tick_n(state, 90);
        let state = apply(&state, goal(TeamSide::Team2)).unwrap();
        assert_eq!(state.goals[0].minute, 46);
    }

    #[test]
    fn test_goal_rejected_outside_play() {
        let state = zero_state(None);
        assert!(apply(&state, goal(TeamSide::Team1)).is_err());

        let state = apply(&state, FootballAction::Kickoff).unwrap();
        let state = apply(&state, FootballAction::EndFirstHalf).unwrap();
        assert!(apply(&state, goal(TeamSide::Team1)).is_err());
    }

    #[test]
    fn test_goal_totals_split_by_team() {
        let state = apply(&zero_state(None), FootballAction::Kickoff).unwrap();
        let state = apply(&state, goal(TeamSide::Team1)).unwrap();
        let state = apply(&state, goal(TeamSide::Team2)).unwrap();
        let state = apply(&state, goal(TeamSide::Team1)).unwrap();
        assert_eq!(goal_totals(&state), (2, 1));
    }
}
