use crate::common::error::{AppError, ServiceResult};
use crate::models::scoring::{CricketAction, ExtraKind};
use crate::models::sports::{BallRecord, CricketState, Delivery};

const MAX_WICKETS: u32 = 10;
const BALLS_PER_OVER: u32 = 6;
const MAX_RUNS_PER_BALL: u32 = 6;

pub fn zero_state() -> CricketState {
    CricketState::default()
}

pub fn apply(state: &CricketState, action: CricketAction) -> ServiceResult<CricketState> {
    let mut next = state.clone();
    match action {
        CricketAction::RecordRun { runs } => {
            if runs > MAX_RUNS_PER_BALL {
                return Err(AppError::ScoringInvalidAction(
                    "a single delivery scores at most six runs",
                ));
            }

            next.runs += runs;
            advance_ball(&mut next);
            next.history.push(BallRecord {
                delivery: Delivery::Runs,
                runs,
                counted: true,
            });
        }
        CricketAction::RecordWicket => {
            if next.wickets >= MAX_WICKETS {
                return Err(AppError::ScoringInvalidAction(
                    "all ten wickets have already fallen",
                ));
            }

            next.wickets += 1;
            advance_ball(&mut next);
            next.history.push(BallRecord {
                delivery: Delivery::Wicket,
                runs: 0,
                counted: true,
            });
        }
        CricketAction::RecordExtra { kind } => {
            next.runs += 1;
            let (delivery, counted) = match kind {
                ExtraKind::Wide => {
                    next.extras.wide += 1;
                    (Delivery::Wide, false)
                }
                ExtraKind::NoBall => {
                    next.extras.no_ball += 1;
                    (Delivery::NoBall, false)
                }
                ExtraKind::Bye => {
                    next.extras.bye += 1;
                    (Delivery::Bye, true)
                }
                ExtraKind::LegBye => {
                    next.extras.leg_bye += 1;
                    (Delivery::LegBye, true)
                }
            };
            if counted {
                advance_ball(&mut next);
            }
            next.history.push(BallRecord {
                delivery,
                runs: 1,
                counted,
            });
        }
        CricketAction::UndoLastBall => {
            let Some(record) = next.history.pop() else {
                return Err(AppError::ScoringInvalidAction("no deliveries to undo"));
            };

            next.runs -= record.runs;
            match record.delivery {
                Delivery::Runs => {}
                Delivery::Wicket => next.wickets -= 1,
                Delivery::Wide => next.extras.wide -= 1,
                Delivery::NoBall => next.extras.no_ball -= 1,
                Delivery::Bye => next.extras.bye -= 1,
                Delivery::LegBye => next.extras.leg_bye -= 1,
            }
            if record.counted {
                retreat_ball(&mut next);
            }
        }
    }
    Ok(next)
}

fn advance_ball(state: &mut CricketState) {
    state.balls += 1;
    if state.balls == BALLS_PER_OVER {
        state.overs += 1;
        state.balls = 0;
    }
}

fn retreat_ball(state: &mut CricketState) {
    if state.balls == 0 {
        state.overs -= 1;
        state.balls = BALLS_PER_OVER - 1;
    } else {
        state.balls -= 1;
    }
}
