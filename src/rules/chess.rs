use crate::common::error::ServiceResult;
use crate::models::scoring::{ChessAction, ChessOutcome};
use crate::models::sports::{ChessSide, ChessState, PerSide};

pub const CLOCK_SECONDS: u32 = 10 * 60;

pub fn zero_state() -> ChessState {
    ChessState {
        clocks: PerSide {
            white: CLOCK_SECONDS,
            black: CLOCK_SECONDS,
        },
        active_side: ChessSide::White,
        half_points: PerSide::default(),
    }
}

pub fn apply(state: &ChessState, action: ChessAction) -> ServiceResult<ChessState> {
    let mut next = *state;
    match action {
        ChessAction::SwitchClock => {
            next.active_side = next.active_side.other();
        }
        ChessAction::Tick => {
            let clock = next.clocks.get_mut(next.active_side);
            *clock = clock.saturating_sub(1);
        }
        ChessAction::RecordResult { outcome } => match outcome.winner() {
            Some(side) => *next.half_points.get_mut(side) += 2,
            None => {
                next.half_points.white += 1;
                next.half_points.black += 1;
            }
        },
    }
    Ok(next)
}
