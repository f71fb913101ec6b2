use crate::common::error::ServiceResult;
use crate::models::scoring::RallyAction;
use crate::models::sports::{BadmintonState, TeamSide};

pub const GAME_POINTS: u32 = 21;
pub const WIN_MARGIN: u32 = 2;

pub fn zero_state() -> BadmintonState {
    BadmintonState {
        game_number: 1,
        points: Default::default(),
        games_won: Default::default(),
        serving: TeamSide::Team1,
    }
}

pub fn apply(state: &BadmintonState, action: RallyAction) -> ServiceResult<BadmintonState> {
    let mut next = *state;
    let RallyAction::RecordPoint { side } = action;

    *next.points.get_mut(side) += 1;
    next.serving = side;
    if game_won(&next, side) {
        *next.games_won.get_mut(side) += 1;
        next.points = Default::default();
        next.game_number += 1;
    }
    Ok(next)
}

fn game_won(state: &BadmintonState, side: TeamSide) -> bool {
    let scored = *state.points.get(side);
    let conceded = *state.points.get(side.other());
    scored >= GAME_POINTS && scored >= conceded + WIN_MARGIN
}
