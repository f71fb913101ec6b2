use crate::common::error::ServiceResult;
use crate::models::scoring::RallyAction;
use crate::models::sports::{TeamSide, VolleyballState};

pub const SET_POINTS: u32 = 25;
pub const WIN_MARGIN: u32 = 2;

pub fn zero_state() -> VolleyballState {
    VolleyballState {
        set_number: 1,
        points: Default::default(),
        sets_won: Default::default(),
        serving: TeamSide::Team1,
    }
}

pub fn apply(state: &VolleyballState, action: RallyAction) -> ServiceResult<VolleyballState> {
    let mut next = *state;
    let RallyAction::RecordPoint { side } = action;

    *next.points.get_mut(side) += 1;
    next.serving = side;
    if set_won(&next, side) {
        *next.sets_won.get_mut(side) += 1;
        next.points = Default::default();
        next.set_number += 1;
    }
    Ok(next)
}

fn set_won(state: &VolleyballState, side: TeamSide) -> bool {
    let scored = *state.points.get(side);
    let conceded = *state.points.get(side.other());
    scored >= SET_POINTS && scored >= conceded + WIN_MARGIN
}
