use crate::common::error::ServiceResult;
use crate::models::scoring::RallyAction;
use crate::models::sports::{TableTennisState, TeamSide};

pub const GAME_POINTS: u32 = 11;
pub const WIN_MARGIN: u32 = 2;
const SERVES_PER_TURN: u32 = 2;

pub fn zero_state() -> TableTennisState {
    TableTennisState {
        game_number: 1,
        points: Default::default(),
        games_won: Default::default(),
        serving: TeamSide::Team1,
        service_count: 0,
    }
}

pub fn apply(state: &TableTennisState, action: RallyAction) -> ServiceResult<TableTennisState> {
    let mut next = *state;
    let RallyAction::RecordPoint { side } = action;

    *next.points.get_mut(side) += 1;
    next.service_count += 1;
    if next.service_count == SERVES_PER_TURN {
        next.serving = next.serving.other();
        next.service_count = 0;
    }
    if game_won(&next, side) {
        *next.games_won.get_mut(side) += 1;
        next.points = Default::default();
        next.game_number += 1;
        next.serving = TeamSide::Team1;
        next.service_count = 0;
    }
    Ok(next)
}

fn game_won(state: &TableTennisState, side: TeamSide) -> bool {
    let scored = *state.points.get(side);
    let conceded = *state.points.get(side.other());
    scored >= GAME_POINTS && scored >= conceded + WIN_MARGIN
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(side: TeamSide) -> RallyAction {
        RallyAction::RecordPoint { side }
    }

    #[test]
    fn test_serve_alternates_every_two_points() {
        let mut state = zero_state();
        assert_eq!(state.serving, TeamSide::Team1);

        state = apply(&state, point(TeamSide::Team1)).unwrap();
        assert_eq!(state.serving, TeamSide::Team1);
        assert_eq!(state.service_count, 1);

        state = apply(&state, point(TeamSide::Team2)).unwrap();
        assert_eq!(state.serving, TeamSide::Team2);
        assert_eq!(state.service_count, 0);

        state = apply(&state, point(TeamSide::Team1)).unwrap();
        state = apply(&state, point(TeamSide::Team1)).unwrap();
        assert_eq!(state.serving, TeamSide::Team1);
    }

    #[test]
    fn test_one_sided_run_of_twenty_two_points() {
        let mut state = zero_state();
        for i in 1..=22u32 {
            state = apply(&state, point(TeamSide::Team1)).unwrap();
            if i == 11 {
                assert_eq!(state.games_won.team1, 1);
                assert_eq!((state.points.team1, state.points.team2), (0, 0));
                assert_eq!(state.game_number, 2);
                assert_eq!(state.serving, TeamSide::Team1);
                assert_eq!(state.service_count, 0);
            }
        }
        assert_eq!(state.games_won.team1, 2);
        assert_eq!((state.points.team1, state.points.team2), (0, 0));
        assert_eq!(state.game_number, 3);
    }

    #[test]
    fn test_server_and_count_reset_for_each_new_game() {
        let mut state = zero_state();
        // 11-3: the game ends mid way through a service turn.
        for _ in 0..3 {
            state = apply(&state, point(TeamSide::Team2)).unwrap();
        }
        for _ in 0..11 {
            state = apply(&state, point(TeamSide::Team1)).unwrap();
        }
        assert_eq!(state.games_won.team1, 1);
        assert_eq!(state.serving, TeamSide::Team1);
        assert_eq!(state.service_count, 0);
    }

    #[test]
    fn test_ten_all_requires_two_point_lead() {
        let mut state = zero_state();
        for _ in 0..10 {
            state = apply(&state, point(TeamSide::Team1)).unwrap();
            state = apply(&state, point(TeamSide::Team2)).unwrap();
        }
        assert_eq!((state.points.team1, state.points.team2), (10, 10));

        state = apply(&state, point(TeamSide::Team2)).unwrap();
        assert_eq!(state.games_won.team2, 0);

        state = apply(&state, point(TeamSide::Team2)).unwrap();
        assert_eq!(state.games_won.team2, 1);
    }
}
