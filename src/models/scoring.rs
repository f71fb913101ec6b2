use crate::models::sports::{ChessSide, Sport, TeamSide};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A scoring intent submitted against a live match. Tagged by sport so a
/// volleyball point can never be applied to a badminton match by accident.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "sport", content = "action")]
pub enum ScoreAction {
    Cricket(CricketAction),
    Football(FootballAction),
    Basketball(BasketballAction),
    Chess(ChessAction),
    Volleyball(RallyAction),
    Badminton(RallyAction),
    TableTennis(RallyAction),
}

impl ScoreAction {
    pub const fn sport(&self) -> Sport {
        match self {
            ScoreAction::Cricket(_) => Sport::Cricket,
            ScoreAction::Football(_) => Sport::Football,
            ScoreAction::Basketball(_) => Sport::Basketball,
            ScoreAction::Chess(_) => Sport::Chess,
            ScoreAction::Volleyball(_) => Sport::Volleyball,
            ScoreAction::Badminton(_) => Sport::Badminton,
            ScoreAction::TableTennis(_) => Sport::TableTennis,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum CricketAction {
    RecordRun { runs: u32 },
    RecordWicket,
    RecordExtra { kind: ExtraKind },
    UndoLastBall,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExtraKind {
    Wide,
    NoBall,
    Bye,
    LegBye,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum FootballAction {
    Kickoff,
    Pause,
    Resume,
    EndFirstHalf,
    StartSecondHalf,
    EndSecondHalf,
    RecordGoal {
        team: TeamSide,
        scorer: String,
        /// Stamped by the service when the intent is accepted; carried in the
        /// action so rule application itself never reads the clock.
        #[serde(default)]
        recorded_at: Option<DateTime<Utc>>,
    },
    Tick,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum BasketballAction {
    RecordPoints { team: TeamSide, points: u32 },
    RecordFoul { team: TeamSide },
    AdvanceQuarter,
    Pause,
    Resume,
    Tick,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ChessAction {
    SwitchClock,
    RecordResult { outcome: ChessOutcome },
    Tick,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChessOutcome {
    White,
    Black,
    Draw,
}

impl ChessOutcome {
    pub const fn winner(&self) -> Option<ChessSide> {
        match self {
            ChessOutcome::White => Some(ChessSide::White),
            ChessOutcome::Black => Some(ChessSide::Black),
            ChessOutcome::Draw => None,
        }
    }
}

/// Volleyball, badminton and table tennis all score one rally at a time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum RallyAction {
    RecordPoint { side: TeamSide },
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitActionRequest {
    pub action: ScoreAction,
    /// Optimistic concurrency guard; when set, the action only applies if the
    /// match is still at this revision.
    #[serde(default)]
    pub expected_revision: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndMatchRequest {
    #[serde(default)]
    pub notes: Option<String>,
}
