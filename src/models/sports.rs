use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sport {
    Cricket,
    Football,
    Basketball,
    Chess,
    Volleyball,
    Badminton,
    TableTennis,
}

impl Sport {
    pub const ALL: [Sport; 7] = [
        Sport::Cricket,
        Sport::Football,
        Sport::Basketball,
        Sport::Chess,
        Sport::Volleyball,
        Sport::Badminton,
        Sport::TableTennis,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Sport::Cricket => "Cricket",
            Sport::Football => "Football",
            Sport::Basketball => "Basketball",
            Sport::Chess => "Chess",
            Sport::Volleyball => "Volleyball",
            Sport::Badminton => "Badminton",
            Sport::TableTennis => "TableTennis",
        }
    }
}

impl fmt::Display for Sport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sport {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "Cricket" => Sport::Cricket,
            "Football" => Sport::Football,
            "Basketball" => Sport::Basketball,
            "Chess" => Sport::Chess,
            "Volleyball" => Sport::Volleyball,
            "Badminton" => Sport::Badminton,
            "TableTennis" => Sport::TableTennis,
            other => anyhow::bail!("unknown sport: {other}"),
        })
    }
}

/// The two participating teams, as referenced from inside sport state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TeamSide {
    Team1,
    Team2,
}

impl TeamSide {
    pub const fn other(&self) -> TeamSide {
        match self {
            TeamSide::Team1 => TeamSide::Team2,
            TeamSide::Team2 => TeamSide::Team1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChessSide {
    White,
    Black,
}

impl ChessSide {
    pub const fn other(&self) -> ChessSide {
        match self {
            ChessSide::White => ChessSide::Black,
            ChessSide::Black => ChessSide::White,
        }
    }
}

/// A pair of per-team counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerTeam<T> {
    pub team1: T,
    pub team2: T,
}

impl<T> PerTeam<T> {
    pub fn get(&self, side: TeamSide) -> &T {
        match side {
            TeamSide::Team1 => &self.team1,
            TeamSide::Team2 => &self.team2,
        }
    }

    pub fn get_mut(&mut self, side: TeamSide) -> &mut T {
        match side {
            TeamSide::Team1 => &mut self.team1,
            TeamSide::Team2 => &mut self.team2,
        }
    }
}

/// A pair of per-colour counters for chess.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerSide<T> {
    pub white: T,
    pub black: T,
}

impl<T> PerSide<T> {
    pub fn get(&self, side: ChessSide) -> &T {
        match side {
            ChessSide::White => &self.white,
            ChessSide::Black => &self.black,
        }
    }

    pub fn get_mut(&mut self, side: ChessSide) -> &mut T {
        match side {
            ChessSide::White => &mut self.white,
            ChessSide::Black => &mut self.black,
        }
    }
}

/// Sport-specific progress of a live match. The variant always matches the
/// match's sport; `rules::apply` rejects actions for any other variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum SportState {
    Cricket(CricketState),
    Football(FootballState),
    Basketball(BasketballState),
    Chess(ChessState),
    Volleyball(VolleyballState),
    Badminton(BadmintonState),
    TableTennis(TableTennisState),
}

impl SportState {
    pub const fn sport(&self) -> Sport {
        match self {
            SportState::Cricket(_) => Sport::Cricket,
            SportState::Football(_) => Sport::Football,
            SportState::Basketball(_) => Sport::Basketball,
            SportState::Chess(_) => Sport::Chess,
            SportState::Volleyball(_) => Sport::Volleyball,
            SportState::Badminton(_) => Sport::Badminton,
            SportState::TableTennis(_) => Sport::TableTennis,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CricketState {
    pub runs: u32,
    pub wickets: u32,
    pub overs: u32,
    /// Balls bowled in the current over, 0..=5. Wraps into `overs` at 6.
    pub balls: u32,
    pub extras: Extras,
    pub history: Vec<BallRecord>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Extras {
    pub wide: u32,
    pub no_ball: u32,
    pub bye: u32,
    pub leg_bye: u32,
}

/// One delivery as it went into the book, kept so the last one can be undone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BallRecord {
    pub delivery: Delivery,
    pub runs: u32,
    /// Whether the delivery advanced the ball count.
    pub counted: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Delivery {
    Runs,
    Wicket,
    Wide,
    NoBall,
    Bye,
    LegBye,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FootballState {
    pub phase: FootballPhase,
    pub seconds_remaining: u32,
    pub duration_minutes: u32,
    pub clock_running: bool,
    pub goals: Vec<GoalEvent>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FootballPhase {
    PreMatch,
    FirstHalf,
    HalfTime,
    SecondHalf,
    FullTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalEvent {
    pub team: TeamSide,
    pub scorer: String,
    pub minute: u32,
    pub wall_clock: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasketballState {
    pub quarter: u32,
    pub seconds_remaining: u32,
    pub clock_running: bool,
    pub points: PerTeam<u32>,
    pub fouls: PerTeam<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChessState {
    /// Seconds remaining per side.
    pub clocks: PerSide<u32>,
    pub active_side: ChessSide,
    /// Cumulative game results in half-point units (win 2, draw 1).
    pub half_points: PerSide<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolleyballState {
    pub set_number: u32,
    pub points: PerTeam<u32>,
    pub sets_won: PerTeam<u32>,
    pub serving: TeamSide,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BadmintonState {
    pub game_number: u32,
    pub points: PerTeam<u32>,
    pub games_won: PerTeam<u32>,
    pub serving: TeamSide,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableTennisState {
    pub game_number: u32,
    pub points: PerTeam<u32>,
    pub games_won: PerTeam<u32>,
    pub serving: TeamSide,
    /// Serves taken by the current server; flips the serve at 2.
    pub service_count: u32,
}
