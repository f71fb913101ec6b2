use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;
use tracing::error;

pub type ServiceResult<T> = Result<T, AppError>;
pub type ServiceResponse<T> = ServiceResult<Json<T>>;

#[track_caller]
pub fn unexpected<T, E: Into<anyhow::Error>>(e: E) -> ServiceResult<T> {
    let caller = std::panic::Location::caller();
    error!("An unexpected error has occurred at {caller}: {}", e.into());
    Err(AppError::Unexpected)
}

#[derive(Debug)]
pub enum AppError {
    Unexpected,
    StoreUnavailable,

    MatchesNotFound,
    MatchesNotUpcoming,
    MatchesNotLive,
    MatchesStillLive,
    MatchesTeamsIdentical,
    MatchesInvalidDuration,

    /// Which rule invariant blocked the action.
    ScoringInvalidAction(&'static str),
    ScoringSportMismatch,
    ScoringRevisionConflict,

    TeamsNotFound,
    TeamsInvalidName,
    TeamsInvalidMembers,
    TeamsInvalidCaptain,
    TeamsSportMismatch,

    TournamentsNotFound,
    TournamentsInvalidName,
    TournamentsInvalidDescription,
    TournamentsInvalidDates,
    TournamentsInvalidCapacity,
}

impl<E: Into<anyhow::Error>> From<E> for AppError {
    #[track_caller]
    fn from(e: E) -> Self {
        unexpected::<(), E>(e).unwrap_err()
    }
}

impl AppError {
    pub const fn code(&self) -> &'static str {
        match self {
            AppError::Unexpected => "unexpected",
            AppError::StoreUnavailable => "store.unavailable",

            AppError::MatchesNotFound => "matches.not_found",
            AppError::MatchesNotUpcoming => "matches.not_upcoming",
            AppError::MatchesNotLive => "matches.not_live",
            AppError::MatchesStillLive => "matches.still_live",
            AppError::MatchesTeamsIdentical => "matches.teams_identical",
            AppError::MatchesInvalidDuration => "matches.invalid_duration",

            AppError::ScoringInvalidAction(_) => "scoring.invalid_action",
            AppError::ScoringSportMismatch => "scoring.sport_mismatch",
            AppError::ScoringRevisionConflict => "scoring.revision_conflict",

            AppError::TeamsNotFound => "teams.not_found",
            AppError::TeamsInvalidName => "teams.invalid_name",
            AppError::TeamsInvalidMembers => "teams.invalid_members",
            AppError::TeamsInvalidCaptain => "teams.invalid_captain",
            AppError::TeamsSportMismatch => "teams.sport_mismatch",

            AppError::TournamentsNotFound => "tournaments.not_found",
            AppError::TournamentsInvalidName => "tournaments.invalid_name",
            AppError::TournamentsInvalidDescription => "tournaments.invalid_description",
            AppError::TournamentsInvalidDates => "tournaments.invalid_dates",
            AppError::TournamentsInvalidCapacity => "tournaments.invalid_capacity",
        }
    }

    pub const fn message(&self) -> &'static str {
        match self {
            AppError::Unexpected => "An unexpected error has occurred.",
            AppError::StoreUnavailable => {
                "The record store is currently unavailable. The action was not applied."
            }

            AppError::MatchesNotFound => "The match could not be found.",
            AppError::MatchesNotUpcoming => "The match has already been started.",
            AppError::MatchesNotLive => "The match is not live.",
            AppError::MatchesStillLive => "The match is still live. End it before deleting it.",
            AppError::MatchesTeamsIdentical => "A team cannot play against itself.",
            AppError::MatchesInvalidDuration => {
                "Match duration must be one of 5, 15, 30, 60, 90 or 120 minutes."
            }

            AppError::ScoringInvalidAction(reason) => reason,
            AppError::ScoringSportMismatch => {
                "The action does not belong to this match's sport."
            }
            AppError::ScoringRevisionConflict => {
                "The match has changed since you last saw it. Re-fetch the current state and retry."
            }

            AppError::TeamsNotFound => "The team could not be found.",
            AppError::TeamsInvalidName => "Team names must be between 1 and 50 characters.",
            AppError::TeamsInvalidMembers => "A team needs at least one member.",
            AppError::TeamsInvalidCaptain => "A team needs a captain.",
            AppError::TeamsSportMismatch => "Both teams must play the match's sport.",

            AppError::TournamentsNotFound => "The tournament could not be found.",
            AppError::TournamentsInvalidName => {
                "Tournament names must be between 1 and 100 characters."
            }
            AppError::TournamentsInvalidDescription => {
                "Tournament descriptions are limited to 500 characters."
            }
            AppError::TournamentsInvalidDates => "The tournament must end after it starts.",
            AppError::TournamentsInvalidCapacity => {
                "Tournament capacity must be between 2 and 32 teams."
            }
        }
    }

    pub const fn http_status_code(&self) -> StatusCode {
        match self {
            AppError::MatchesTeamsIdentical
            | AppError::MatchesInvalidDuration
            | AppError::ScoringSportMismatch
            | AppError::TeamsInvalidName
            | AppError::TeamsInvalidMembers
            | AppError::TeamsInvalidCaptain
            | AppError::TeamsSportMismatch
            | AppError::TournamentsInvalidName
            | AppError::TournamentsInvalidDescription
            | AppError::TournamentsInvalidDates
            | AppError::TournamentsInvalidCapacity => StatusCode::BAD_REQUEST,

            AppError::MatchesNotFound
            | AppError::TeamsNotFound
            | AppError::TournamentsNotFound => StatusCode::NOT_FOUND,

            AppError::MatchesNotUpcoming
            | AppError::MatchesNotLive
            | AppError::MatchesStillLive
            | AppError::ScoringInvalidAction(_)
            | AppError::ScoringRevisionConflict => StatusCode::CONFLICT,

            AppError::StoreUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Unexpected => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub const fn response_parts(&self) -> (StatusCode, Json<ErrorResponse>) {
        let status = self.http_status_code();
        let response = ErrorResponse {
            code: self.code(),
            message: self.message(),
        };
        (status, Json(response))
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub code: &'static str,
    pub message: &'static str,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.response_parts().into_response()
    }
}
