use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

/// Relationship rule violations raised by attach and detach.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RelationshipError {
    /// Course or race to attach does not exist.
    #[error("The specified course and/or race does not exist")]
    CourseOrRaceNotFound,

    /// Race already references a course.
    #[error("The race is already assigned to another course")]
    RaceHasCourse { race_id: i32, course_id: i32 },

    /// The course/race pairing to detach does not currently hold.
    #[error("No course with this course_id is assigned to this race with this race_id")]
    CourseNotAssigned,

    /// Race or athlete does not exist.
    #[error("The specified race and/or athlete does not exist")]
    RaceOrAthleteNotFound,

    /// Athlete already lists the race.
    #[error("The athlete is already entered in this race")]
    AlreadyEntered { race_id: i32, athlete_id: i32 },

    /// The race/athlete pairing to detach does not currently hold.
    #[error("No race with this race_id is assigned to this athlete with this athlete_id")]
    NotEntered,
}

/// Converts relationship errors into HTTP responses.
///
/// # Returns
/// - 403 Forbidden - For conflicts (`RaceHasCourse`, `AlreadyEntered`)
/// - 404 Not Found - For missing documents or pairings
impl IntoResponse for RelationshipError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::RaceHasCourse { .. } | Self::AlreadyEntered { .. } => StatusCode::FORBIDDEN,
            Self::CourseOrRaceNotFound
            | Self::CourseNotAssigned
            | Self::RaceOrAthleteNotFound
            | Self::NotEntered => StatusCode::NOT_FOUND,
        };

        (
            status,
            Json(ErrorDto {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
