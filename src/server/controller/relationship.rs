use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::{
    model::api::ErrorDto,
    server::{
        error::{relationship::RelationshipError, AppError},
        middleware::auth::{AuthGuard, Caller, Permission},
        model::{
            athlete::Athlete,
            document::{Kind, Resource, Stored},
            link::Links,
            race::Race,
        },
        service::{athlete::AthleteService, race::RaceService, relationship::RelationshipService},
        state::AppState,
        util::parse::parse_id,
    },
};

/// Tag for grouping relationship endpoints in OpenAPI documentation
pub static RELATIONSHIP_TAG: &str = "relationship";

/// Assign a race to a course.
///
/// A race can be on at most one course. The course gains a reference to the race and the
/// race a reference to the course.
///
/// # Returns
/// - `204 No Content` - Race assigned
/// - `403 Forbidden` - Race is already assigned to a course
/// - `404 Not Found` - Course or race does not exist
/// - `500 Internal Server Error` - Database error or half-applied write
#[utoipa::path(
    put,
    path = "/courses/{course_id}/races/{race_id}",
    tag = RELATIONSHIP_TAG,
    params(
        ("course_id" = i32, Path, description = "Course ID"),
        ("race_id" = i32, Path, description = "Race ID")
    ),
    responses(
        (status = 204, description = "Race assigned to course"),
        (status = 403, description = "Race already has a course", body = ErrorDto),
        (status = 404, description = "Course or race not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn attach_course_race(
    State(state): State<AppState>,
    links: Links,
    Path((course_id, race_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let (Ok(course_id), Ok(race_id)) = (
        parse_id(Kind::Course, &course_id),
        parse_id(Kind::Race, &race_id),
    ) else {
        return Err(RelationshipError::CourseOrRaceNotFound.into());
    };

    RelationshipService::new(&state.db)
        .attach_course_race(course_id, race_id, &links)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Remove a race from a course.
///
/// # Returns
/// - `204 No Content` - Race removed from the course
/// - `404 Not Found` - The race is not assigned to this course
/// - `500 Internal Server Error` - Database error or half-applied write
#[utoipa::path(
    delete,
    path = "/courses/{course_id}/races/{race_id}",
    tag = RELATIONSHIP_TAG,
    params(
        ("course_id" = i32, Path, description = "Course ID"),
        ("race_id" = i32, Path, description = "Race ID")
    ),
    responses(
        (status = 204, description = "Race removed from course"),
        (status = 404, description = "Race is not assigned to this course", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn detach_course_race(
    State(state): State<AppState>,
    Path((course_id, race_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let (Ok(course_id), Ok(race_id)) = (
        parse_id(Kind::Course, &course_id),
        parse_id(Kind::Race, &race_id),
    ) else {
        return Err(RelationshipError::CourseNotAssigned.into());
    };

    RelationshipService::new(&state.db)
        .detach_course_race(course_id, race_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Enter an athlete in a race.
///
/// # Access Control
/// - Race creator or athlete owner
///
/// # Returns
/// - `204 No Content` - Athlete entered
/// - `401 Unauthorized` - No valid bearer token
/// - `403 Forbidden` - Caller owns neither document, or the athlete is already entered
/// - `404 Not Found` - Race or athlete does not exist
/// - `500 Internal Server Error` - Database error or half-applied write
#[utoipa::path(
    put,
    path = "/races/{race_id}/athletes/{athlete_id}",
    tag = RELATIONSHIP_TAG,
    params(
        ("race_id" = i32, Path, description = "Race ID"),
        ("athlete_id" = i32, Path, description = "Athlete ID")
    ),
    responses(
        (status = 204, description = "Athlete entered in race"),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Not authorized or already entered", body = ErrorDto),
        (status = 404, description = "Race or athlete not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn attach_race_athlete(
    State(state): State<AppState>,
    caller: Caller,
    links: Links,
    Path((race_id, athlete_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let guard = AuthGuard::new(&caller);
    guard.require(&[])?;

    let (race, athlete) = find_race_and_athlete(&state, &race_id, &athlete_id).await?;
    guard.require(&[Permission::OwnerOfAny(&[&race as &dyn Resource, &athlete])])?;

    RelationshipService::new(&state.db)
        .attach_race_athlete(&race, &athlete, &links)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Withdraw an athlete from a race.
///
/// # Access Control
/// - Race creator or athlete owner
///
/// # Returns
/// - `204 No Content` - Athlete withdrawn
/// - `401 Unauthorized` - No valid bearer token
/// - `403 Forbidden` - Caller owns neither document
/// - `404 Not Found` - Race or athlete does not exist, or the athlete is not entered
/// - `500 Internal Server Error` - Database error or half-applied write
#[utoipa::path(
    delete,
    path = "/races/{race_id}/athletes/{athlete_id}",
    tag = RELATIONSHIP_TAG,
    params(
        ("race_id" = i32, Path, description = "Race ID"),
        ("athlete_id" = i32, Path, description = "Athlete ID")
    ),
    responses(
        (status = 204, description = "Athlete withdrawn from race"),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Not authorized", body = ErrorDto),
        (status = 404, description = "Athlete is not entered in this race", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn detach_race_athlete(
    State(state): State<AppState>,
    caller: Caller,
    Path((race_id, athlete_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let guard = AuthGuard::new(&caller);
    guard.require(&[])?;

    let (race, athlete) = find_race_and_athlete(&state, &race_id, &athlete_id).await?;
    guard.require(&[Permission::OwnerOfAny(&[&race as &dyn Resource, &athlete])])?;

    RelationshipService::new(&state.db)
        .detach_race_athlete(&race, &athlete)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

async fn find_race_and_athlete(
    state: &AppState,
    race_id: &str,
    athlete_id: &str,
) -> Result<(Stored<Race>, Stored<Athlete>), AppError> {
    let (Ok(race_id), Ok(athlete_id)) = (
        parse_id(Kind::Race, race_id),
        parse_id(Kind::Athlete, athlete_id),
    ) else {
        return Err(RelationshipError::RaceOrAthleteNotFound.into());
    };

    let race = RaceService::new(&state.db).get(race_id).await?;
    let athlete = AthleteService::new(&state.db).get(athlete_id).await?;

    match (race, athlete) {
        (Some(race), Some(athlete)) => Ok((race, athlete)),
        _ => Err(RelationshipError::RaceOrAthleteNotFound.into()),
    }
}
