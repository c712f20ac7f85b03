use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::ErrorDto,
        athlete::{AthleteDto, AthleteInputDto, AthletePageDto},
    },
    server::{
        controller::ListQuery,
        error::AppError,
        middleware::{
            auth::{AuthGuard, Caller, Permission},
            extract::{AcceptsJson, ApiJson},
        },
        model::{
            athlete::{Athlete, AthleteProfile},
            document::{Kind, Stored},
            link::Links,
        },
        service::{
            athlete::{AthleteService, Registration},
            listing::ListingService,
        },
        state::AppState,
        util::parse::parse_id,
    },
};

/// Tag for grouping athlete endpoints in OpenAPI documentation
pub static ATHLETE_TAG: &str = "athlete";

/// Register the caller as an athlete.
///
/// Idempotent per identity: a caller who already has an athlete gets it back with
/// `200 OK` instead of a second one being created.
///
/// # Access Control
/// - Bearer token required
///
/// # Returns
/// - `201 Created` - New athlete with empty profile and no races
/// - `200 OK` - The caller's existing athlete
/// - `401 Unauthorized` - No valid bearer token
/// - `406 Not Acceptable` - Client does not accept JSON
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    post,
    path = "/athletes",
    tag = ATHLETE_TAG,
    responses(
        (status = 201, description = "Registered a new athlete", body = AthleteDto),
        (status = 200, description = "Caller is already registered", body = AthleteDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 406, description = "Client does not accept JSON", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn register_athlete(
    _: AcceptsJson,
    State(state): State<AppState>,
    caller: Caller,
    links: Links,
) -> Result<impl IntoResponse, AppError> {
    let identity = AuthGuard::new(&caller).require(&[])?;

    let response = match AthleteService::new(&state.db).register(identity).await? {
        Registration::Created(athlete) => (StatusCode::CREATED, Json(athlete.into_dto(&links))),
        Registration::Existing(athlete) => (StatusCode::OK, Json(athlete.into_dto(&links))),
    };

    Ok(response)
}

/// List athletes one page at a time.
///
/// # Returns
/// - `200 OK` - Page of athletes with a `next` link when more exist
/// - `400 Bad Request` - Cursor was not issued by this service
/// - `406 Not Acceptable` - Client does not accept JSON
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    get,
    path = "/athletes",
    tag = ATHLETE_TAG,
    params(ListQuery),
    responses(
        (status = 200, description = "Page of athletes", body = AthletePageDto),
        (status = 400, description = "Invalid cursor", body = ErrorDto),
        (status = 406, description = "Client does not accept JSON", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_athletes(
    _: AcceptsJson,
    State(state): State<AppState>,
    links: Links,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let cursor = query.cursor()?;

    let page = ListingService::new(&state.db, state.page_size)
        .list::<Athlete>(cursor, None)
        .await?;

    Ok((StatusCode::OK, Json(page.into_dto(&links))))
}

/// Get an athlete by ID.
///
/// # Access Control
/// - Athlete owner only
///
/// # Returns
/// - `200 OK` - The athlete
/// - `401 Unauthorized` - No valid bearer token
/// - `403 Forbidden` - Caller does not own the athlete
/// - `404 Not Found` - No athlete with this ID
/// - `406 Not Acceptable` - Client does not accept JSON
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    get,
    path = "/athletes/{athlete_id}",
    tag = ATHLETE_TAG,
    params(
        ("athlete_id" = i32, Path, description = "Athlete ID")
    ),
    responses(
        (status = 200, description = "Successfully retrieved athlete", body = AthleteDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Caller does not own the athlete", body = ErrorDto),
        (status = 404, description = "Athlete not found", body = ErrorDto),
        (status = 406, description = "Client does not accept JSON", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn get_athlete(
    _: AcceptsJson,
    State(state): State<AppState>,
    caller: Caller,
    links: Links,
    Path(athlete_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let guard = AuthGuard::new(&caller);
    guard.require(&[])?;

    let athlete = find_athlete(&AthleteService::new(&state.db), &athlete_id).await?;
    guard.require(&[Permission::OwnerOf(&athlete)])?;

    Ok((StatusCode::OK, Json(athlete.into_dto(&links))))
}

/// Update supplied profile fields of an athlete.
///
/// # Access Control
/// - Athlete owner only
///
/// # Returns
/// - `200 OK` - The updated athlete
/// - `401 Unauthorized` - No valid bearer token
/// - `403 Forbidden` - Caller does not own the athlete, or a field is invalid
/// - `404 Not Found` - No athlete with this ID
/// - `406 Not Acceptable` - Client does not accept JSON
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    patch,
    path = "/athletes/{athlete_id}",
    tag = ATHLETE_TAG,
    params(
        ("athlete_id" = i32, Path, description = "Athlete ID")
    ),
    request_body = AthleteInputDto,
    responses(
        (status = 200, description = "Successfully updated athlete", body = AthleteDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Caller does not own the athlete or invalid input", body = ErrorDto),
        (status = 404, description = "Athlete not found", body = ErrorDto),
        (status = 406, description = "Client does not accept JSON", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn update_athlete(
    _: AcceptsJson,
    State(state): State<AppState>,
    caller: Caller,
    links: Links,
    Path(athlete_id): Path<String>,
    ApiJson(payload): ApiJson<AthleteInputDto>,
) -> Result<impl IntoResponse, AppError> {
    let guard = AuthGuard::new(&caller);
    guard.require(&[])?;

    let service = AthleteService::new(&state.db);
    let athlete = find_athlete(&service, &athlete_id).await?;
    guard.require(&[Permission::OwnerOf(&athlete)])?;

    let profile = AthleteProfile::from_dto(payload)?;
    let athlete = service.update(athlete, profile).await?;

    Ok((StatusCode::OK, Json(athlete.into_dto(&links))))
}

/// Replace the profile of an athlete.
///
/// Profile fields left out of the body are cleared. Races and owner are preserved.
///
/// # Access Control
/// - Athlete owner only
#[utoipa::path(
    put,
    path = "/athletes/{athlete_id}",
    tag = ATHLETE_TAG,
    params(
        ("athlete_id" = i32, Path, description = "Athlete ID")
    ),
    request_body = AthleteInputDto,
    responses(
        (status = 200, description = "Successfully replaced athlete", body = AthleteDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Caller does not own the athlete or invalid input", body = ErrorDto),
        (status = 404, description = "Athlete not found", body = ErrorDto),
        (status = 406, description = "Client does not accept JSON", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn replace_athlete(
    _: AcceptsJson,
    State(state): State<AppState>,
    caller: Caller,
    links: Links,
    Path(athlete_id): Path<String>,
    ApiJson(payload): ApiJson<AthleteInputDto>,
) -> Result<impl IntoResponse, AppError> {
    let guard = AuthGuard::new(&caller);
    guard.require(&[])?;

    let service = AthleteService::new(&state.db);
    let athlete = find_athlete(&service, &athlete_id).await?;
    guard.require(&[Permission::OwnerOf(&athlete)])?;

    let profile = AthleteProfile::from_dto(payload)?;
    let athlete = service.replace(athlete, profile).await?;

    Ok((StatusCode::OK, Json(athlete.into_dto(&links))))
}

/// Delete an athlete.
///
/// The athlete is withdrawn from every race it is entered in before the document is
/// removed.
///
/// # Access Control
/// - Athlete owner only
///
/// # Returns
/// - `204 No Content` - Athlete deleted
/// - `401 Unauthorized` - No valid bearer token
/// - `403 Forbidden` - Caller does not own the athlete
/// - `404 Not Found` - No athlete with this ID
/// - `500 Internal Server Error` - Database error or incomplete cascade
#[utoipa::path(
    delete,
    path = "/athletes/{athlete_id}",
    tag = ATHLETE_TAG,
    params(
        ("athlete_id" = i32, Path, description = "Athlete ID")
    ),
    responses(
        (status = 204, description = "Successfully deleted athlete"),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Caller does not own the athlete", body = ErrorDto),
        (status = 404, description = "Athlete not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn delete_athlete(
    State(state): State<AppState>,
    caller: Caller,
    Path(athlete_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let guard = AuthGuard::new(&caller);
    guard.require(&[])?;

    let service = AthleteService::new(&state.db);
    let athlete = find_athlete(&service, &athlete_id).await?;
    guard.require(&[Permission::OwnerOf(&athlete)])?;

    service.delete(athlete).await?;

    Ok(StatusCode::NO_CONTENT)
}

async fn find_athlete(
    service: &AthleteService<'_>,
    athlete_id: &str,
) -> Result<Stored<Athlete>, AppError> {
    let id = parse_id(Kind::Athlete, athlete_id)?;

    service
        .get(id)
        .await?
        .ok_or_else(|| AppError::not_found(Kind::Athlete))
}
