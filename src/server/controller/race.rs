use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::ErrorDto,
        race::{RaceDto, RaceInputDto, RacePageDto},
    },
    server::{
        controller::ListQuery,
        error::AppError,
        middleware::{
            auth::{AuthGuard, Caller, Permission},
            extract::{AcceptsJson, ApiJson},
        },
        model::{
            document::{Kind, Stored},
            link::Links,
            race::{Race, RaceFields, RacePatch},
        },
        service::{listing::ListingService, race::RaceService},
        state::AppState,
        util::parse::parse_id,
    },
};

/// Tag for grouping race endpoints in OpenAPI documentation
pub static RACE_TAG: &str = "race";

/// Create a new race.
///
/// The caller becomes the race's creator. A new race has no course and no athletes.
///
/// # Access Control
/// - Bearer token required
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `caller` - Identity resolved from the bearer token
/// - `links` - Base for the `self` link of the created race
/// - `payload` - Race fields (name, type, max_entries)
///
/// # Returns
/// - `201 Created` - The new race
/// - `400 Bad Request` - A required field is missing
/// - `401 Unauthorized` - No valid bearer token
/// - `403 Forbidden` - A field failed validation
/// - `406 Not Acceptable` - Client does not accept JSON
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    post,
    path = "/races",
    tag = RACE_TAG,
    request_body = RaceInputDto,
    responses(
        (status = 201, description = "Successfully created race", body = RaceDto),
        (status = 400, description = "Missing required attribute", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Invalid input", body = ErrorDto),
        (status = 406, description = "Client does not accept JSON", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn create_race(
    _: AcceptsJson,
    State(state): State<AppState>,
    caller: Caller,
    links: Links,
    ApiJson(payload): ApiJson<RaceInputDto>,
) -> Result<impl IntoResponse, AppError> {
    let identity = AuthGuard::new(&caller).require(&[])?;

    let fields = RaceFields::from_dto(payload)?;

    let race = RaceService::new(&state.db).create(fields, identity).await?;

    Ok((StatusCode::CREATED, Json(race.into_dto(&links))))
}

/// List the caller's races one page at a time.
///
/// The page is fetched first and races created by someone else are then dropped, so a
/// page may hold fewer races than the page size while still carrying a `next` link.
///
/// # Access Control
/// - Bearer token required; only the caller's races are returned
///
/// # Returns
/// - `200 OK` - Page of races
/// - `400 Bad Request` - Cursor was not issued by this service
/// - `401 Unauthorized` - No valid bearer token
/// - `406 Not Acceptable` - Client does not accept JSON
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    get,
    path = "/races",
    tag = RACE_TAG,
    params(ListQuery),
    responses(
        (status = 200, description = "Page of the caller's races", body = RacePageDto),
        (status = 400, description = "Invalid cursor", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 406, description = "Client does not accept JSON", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn get_races(
    _: AcceptsJson,
    State(state): State<AppState>,
    caller: Caller,
    links: Links,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let identity = AuthGuard::new(&caller).require(&[])?;

    let cursor = query.cursor()?;

    let page = ListingService::new(&state.db, state.page_size)
        .list::<Race>(cursor, Some(identity))
        .await?;

    Ok((StatusCode::OK, Json(page.into_dto(&links))))
}

/// Get a race by ID.
///
/// # Access Control
/// - Race creator only
///
/// # Returns
/// - `200 OK` - The race
/// - `401 Unauthorized` - No valid bearer token
/// - `403 Forbidden` - Caller did not create the race
/// - `404 Not Found` - No race with this ID
/// - `406 Not Acceptable` - Client does not accept JSON
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    get,
    path = "/races/{race_id}",
    tag = RACE_TAG,
    params(
        ("race_id" = i32, Path, description = "Race ID")
    ),
    responses(
        (status = 200, description = "Successfully retrieved race", body = RaceDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Caller did not create the race", body = ErrorDto),
        (status = 404, description = "Race not found", body = ErrorDto),
        (status = 406, description = "Client does not accept JSON", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn get_race(
    _: AcceptsJson,
    State(state): State<AppState>,
    caller: Caller,
    links: Links,
    Path(race_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let guard = AuthGuard::new(&caller);
    guard.require(&[])?;

    let race = find_race(&RaceService::new(&state.db), &race_id).await?;
    guard.require(&[Permission::OwnerOf(&race)])?;

    Ok((StatusCode::OK, Json(race.into_dto(&links))))
}

/// Update supplied fields of a race.
///
/// Course, athletes and creator are preserved.
///
/// # Access Control
/// - Race creator only
///
/// # Returns
/// - `200 OK` - The updated race
/// - `401 Unauthorized` - No valid bearer token
/// - `403 Forbidden` - Caller did not create the race, or a supplied field is invalid
/// - `404 Not Found` - No race with this ID
/// - `406 Not Acceptable` - Client does not accept JSON
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    patch,
    path = "/races/{race_id}",
    tag = RACE_TAG,
    params(
        ("race_id" = i32, Path, description = "Race ID")
    ),
    request_body = RaceInputDto,
    responses(
        (status = 200, description = "Successfully updated race", body = RaceDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Caller did not create the race or invalid input", body = ErrorDto),
        (status = 404, description = "Race not found", body = ErrorDto),
        (status = 406, description = "Client does not accept JSON", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn update_race(
    _: AcceptsJson,
    State(state): State<AppState>,
    caller: Caller,
    links: Links,
    Path(race_id): Path<String>,
    ApiJson(payload): ApiJson<RaceInputDto>,
) -> Result<impl IntoResponse, AppError> {
    let guard = AuthGuard::new(&caller);
    guard.require(&[])?;

    let service = RaceService::new(&state.db);
    let race = find_race(&service, &race_id).await?;
    guard.require(&[Permission::OwnerOf(&race)])?;

    let patch = RacePatch::from_dto(payload)?;
    let race = service.update(race, patch).await?;

    Ok((StatusCode::OK, Json(race.into_dto(&links))))
}

/// Replace all fields of a race.
///
/// # Access Control
/// - Race creator only
///
/// # Returns
/// - `200 OK` - The replaced race
/// - `400 Bad Request` - A required field is missing
/// - `401 Unauthorized` - No valid bearer token
/// - `403 Forbidden` - Caller did not create the race, or a field is invalid
/// - `404 Not Found` - No race with this ID
/// - `406 Not Acceptable` - Client does not accept JSON
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    put,
    path = "/races/{race_id}",
    tag = RACE_TAG,
    params(
        ("race_id" = i32, Path, description = "Race ID")
    ),
    request_body = RaceInputDto,
    responses(
        (status = 200, description = "Successfully replaced race", body = RaceDto),
        (status = 400, description = "Missing required attribute", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Caller did not create the race or invalid input", body = ErrorDto),
        (status = 404, description = "Race not found", body = ErrorDto),
        (status = 406, description = "Client does not accept JSON", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn replace_race(
    _: AcceptsJson,
    State(state): State<AppState>,
    caller: Caller,
    links: Links,
    Path(race_id): Path<String>,
    ApiJson(payload): ApiJson<RaceInputDto>,
) -> Result<impl IntoResponse, AppError> {
    let guard = AuthGuard::new(&caller);
    guard.require(&[])?;

    let service = RaceService::new(&state.db);
    let race = find_race(&service, &race_id).await?;
    guard.require(&[Permission::OwnerOf(&race)])?;

    let fields = RaceFields::from_dto(payload)?;
    let race = service.replace(race, fields).await?;

    Ok((StatusCode::OK, Json(race.into_dto(&links))))
}

/// Delete a race.
///
/// The race is detached from its course and withdrawn from every athlete's race list
/// before the document is removed.
///
/// # Access Control
/// - Race creator only
///
/// # Returns
/// - `204 No Content` - Race deleted
/// - `401 Unauthorized` - No valid bearer token
/// - `403 Forbidden` - Caller did not create the race
/// - `404 Not Found` - No race with this ID
/// - `500 Internal Server Error` - Database error or incomplete cascade
#[utoipa::path(
    delete,
    path = "/races/{race_id}",
    tag = RACE_TAG,
    params(
        ("race_id" = i32, Path, description = "Race ID")
    ),
    responses(
        (status = 204, description = "Successfully deleted race"),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Caller did not create the race", body = ErrorDto),
        (status = 404, description = "Race not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn delete_race(
    State(state): State<AppState>,
    caller: Caller,
    Path(race_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let guard = AuthGuard::new(&caller);
    guard.require(&[])?;

    let service = RaceService::new(&state.db);
    let race = find_race(&service, &race_id).await?;
    guard.require(&[Permission::OwnerOf(&race)])?;

    service.delete(race).await?;

    Ok(StatusCode::NO_CONTENT)
}

async fn find_race(service: &RaceService<'_>, race_id: &str) -> Result<Stored<Race>, AppError> {
    let id = parse_id(Kind::Race, race_id)?;

    service
        .get(id)
        .await?
        .ok_or_else(|| AppError::not_found(Kind::Race))
}
