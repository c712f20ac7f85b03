use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::ErrorDto,
        course::{CourseDto, CourseInputDto, CoursePageDto},
    },
    server::{
        controller::ListQuery,
        error::AppError,
        middleware::extract::{AcceptsJson, ApiJson},
        model::{
            course::{Course, CourseFields, CoursePatch},
            document::{Kind, Stored},
            link::Links,
        },
        service::{course::CourseService, listing::ListingService},
        state::AppState,
        util::parse::parse_id,
    },
};

/// Tag for grouping course endpoints in OpenAPI documentation
pub static COURSE_TAG: &str = "course";

/// Create a new course.
///
/// Courses have no owner, so no bearer token is required. All four fields must be
/// present; they are validated before anything is written.
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `links` - Base for the `self` link of the created course
/// - `payload` - Course fields (name, distance, city, state)
///
/// # Returns
/// - `201 Created` - The new course with an empty race list
/// - `400 Bad Request` - A required field is missing
/// - `403 Forbidden` - A field failed validation
/// - `406 Not Acceptable` - Client does not accept JSON
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    post,
    path = "/courses",
    tag = COURSE_TAG,
    request_body = CourseInputDto,
    responses(
        (status = 201, description = "Successfully created course", body = CourseDto),
        (status = 400, description = "Missing required attribute", body = ErrorDto),
        (status = 403, description = "Invalid input", body = ErrorDto),
        (status = 406, description = "Client does not accept JSON", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_course(
    _: AcceptsJson,
    State(state): State<AppState>,
    links: Links,
    ApiJson(payload): ApiJson<CourseInputDto>,
) -> Result<impl IntoResponse, AppError> {
    let fields = CourseFields::from_dto(payload)?;

    let course = CourseService::new(&state.db).create(fields).await?;

    Ok((StatusCode::CREATED, Json(course.into_dto(&links))))
}

/// List courses one page at a time.
///
/// # Returns
/// - `200 OK` - Page of courses with a `next` link when more exist
/// - `400 Bad Request` - Cursor was not issued by this service
/// - `406 Not Acceptable` - Client does not accept JSON
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    get,
    path = "/courses",
    tag = COURSE_TAG,
    params(ListQuery),
    responses(
        (status = 200, description = "Page of courses", body = CoursePageDto),
        (status = 400, description = "Invalid cursor", body = ErrorDto),
        (status = 406, description = "Client does not accept JSON", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_courses(
    _: AcceptsJson,
    State(state): State<AppState>,
    links: Links,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let cursor = query.cursor()?;

    let page = ListingService::new(&state.db, state.page_size)
        .list::<Course>(cursor, None)
        .await?;

    Ok((StatusCode::OK, Json(page.into_dto(&links))))
}

/// Get a course by ID.
///
/// # Returns
/// - `200 OK` - The course
/// - `404 Not Found` - No course with this ID
/// - `406 Not Acceptable` - Client does not accept JSON
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    get,
    path = "/courses/{course_id}",
    tag = COURSE_TAG,
    params(
        ("course_id" = i32, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Successfully retrieved course", body = CourseDto),
        (status = 404, description = "Course not found", body = ErrorDto),
        (status = 406, description = "Client does not accept JSON", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_course(
    _: AcceptsJson,
    State(state): State<AppState>,
    links: Links,
    Path(course_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let course = find_course(&CourseService::new(&state.db), &course_id).await?;

    Ok((StatusCode::OK, Json(course.into_dto(&links))))
}

/// Update supplied fields of a course.
///
/// Only the fields present in the body are validated and written. The race list is
/// never touched by an update.
///
/// # Returns
/// - `200 OK` - The updated course
/// - `403 Forbidden` - A supplied field failed validation
/// - `404 Not Found` - No course with this ID
/// - `406 Not Acceptable` - Client does not accept JSON
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    patch,
    path = "/courses/{course_id}",
    tag = COURSE_TAG,
    params(
        ("course_id" = i32, Path, description = "Course ID")
    ),
    request_body = CourseInputDto,
    responses(
        (status = 200, description = "Successfully updated course", body = CourseDto),
        (status = 403, description = "Invalid input", body = ErrorDto),
        (status = 404, description = "Course not found", body = ErrorDto),
        (status = 406, description = "Client does not accept JSON", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_course(
    _: AcceptsJson,
    State(state): State<AppState>,
    links: Links,
    Path(course_id): Path<String>,
    ApiJson(payload): ApiJson<CourseInputDto>,
) -> Result<impl IntoResponse, AppError> {
    let service = CourseService::new(&state.db);
    let course = find_course(&service, &course_id).await?;

    let patch = CoursePatch::from_dto(payload)?;
    let course = service.update(course, patch).await?;

    Ok((StatusCode::OK, Json(course.into_dto(&links))))
}

/// Replace all fields of a course.
///
/// # Returns
/// - `200 OK` - The replaced course
/// - `400 Bad Request` - A required field is missing
/// - `403 Forbidden` - A field failed validation
/// - `404 Not Found` - No course with this ID
/// - `406 Not Acceptable` - Client does not accept JSON
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    put,
    path = "/courses/{course_id}",
    tag = COURSE_TAG,
    params(
        ("course_id" = i32, Path, description = "Course ID")
    ),
    request_body = CourseInputDto,
    responses(
        (status = 200, description = "Successfully replaced course", body = CourseDto),
        (status = 400, description = "Missing required attribute", body = ErrorDto),
        (status = 403, description = "Invalid input", body = ErrorDto),
        (status = 404, description = "Course not found", body = ErrorDto),
        (status = 406, description = "Client does not accept JSON", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn replace_course(
    _: AcceptsJson,
    State(state): State<AppState>,
    links: Links,
    Path(course_id): Path<String>,
    ApiJson(payload): ApiJson<CourseInputDto>,
) -> Result<impl IntoResponse, AppError> {
    let service = CourseService::new(&state.db);
    let course = find_course(&service, &course_id).await?;

    let fields = CourseFields::from_dto(payload)?;
    let course = service.replace(course, fields).await?;

    Ok((StatusCode::OK, Json(course.into_dto(&links))))
}

/// Delete a course.
///
/// Every race on the course has its course reference cleared before the course itself
/// is removed.
///
/// # Returns
/// - `204 No Content` - Course deleted
/// - `404 Not Found` - No course with this ID
/// - `500 Internal Server Error` - Database error or incomplete cascade
#[utoipa::path(
    delete,
    path = "/courses/{course_id}",
    tag = COURSE_TAG,
    params(
        ("course_id" = i32, Path, description = "Course ID")
    ),
    responses(
        (status = 204, description = "Successfully deleted course"),
        (status = 404, description = "Course not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_course(
    State(state): State<AppState>,
    Path(course_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let service = CourseService::new(&state.db);
    let course = find_course(&service, &course_id).await?;

    service.delete(course).await?;

    Ok(StatusCode::NO_CONTENT)
}

async fn find_course(
    service: &CourseService<'_>,
    course_id: &str,
) -> Result<Stored<Course>, AppError> {
    let id = parse_id(Kind::Course, course_id)?;

    service
        .get(id)
        .await?
        .ok_or_else(|| AppError::not_found(Kind::Course))
}
