use axum::{
    routing::{get, put},
    Router,
};
use utoipa::{
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    model::{
        api::{ErrorDto, ReferenceDto},
        athlete::{AthleteDto, AthleteInputDto, AthletePageDto},
        course::{CourseDto, CourseInputDto, CoursePageDto},
        race::{RaceDto, RaceInputDto, RacePageDto},
    },
    server::{
        controller::{athlete, collection::method_not_allowed, course, race, relationship},
        state::AppState,
    },
};

#[derive(OpenApi)]
#[openapi(
    paths(
        course::create_course,
        course::get_courses,
        course::get_course,
        course::update_course,
        course::replace_course,
        course::delete_course,
        race::create_race,
        race::get_races,
        race::get_race,
        race::update_race,
        race::replace_race,
        race::delete_race,
        athlete::register_athlete,
        athlete::get_athletes,
        athlete::get_athlete,
        athlete::update_athlete,
        athlete::replace_athlete,
        athlete::delete_athlete,
        relationship::attach_course_race,
        relationship::detach_course_race,
        relationship::attach_race_athlete,
        relationship::detach_race_athlete,
    ),
    components(schemas(
        ErrorDto,
        ReferenceDto,
        AthleteDto,
        AthleteInputDto,
        AthletePageDto,
        CourseDto,
        CourseInputDto,
        CoursePageDto,
        RaceDto,
        RaceInputDto,
        RacePageDto,
    )),
    modifiers(&BearerSecurity),
    tags(
        (name = "course", description = "Courses and their races"),
        (name = "race", description = "Races owned by their creator"),
        (name = "athlete", description = "Athletes owned by their identity"),
        (name = "relationship", description = "Course/race and race/athlete assignments"),
    ),
)]
pub struct ApiDoc;

struct BearerSecurity;

impl Modify for BearerSecurity {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            );
        }
    }
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/courses",
            get(course::get_courses)
                .post(course::create_course)
                .patch(method_not_allowed)
                .put(method_not_allowed)
                .delete(method_not_allowed),
        )
        .route(
            "/courses/{course_id}",
            get(course::get_course)
                .patch(course::update_course)
                .put(course::replace_course)
                .delete(course::delete_course),
        )
        .route(
            "/courses/{course_id}/races/{race_id}",
            put(relationship::attach_course_race).delete(relationship::detach_course_race),
        )
        .route(
            "/races",
            get(race::get_races)
                .post(race::create_race)
                .patch(method_not_allowed)
                .put(method_not_allowed)
                .delete(method_not_allowed),
        )
        .route(
            "/races/{race_id}",
            get(race::get_race)
                .patch(race::update_race)
                .put(race::replace_race)
                .delete(race::delete_race),
        )
        .route(
            "/races/{race_id}/athletes/{athlete_id}",
            put(relationship::attach_race_athlete).delete(relationship::detach_race_athlete),
        )
        .route(
            "/athletes",
            get(athlete::get_athletes)
                .post(athlete::register_athlete)
                .patch(method_not_allowed)
                .put(method_not_allowed)
                .delete(method_not_allowed),
        )
        .route(
            "/athletes/{athlete_id}",
            get(athlete::get_athlete)
                .patch(athlete::update_athlete)
                .put(athlete::replace_athlete)
                .delete(athlete::delete_athlete),
        )
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
