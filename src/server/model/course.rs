//! Course documents and the parameters used to create and update them.
//!
//! Courses are unowned. Their `races` list mirrors the `course` reference held by each
//! race and is only ever changed through the relationship service.

use serde::{Deserialize, Serialize};

use crate::{
    model::course::{CourseDto, CourseInputDto, CoursePageDto},
    server::{
        error::AppError,
        model::{
            document::{Document, Kind, Owned, Page, Stored},
            link::Links,
            reference::ReferenceList,
        },
        util::validate::{
            check_optional_text, check_text, coerce_non_negative, NAME_LIMIT, SHORT_TEXT_LIMIT,
            STATE_LIMIT,
        },
    },
};

/// Course as persisted in the `Courses` key space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub name: String,
    pub distance: i64,
    pub city: String,
    pub state: String,
    #[serde(default)]
    pub races: ReferenceList,
}

impl Owned for Course {
    fn owner(&self) -> Option<&str> {
        None
    }
}

impl Document for Course {
    const KIND: Kind = Kind::Course;
}

impl Course {
    /// Creates a course with no races.
    pub fn new(fields: CourseFields) -> Self {
        Self {
            name: fields.name,
            distance: fields.distance,
            city: fields.city,
            state: fields.state,
            races: ReferenceList::new(),
        }
    }

    /// Replaces every scalar field, keeping `races`.
    pub fn replace(&mut self, fields: CourseFields) {
        self.name = fields.name;
        self.distance = fields.distance;
        self.city = fields.city;
        self.state = fields.state;
    }

    /// Merges supplied fields, keeping `races`.
    pub fn apply(&mut self, patch: CoursePatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(distance) = patch.distance {
            self.distance = distance;
        }
        if let Some(city) = patch.city {
            self.city = city;
        }
        if let Some(state) = patch.state {
            self.state = state;
        }
    }
}

/// Validated course fields for POST and PUT; every field is required.
#[derive(Debug, Clone, PartialEq)]
pub struct CourseFields {
    pub name: String,
    pub distance: i64,
    pub city: String,
    pub state: String,
}

impl CourseFields {
    /// Converts a request body into course fields.
    ///
    /// # Returns
    /// - `Ok(CourseFields)` - All fields present and valid
    /// - `Err(AppError::BadRequest)` - At least one field is missing
    /// - `Err(AppError::ValidationErr)` - At least one field is invalid
    pub fn from_dto(dto: CourseInputDto) -> Result<Self, AppError> {
        let (Some(name), Some(distance), Some(city), Some(state)) =
            (dto.name, dto.distance, dto.city, dto.state)
        else {
            return Err(AppError::missing_attributes());
        };

        check_text("name", &name, NAME_LIMIT)?;
        check_text("city", &city, SHORT_TEXT_LIMIT)?;
        check_text("state", &state, STATE_LIMIT)?;
        let distance = coerce_non_negative("distance", &distance)?;

        Ok(Self {
            name,
            distance,
            city,
            state,
        })
    }
}

/// Validated partial course update for PATCH.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoursePatch {
    pub name: Option<String>,
    pub distance: Option<i64>,
    pub city: Option<String>,
    pub state: Option<String>,
}

impl CoursePatch {
    /// Converts a request body into a patch, validating only the supplied fields.
    pub fn from_dto(dto: CourseInputDto) -> Result<Self, AppError> {
        check_optional_text("name", dto.name.as_deref(), NAME_LIMIT)?;
        check_optional_text("city", dto.city.as_deref(), SHORT_TEXT_LIMIT)?;
        check_optional_text("state", dto.state.as_deref(), STATE_LIMIT)?;
        let distance = dto
            .distance
            .as_ref()
            .map(|value| coerce_non_negative("distance", value))
            .transpose()?;

        Ok(Self {
            name: dto.name,
            distance,
            city: dto.city,
            state: dto.state,
        })
    }
}

impl Stored<Course> {
    pub fn into_dto(self, links: &Links) -> CourseDto {
        CourseDto {
            self_link: links.document(Kind::Course, self.id),
            id: self.id,
            name: self.document.name,
            distance: self.document.distance,
            city: self.document.city,
            state: self.document.state,
            races: self.document.races.into_dto(),
        }
    }
}

impl Page<Course> {
    pub fn into_dto(self, links: &Links) -> CoursePageDto {
        CoursePageDto {
            next: self.next.map(|cursor| links.next_page(Kind::Course, cursor)),
            courses: self
                .items
                .into_iter()
                .map(|course| course.into_dto(links))
                .collect(),
        }
    }
}
