//! Race documents and the parameters used to create and update them.

use serde::{Deserialize, Serialize};

use crate::{
    model::race::{RaceDto, RaceInputDto, RacePageDto},
    server::{
        error::AppError,
        model::{
            document::{Document, Kind, Owned, Page, Stored},
            identity::Identity,
            link::Links,
            reference::{Reference, ReferenceList},
        },
        util::validate::{
            check_optional_text, check_text, coerce_non_negative, NAME_LIMIT, SHORT_TEXT_LIMIT,
        },
    },
};

/// Race as persisted in the `Races` key space.
///
/// `creator_id` is set from the caller at creation and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Race {
    pub name: String,
    #[serde(rename = "type")]
    pub race_type: String,
    pub max_entries: i64,
    #[serde(default)]
    pub course: Option<Reference>,
    #[serde(default)]
    pub athletes: ReferenceList,
    pub creator_id: String,
}

impl Owned for Race {
    fn owner(&self) -> Option<&str> {
        Some(&self.creator_id)
    }
}

impl Document for Race {
    const KIND: Kind = Kind::Race;
}

impl Race {
    /// Creates a race owned by `creator` with no course and no athletes.
    pub fn new(fields: RaceFields, creator: &Identity) -> Self {
        Self {
            name: fields.name,
            race_type: fields.race_type,
            max_entries: fields.max_entries,
            course: None,
            athletes: ReferenceList::new(),
            creator_id: creator.sub.clone(),
        }
    }

    /// Replaces every scalar field, keeping relationships and the creator.
    pub fn replace(&mut self, fields: RaceFields) {
        self.name = fields.name;
        self.race_type = fields.race_type;
        self.max_entries = fields.max_entries;
    }

    /// Merges supplied fields, keeping relationships and the creator.
    pub fn apply(&mut self, patch: RacePatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(race_type) = patch.race_type {
            self.race_type = race_type;
        }
        if let Some(max_entries) = patch.max_entries {
            self.max_entries = max_entries;
        }
    }
}

/// Validated race fields for POST and PUT; every field is required.
#[derive(Debug, Clone, PartialEq)]
pub struct RaceFields {
    pub name: String,
    pub race_type: String,
    pub max_entries: i64,
}

impl RaceFields {
    /// Converts a request body into race fields.
    ///
    /// # Returns
    /// - `Ok(RaceFields)` - All fields present and valid
    /// - `Err(AppError::BadRequest)` - At least one field is missing
    /// - `Err(AppError::ValidationErr)` - At least one field is invalid
    pub fn from_dto(dto: RaceInputDto) -> Result<Self, AppError> {
        let (Some(name), Some(race_type), Some(max_entries)) =
            (dto.name, dto.race_type, dto.max_entries)
        else {
            return Err(AppError::missing_attributes());
        };

        check_text("name", &name, NAME_LIMIT)?;
        check_text("type", &race_type, SHORT_TEXT_LIMIT)?;
        let max_entries = coerce_non_negative("max_entries", &max_entries)?;

        Ok(Self {
            name,
            race_type,
            max_entries,
        })
    }
}

/// Validated partial race update for PATCH.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RacePatch {
    pub name: Option<String>,
    pub race_type: Option<String>,
    pub max_entries: Option<i64>,
}

impl RacePatch {
    /// Converts a request body into a patch, validating only the supplied fields.
    pub fn from_dto(dto: RaceInputDto) -> Result<Self, AppError> {
        check_optional_text("name", dto.name.as_deref(), NAME_LIMIT)?;
        check_optional_text("type", dto.race_type.as_deref(), SHORT_TEXT_LIMIT)?;
        let max_entries = dto
            .max_entries
            .as_ref()
            .map(|value| coerce_non_negative("max_entries", value))
            .transpose()?;

        Ok(Self {
            name: dto.name,
            race_type: dto.race_type,
            max_entries,
        })
    }
}

impl Stored<Race> {
    pub fn into_dto(self, links: &Links) -> RaceDto {
        RaceDto {
            self_link: links.document(Kind::Race, self.id),
            id: self.id,
            name: self.document.name,
            race_type: self.document.race_type,
            max_entries: self.document.max_entries,
            course: self.document.course.map(Reference::into_dto),
            athletes: self.document.athletes.into_dto(),
            creator_id: self.document.creator_id,
        }
    }
}

impl Page<Race> {
    pub fn into_dto(self, links: &Links) -> RacePageDto {
        RacePageDto {
            next: self.next.map(|cursor| links.next_page(Kind::Race, cursor)),
            races: self
                .items
                .into_iter()
                .map(|race| race.into_dto(links))
                .collect(),
        }
    }
}
