//! Athlete documents and profile updates.

use serde::{Deserialize, Serialize};

use crate::{
    model::athlete::{AthleteDto, AthleteInputDto, AthletePageDto},
    server::{
        error::AppError,
        model::{
            document::{Document, Kind, Owned, Page, Stored},
            identity::Identity,
            link::Links,
            reference::ReferenceList,
        },
        util::validate::{check_optional_text, coerce_non_negative, SHORT_TEXT_LIMIT},
    },
};

/// Athlete as persisted in the `Athletes` key space.
///
/// Profile fields start out null; `sub_id` is the identity that registered the athlete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Athlete {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub age: Option<i64>,
    pub school: Option<String>,
    #[serde(default)]
    pub races: ReferenceList,
    pub sub_id: String,
}

impl Owned for Athlete {
    fn owner(&self) -> Option<&str> {
        Some(&self.sub_id)
    }
}

impl Document for Athlete {
    const KIND: Kind = Kind::Athlete;
}

impl Athlete {
    /// Creates an empty athlete profile owned by `identity`.
    pub fn register(identity: &Identity) -> Self {
        Self {
            first_name: None,
            last_name: None,
            age: None,
            school: None,
            races: ReferenceList::new(),
            sub_id: identity.sub.clone(),
        }
    }

    /// Overwrites all profile fields; absent ones become null.
    pub fn replace(&mut self, profile: AthleteProfile) {
        self.first_name = profile.first_name;
        self.last_name = profile.last_name;
        self.age = profile.age;
        self.school = profile.school;
    }

    /// Merges supplied profile fields.
    pub fn apply(&mut self, profile: AthleteProfile) {
        if profile.first_name.is_some() {
            self.first_name = profile.first_name;
        }
        if profile.last_name.is_some() {
            self.last_name = profile.last_name;
        }
        if profile.age.is_some() {
            self.age = profile.age;
        }
        if profile.school.is_some() {
            self.school = profile.school;
        }
    }
}

/// Validated athlete profile fields, shared by PATCH and PUT.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AthleteProfile {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub age: Option<i64>,
    pub school: Option<String>,
}

impl AthleteProfile {
    pub fn from_dto(dto: AthleteInputDto) -> Result<Self, AppError> {
        check_optional_text("first_name", dto.first_name.as_deref(), SHORT_TEXT_LIMIT)?;
        check_optional_text("last_name", dto.last_name.as_deref(), SHORT_TEXT_LIMIT)?;
        check_optional_text("school", dto.school.as_deref(), SHORT_TEXT_LIMIT)?;
        let age = dto
            .age
            .as_ref()
            .map(|value| coerce_non_negative("age", value))
            .transpose()?;

        Ok(Self {
            first_name: dto.first_name,
            last_name: dto.last_name,
            age,
            school: dto.school,
        })
    }
}

impl Stored<Athlete> {
    pub fn into_dto(self, links: &Links) -> AthleteDto {
        AthleteDto {
            self_link: links.document(Kind::Athlete, self.id),
            id: self.id,
            first_name: self.document.first_name,
            last_name: self.document.last_name,
            age: self.document.age,
            school: self.document.school,
            races: self.document.races.into_dto(),
            sub_id: self.document.sub_id,
        }
    }
}

impl Page<Athlete> {
    pub fn into_dto(self, links: &Links) -> AthletePageDto {
        AthletePageDto {
            next: self.next.map(|cursor| links.next_page(Kind::Athlete, cursor)),
            athletes: self
                .items
                .into_iter()
                .map(|athlete| athlete.into_dto(links))
                .collect(),
        }
    }
}
