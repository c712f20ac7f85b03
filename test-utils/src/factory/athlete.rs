//! Athlete factory for creating test athlete documents.

use crate::factory::helpers::{insert_document, next_id, reference};
use entity::document::kind;
use sea_orm::{DatabaseConnection, DbErr};
use serde_json::{json, Value};

/// Factory for creating test athletes with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// let athlete = AthleteFactory::new(&db, "auth0|runner")
///     .first_name("Ada")
///     .race(race.id)
///     .build()
///     .await?;
/// ```
pub struct AthleteFactory<'a> {
    db: &'a DatabaseConnection,
    sub_id: String,
    first_name: Option<String>,
    last_name: Option<String>,
    age: Option<i64>,
    school: Option<String>,
    races: Vec<Value>,
}

impl<'a> AthleteFactory<'a> {
    /// Creates a new AthleteFactory owned by `sub_id` with null profile fields.
    pub fn new(db: &'a DatabaseConnection, sub_id: impl Into<String>) -> Self {
        Self {
            db,
            sub_id: sub_id.into(),
            first_name: None,
            last_name: None,
            age: None,
            school: None,
            races: Vec::new(),
        }
    }

    pub fn first_name(mut self, first_name: impl Into<String>) -> Self {
        self.first_name = Some(first_name.into());
        self
    }

    pub fn last_name(mut self, last_name: impl Into<String>) -> Self {
        self.last_name = Some(last_name.into());
        self
    }

    pub fn age(mut self, age: i64) -> Self {
        self.age = Some(age);
        self
    }

    pub fn school(mut self, school: impl Into<String>) -> Self {
        self.school = Some(school.into());
        self
    }

    /// Adds a race reference to the athlete's `races` list.
    ///
    /// Only this side is written; pair it with `RaceFactory::athlete` for a consistent
    /// relationship.
    pub fn race(mut self, race_id: i32) -> Self {
        self.races.push(reference("races", race_id));
        self
    }

    /// Builds and inserts the athlete document.
    pub async fn build(self) -> Result<entity::document::Model, DbErr> {
        let data = json!({
            "first_name": self.first_name,
            "last_name": self.last_name,
            "age": self.age,
            "school": self.school,
            "races": self.races,
            "sub_id": self.sub_id,
        });

        insert_document(self.db, kind::ATHLETES, data).await
    }
}

/// Creates an athlete with a unique owner identity and no races.
pub async fn create_athlete(db: &DatabaseConnection) -> Result<entity::document::Model, DbErr> {
    AthleteFactory::new(db, format!("auth0|athlete-{}", next_id()))
        .build()
        .await
}
