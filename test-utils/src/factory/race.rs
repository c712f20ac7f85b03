//! Race factory for creating test race documents.

use crate::factory::helpers::{insert_document, next_id, reference};
use entity::document::kind;
use sea_orm::{DatabaseConnection, DbErr};
use serde_json::{json, Value};

/// Factory for creating test races with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// let race = RaceFactory::new(&db, "auth0|creator")
///     .name("Spring 5k")
///     .max_entries(40)
///     .build()
///     .await?;
/// ```
pub struct RaceFactory<'a> {
    db: &'a DatabaseConnection,
    creator_id: String,
    name: String,
    race_type: String,
    max_entries: i64,
    course: Option<Value>,
    athletes: Vec<Value>,
}

impl<'a> RaceFactory<'a> {
    /// Creates a new RaceFactory created by `creator_id` with default fields.
    ///
    /// Defaults:
    /// - name: `"Race {n}"`
    /// - type: `"5k"`
    /// - max_entries: `50`
    pub fn new(db: &'a DatabaseConnection, creator_id: impl Into<String>) -> Self {
        Self {
            db,
            creator_id: creator_id.into(),
            name: format!("Race {}", next_id()),
            race_type: "5k".to_string(),
            max_entries: 50,
            course: None,
            athletes: Vec::new(),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn race_type(mut self, race_type: impl Into<String>) -> Self {
        self.race_type = race_type.into();
        self
    }

    pub fn max_entries(mut self, max_entries: i64) -> Self {
        self.max_entries = max_entries;
        self
    }

    /// Sets the race's `course` reference (race side only).
    pub fn course(mut self, course_id: i32) -> Self {
        self.course = Some(reference("courses", course_id));
        self
    }

    /// Adds an athlete reference to the race's `athletes` list (race side only).
    pub fn athlete(mut self, athlete_id: i32) -> Self {
        self.athletes.push(reference("athletes", athlete_id));
        self
    }

    /// Builds and inserts the race document.
    pub async fn build(self) -> Result<entity::document::Model, DbErr> {
        let data = json!({
            "name": self.name,
            "type": self.race_type,
            "max_entries": self.max_entries,
            "athletes": self.athletes,
            "course": self.course,
            "creator_id": self.creator_id,
        });

        insert_document(self.db, kind::RACES, data).await
    }
}

/// Creates a race with default fields owned by `creator_id`.
pub async fn create_race(
    db: &DatabaseConnection,
    creator_id: impl Into<String>,
) -> Result<entity::document::Model, DbErr> {
    RaceFactory::new(db, creator_id).build().await
}
