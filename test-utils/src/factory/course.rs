//! Course factory for creating test course documents.

use crate::factory::helpers::{insert_document, next_id, reference};
use entity::document::kind;
use sea_orm::{DatabaseConnection, DbErr};
use serde_json::{json, Value};

/// Factory for creating test courses with customizable fields.
pub struct CourseFactory<'a> {
    db: &'a DatabaseConnection,
    name: String,
    distance: i64,
    city: String,
    state: String,
    races: Vec<Value>,
}

impl<'a> CourseFactory<'a> {
    /// Creates a new CourseFactory with default fields.
    ///
    /// Defaults:
    /// - name: `"Course {n}"`
    /// - distance: `5000`
    /// - city: `"Corvallis"`
    /// - state: `"OR"`
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self {
            db,
            name: format!("Course {}", next_id()),
            distance: 5000,
            city: "Corvallis".to_string(),
            state: "OR".to_string(),
            races: Vec::new(),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn distance(mut self, distance: i64) -> Self {
        self.distance = distance;
        self
    }

    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.city = city.into();
        self
    }

    pub fn state(mut self, state: impl Into<String>) -> Self {
        self.state = state.into();
        self
    }

    /// Adds a race reference to the course's `races` list (course side only).
    pub fn race(mut self, race_id: i32) -> Self {
        self.races.push(reference("races", race_id));
        self
    }

    /// Builds and inserts the course document.
    pub async fn build(self) -> Result<entity::document::Model, DbErr> {
        let data = json!({
            "name": self.name,
            "distance": self.distance,
            "city": self.city,
            "state": self.state,
            "races": self.races,
        });

        insert_document(self.db, kind::COURSES, data).await
    }
}

/// Creates a course with default fields and no races.
pub async fn create_course(db: &DatabaseConnection) -> Result<entity::document::Model, DbErr> {
    CourseFactory::new(db).build().await
}
