//! Schema-less document row.
//!
//! Every athlete, race and course is one row: `kind` names the key space and `data`
//! holds the JSON body. Rows are only ever addressed by `(kind, id)`.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "document")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub kind: String,
    pub data: Json,
    /// Bumped by every write; conditional writes compare against it.
    #[sea_orm(default_value = 0)]
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Key spaces of the document store.
pub mod kind {
    pub const ATHLETES: &str = "Athletes";
    pub const RACES: &str = "Races";
    pub const COURSES: &str = "Courses";
}
