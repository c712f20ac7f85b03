use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::model::api::ReferenceDto;

/// Course fields accepted by POST, PATCH and PUT.
#[derive(Deserialize, Default, Debug, ToSchema)]
pub struct CourseInputDto {
    pub name: Option<String>,
    #[schema(value_type = Option<i64>)]
    pub distance: Option<Value>,
    pub city: Option<String>,
    pub state: Option<String>,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct CourseDto {
    pub id: i32,
    pub name: String,
    pub distance: i64,
    pub city: String,
    pub state: String,
    pub races: Vec<ReferenceDto>,
    #[serde(rename = "self")]
    pub self_link: String,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct CoursePageDto {
    pub courses: Vec<CourseDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
}
