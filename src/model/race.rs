use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::model::api::ReferenceDto;

/// Race fields accepted by POST, PATCH and PUT.
#[derive(Deserialize, Default, Debug, ToSchema)]
pub struct RaceInputDto {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub race_type: Option<String>,
    #[schema(value_type = Option<i64>)]
    pub max_entries: Option<Value>,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct RaceDto {
    pub id: i32,
    pub name: String,
    #[serde(rename = "type")]
    pub race_type: String,
    pub max_entries: i64,
    pub course: Option<ReferenceDto>,
    pub athletes: Vec<ReferenceDto>,
    pub creator_id: String,
    #[serde(rename = "self")]
    pub self_link: String,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct RacePageDto {
    pub races: Vec<RaceDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
}
