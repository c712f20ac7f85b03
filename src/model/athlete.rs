use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::model::api::ReferenceDto;

/// Athlete profile fields accepted by PATCH and PUT.
///
/// `age` is coerced to an integer during validation, so numeric strings are accepted.
#[derive(Deserialize, Default, Debug, ToSchema)]
pub struct AthleteInputDto {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[schema(value_type = Option<i64>)]
    pub age: Option<Value>,
    pub school: Option<String>,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct AthleteDto {
    pub id: i32,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub age: Option<i64>,
    pub school: Option<String>,
    pub races: Vec<ReferenceDto>,
    pub sub_id: String,
    #[serde(rename = "self")]
    pub self_link: String,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct AthletePageDto {
    pub athletes: Vec<AthleteDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
}
