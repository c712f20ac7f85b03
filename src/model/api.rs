use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ErrorDto {
    pub error: String,
}

/// `{id, self}` pointer to a related document.
#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct ReferenceDto {
    pub id: i32,
    #[serde(rename = "self")]
    pub self_link: String,
}
