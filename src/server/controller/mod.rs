//! HTTP handlers for the REST API.
//!
//! Handlers resolve the caller and request links, check access with `AuthGuard`, convert
//! request DTOs into validated params and call the service layer.

pub mod athlete;
pub mod collection;
pub mod course;
pub mod race;
pub mod relationship;

use serde::Deserialize;
use utoipa::IntoParams;

use crate::server::{error::AppError, model::document::Cursor, util::parse::parse_cursor};


/// Query parameters accepted by listing endpoints.
#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// Cursor from the `next` link of a previous page
    pub cursor: Option<String>,
}

impl ListQuery {
    pub fn cursor(&self) -> Result<Option<Cursor>, AppError> {
        self.cursor.as_deref().map(parse_cursor).transpose()
    }
}
