use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{model::api::ErrorDto, server::model::document::Kind};

#[derive(Error, Debug)]
pub enum AuthError {
    /// Request carried no bearer token on an endpoint that requires one.
    #[error("Request is missing a bearer token")]
    Unauthenticated,

    /// Authorization header is present but not of the form `Bearer <token>`.
    #[error("Authorization header is not a bearer token")]
    MalformedAuthorization,

    /// The identity provider rejected the bearer token.
    #[error("Bearer token rejected by identity provider: {0}")]
    InvalidToken(String),

    /// Caller is authenticated but does not own the document.
    #[error("User {sub} attempted to access {kind} {id} owned by someone else")]
    AccessDenied {
        /// Identity of the caller
        sub: String,
        /// Kind of document the caller tried to access
        kind: Kind,
        /// ID of the document
        id: i32,
    },
}

/// Converts authentication errors into HTTP responses.
///
/// All errors are logged at debug level for diagnostics while keeping client-facing
/// messages generic.
///
/// # Returns
/// - 401 Unauthorized - Missing, malformed or rejected bearer token
/// - 403 Forbidden - Caller does not own the document
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        match self {
            Self::Unauthenticated | Self::MalformedAuthorization | Self::InvalidToken(_) => (
                StatusCode::UNAUTHORIZED,
                Json(ErrorDto {
                    error: "User is not authenticated. Please log in.".to_string(),
                }),
            )
                .into_response(),
            Self::AccessDenied { kind, .. } => (
                StatusCode::FORBIDDEN,
                Json(ErrorDto {
                    error: format!(
                        "You are not authorized to access the {} with this {}_id.",
                        kind, kind
                    ),
                }),
            )
                .into_response(),
        }
    }
}
