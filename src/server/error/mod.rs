//! Error types and HTTP response handling.
//!
//! This module provides the application's error hierarchy and conversion logic for
//! transforming errors into appropriate HTTP responses. The `AppError` enum serves
//! as the top-level error type that wraps domain-specific errors and implements
//! `IntoResponse` for automatic error handling in API endpoints.

pub mod auth;
pub mod config;
pub mod internal;
pub mod relationship;
pub mod validation;

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{
    model::api::ErrorDto,
    server::{
        error::{
            auth::AuthError, config::ConfigError, internal::InternalError,
            relationship::RelationshipError, validation::ValidationError,
        },
        model::document::Kind,
    },
};

/// Message returned for requests missing a required attribute.
pub const MISSING_ATTRIBUTES: &str =
    "The request object is missing at least one of the required attributes.";

/// Top-level application error type.
///
/// Aggregates all possible error types that can occur in the application and provides
/// automatic conversion to HTTP responses. Domain-specific errors like `AuthError` and
/// `RelationshipError` handle their own response mapping, while generic variants provide
/// standard HTTP status codes.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Authentication or authorization error.
    ///
    /// Delegates to `AuthError::into_response()` (401 Unauthorized, 403 Forbidden).
    #[error(transparent)]
    AuthErr(#[from] AuthError),

    /// Request field failed validation.
    ///
    /// Results in 403 Forbidden with the validation message.
    #[error(transparent)]
    ValidationErr(#[from] ValidationError),

    /// Relationship rule violated.
    ///
    /// Delegates to `RelationshipError::into_response()` (403 Forbidden, 404 Not Found).
    #[error(transparent)]
    RelationshipErr(#[from] RelationshipError),

    /// Unexpected state such as a half-applied relationship write.
    #[error(transparent)]
    InternalErr(#[from] InternalError),

    /// Database operation error from SeaORM.
    ///
    /// Results in 500 Internal Server Error with error details logged server-side.
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),

    /// HTTP client request error from reqwest.
    ///
    /// Results in 500 Internal Server Error when the identity provider cannot be reached.
    #[error(transparent)]
    ReqwestErr(#[from] reqwest::Error),

    /// Socket error while binding or serving.
    #[error(transparent)]
    IoErr(#[from] std::io::Error),

    /// Resource not found error.
    ///
    /// Results in 404 Not Found with the provided error message.
    #[error("{0}")]
    NotFound(String),

    /// Invalid request error.
    ///
    /// Results in 400 Bad Request with the provided error message.
    #[error("{0}")]
    BadRequest(String),

    /// Request `Accept` header excludes JSON.
    ///
    /// Results in 406 Not Acceptable.
    #[error("Server only sends application/json data.")]
    NotAcceptable,

    /// Method is not supported on a collection endpoint.
    ///
    /// Results in 405 Method Not Allowed.
    #[error("{method} {path} not allowed.")]
    MethodNotAllowed { method: String, path: String },
}

impl AppError {
    /// 404 for a document that does not exist in its key space.
    pub fn not_found(kind: Kind) -> Self {
        Self::NotFound(format!("No {} with this {}_id exists.", kind, kind))
    }

    /// 400 for a request missing a required attribute.
    pub fn missing_attributes() -> Self {
        Self::BadRequest(MISSING_ATTRIBUTES.to_string())
    }
}

/// Body rejections from the JSON extractor are client errors.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// Converts application errors into HTTP responses.
///
/// Maps each error variant to an appropriate HTTP status code and response body.
/// Internal errors are logged with full details but return generic messages to avoid
/// information leakage.
///
/// # Returns
/// - 400 Bad Request - For `BadRequest` variant
/// - 403 Forbidden - For `ValidationErr`
/// - 404 Not Found - For `NotFound` variant
/// - 405 Method Not Allowed - For `MethodNotAllowed`
/// - 406 Not Acceptable - For `NotAcceptable`
/// - 500 Internal Server Error - For all other error types (DbErr, InternalErr, etc.)
/// - Variable - For `AuthErr` and `RelationshipErr`, delegated to their own mappings
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            Self::AuthErr(err) => err.into_response(),
            Self::RelationshipErr(err) => err.into_response(),
            Self::ValidationErr(err) => (
                StatusCode::FORBIDDEN,
                Json(ErrorDto {
                    error: format!("Request contains at least one invalid input. {}", err),
                }),
            )
                .into_response(),
            Self::NotFound(msg) => {
                (StatusCode::NOT_FOUND, Json(ErrorDto { error: msg })).into_response()
            }
            Self::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, Json(ErrorDto { error: msg })).into_response()
            }
            err @ Self::NotAcceptable => (
                StatusCode::NOT_ACCEPTABLE,
                Json(ErrorDto {
                    error: err.to_string(),
                }),
            )
                .into_response(),
            err @ Self::MethodNotAllowed { .. } => (
                StatusCode::METHOD_NOT_ALLOWED,
                Json(ErrorDto {
                    error: err.to_string(),
                }),
            )
                .into_response(),
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Wrapper type for converting any displayable error into a 500 Internal Server Error response.
///
/// Logs the error message and returns a generic "Internal server error" message to the
/// client to avoid leaking implementation details.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorDto {
                error: "Internal server error".to_string(),
            }),
        )
            .into_response()
    }
}
