use axum::{
    extract::{FromRequest, FromRequestParts},
    http::{header::ACCEPT, request::Parts, HeaderMap},
};

use crate::server::error::AppError;

/// JSON request body whose rejections are reported as `AppError::BadRequest`.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// Guard for endpoints that respond with JSON.
///
/// Rejects with 406 when the `Accept` header rules out `application/json`. A request
/// without an `Accept` header accepts anything.
pub struct AcceptsJson;

impl<S: Send + Sync> FromRequestParts<S> for AcceptsJson {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if accepts_json(&parts.headers) {
            Ok(AcceptsJson)
        } else {
            Err(AppError::NotAcceptable)
        }
    }
}

fn accepts_json(headers: &HeaderMap) -> bool {
    let mut ranges = headers
        .get_all(ACCEPT)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(','))
        .peekable();

    if ranges.peek().is_none() {
        return true;
    }

    ranges.any(|range| {
        let mut params = range.split(';');
        let media_type = params.next().unwrap_or_default().trim();
        let refused = params.any(|param| {
            matches!(
                param.trim().split_once('='),
                Some((name, quality)) if name.trim() == "q"
                    && quality.trim().parse::<f32>().map_or(false, |q| q <= 0.0)
            )
        });

        !refused
            && (media_type.eq_ignore_ascii_case("application/json")
                || media_type.eq_ignore_ascii_case("application/*")
                || media_type == "*/*")
    })
}
