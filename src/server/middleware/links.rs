use axum::{
    extract::FromRequestParts,
    http::{header::HOST, request::Parts},
};
use std::convert::Infallible;
use url::Url;

use crate::server::{model::link::Links, state::AppState};

const FORWARDED_PROTO: &str = "x-forwarded-proto";

/// Builds self links from the scheme and host the request arrived on.
///
/// The scheme is taken from `X-Forwarded-Proto` when a proxy sets it. Requests without a
/// usable host fall back to the configured public URL.
impl FromRequestParts<AppState> for Links {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let base = request_base(parts).unwrap_or_else(|| state.public_url.clone());

        Ok(Links::new(base))
    }
}

fn request_base(parts: &Parts) -> Option<Url> {
    let host = parts
        .headers
        .get(HOST)
        .and_then(|value| value.to_str().ok())
        .or_else(|| parts.uri.authority().map(|authority| authority.as_str()))?;

    let scheme = parts
        .headers
        .get(FORWARDED_PROTO)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|scheme| !scheme.is_empty())
        .or_else(|| parts.uri.scheme_str())
        .unwrap_or("http");

    Url::parse(&format!("{}://{}/", scheme, host)).ok()
}
