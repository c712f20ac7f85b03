use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderValue},
};

use crate::server::{
    error::{auth::AuthError, AppError},
    model::{document::Resource, identity::Identity},
    state::AppState,
};

/// Identity of the caller, resolved from an `Authorization: Bearer` header.
///
/// A request without the header yields `Caller(None)`; whether that is acceptable is
/// decided by `AuthGuard`. A header that is present but malformed or carries a rejected
/// token fails extraction with 401.
pub struct Caller(pub Option<Identity>);

impl FromRequestParts<AppState> for Caller {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(header) = parts.headers.get(AUTHORIZATION) else {
            return Ok(Caller(None));
        };

        let token = bearer_token(header)?;
        let identity = state.verifier.verify(token).await?;

        Ok(Caller(Some(identity)))
    }
}

fn bearer_token(header: &HeaderValue) -> Result<&str, AuthError> {
    let value = header
        .to_str()
        .map_err(|_| AuthError::MalformedAuthorization)?;

    let (scheme, token) = value
        .split_once(' ')
        .ok_or(AuthError::MalformedAuthorization)?;

    let token = token.trim();
    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return Err(AuthError::MalformedAuthorization);
    }

    Ok(token)
}

pub enum Permission<'a> {
    /// Caller must own the document. Unowned documents pass.
    OwnerOf(&'a dyn Resource),
    /// Caller must own at least one of the documents.
    OwnerOfAny(&'a [&'a dyn Resource]),
}

pub struct AuthGuard<'a> {
    caller: &'a Caller,
}

impl<'a> AuthGuard<'a> {
    pub fn new(caller: &'a Caller) -> Self {
        Self { caller }
    }

    /// Requires an authenticated caller satisfying every permission
    ///
    /// An empty permission list only requires authentication.
    ///
    /// # Returns
    /// - `Ok(&Identity)` - The caller's identity
    /// - `Err(AuthError::Unauthenticated)` - Request carried no bearer token
    /// - `Err(AuthError::AccessDenied)` - A permission is not satisfied
    pub fn require(&self, permissions: &[Permission]) -> Result<&'a Identity, AppError> {
        let Some(identity) = self.caller.0.as_ref() else {
            return Err(AuthError::Unauthenticated.into());
        };

        for permission in permissions {
            match permission {
                Permission::OwnerOf(resource) => {
                    if !owns(identity, *resource) {
                        return Err(access_denied(identity, *resource));
                    }
                }
                Permission::OwnerOfAny(resources) => {
                    if let Some(first) = resources.first() {
                        if !resources.iter().any(|resource| owns(identity, *resource)) {
                            return Err(access_denied(identity, *first));
                        }
                    }
                }
            }
        }

        Ok(identity)
    }
}

fn owns(identity: &Identity, resource: &dyn Resource) -> bool {
    resource
        .owner()
        .map_or(true, |owner| owner == identity.sub)
}

fn access_denied(identity: &Identity, resource: &dyn Resource) -> AppError {
    AuthError::AccessDenied {
        sub: identity.sub.clone(),
        kind: resource.kind(),
        id: resource.id(),
    }
    .into()
}
