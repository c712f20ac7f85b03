//! Bearer token verification.
//!
//! Handlers never inspect tokens themselves. They receive an `Identity` from whichever
//! `IdentityVerifier` the application state was built with.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use url::Url;

use crate::server::{
    error::{auth::AuthError, config::ConfigError, AppError},
    model::identity::Identity,
};

/// Resolves a bearer token into the identity it was issued to.
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    /// Verifies `token`
    ///
    /// # Returns
    /// - `Ok(Identity)` - Token is valid
    /// - `Err(AppError::AuthErr(AuthError::InvalidToken))` - Token was rejected
    /// - `Err(AppError)` - Verification could not be performed
    async fn verify(&self, token: &str) -> Result<Identity, AppError>;
}

/// Verifies tokens by calling the identity provider's OIDC userinfo endpoint.
///
/// The provider validates signature, issuer and expiry; a successful response carries
/// the `sub` claim of the token's subject.
pub struct UserInfoVerifier {
    http_client: reqwest::Client,
    userinfo_url: Url,
}

#[derive(Deserialize)]
struct UserInfo {
    sub: String,
}

impl UserInfoVerifier {
    pub fn new(http_client: reqwest::Client, userinfo_url: Url) -> Self {
        Self {
            http_client,
            userinfo_url,
        }
    }

    /// Builds a verifier for `https://{domain}/userinfo`
    ///
    /// A domain that already carries a scheme is used as is.
    ///
    /// # Returns
    /// - `Ok(UserInfoVerifier)` - Verifier targeting the provider's userinfo endpoint
    /// - `Err(AppError::ConfigErr)` - Domain does not form a valid URL
    pub fn for_domain(http_client: reqwest::Client, domain: &str) -> Result<Self, AppError> {
        let base = if domain.starts_with("http://") || domain.starts_with("https://") {
            domain.to_string()
        } else {
            format!("https://{}", domain)
        };

        let userinfo_url = Url::parse(&base)
            .and_then(|url| url.join("/userinfo"))
            .map_err(|e| ConfigError::InvalidEnvVar {
                name: "AUTH_DOMAIN".to_string(),
                value: domain.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self::new(http_client, userinfo_url))
    }

    pub fn userinfo_url(&self) -> &Url {
        &self.userinfo_url
    }
}

#[async_trait]
impl IdentityVerifier for UserInfoVerifier {
    async fn verify(&self, token: &str) -> Result<Identity, AppError> {
        let response = self
            .http_client
            .get(self.userinfo_url.clone())
            .bearer_auth(token)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(AuthError::InvalidToken(format!(
                "identity provider answered {}",
                status
            ))
            .into());
        }

        let info: UserInfo = response.error_for_status()?.json().await?;

        Ok(Identity::new(info.sub))
    }
}

/// Verifier accepting a fixed set of tokens, for tests.
#[cfg(test)]
#[derive(Default)]
pub struct StaticVerifier {
    tokens: std::collections::HashMap<String, String>,
}

#[cfg(test)]
impl StaticVerifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepts `token` as belonging to `sub`.
    pub fn with_token(mut self, token: &str, sub: &str) -> Self {
        self.tokens.insert(token.to_string(), sub.to_string());
        self
    }
}

#[cfg(test)]
#[async_trait]
impl IdentityVerifier for StaticVerifier {
    async fn verify(&self, token: &str) -> Result<Identity, AppError> {
        self.tokens
            .get(token)
            .map(Identity::new)
            .ok_or_else(|| AuthError::InvalidToken("unknown test token".to_string()).into())
    }
}
