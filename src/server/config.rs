use std::net::SocketAddr;
use url::Url;

use crate::server::error::{config::ConfigError, AppError};

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";
const DEFAULT_PUBLIC_URL: &str = "http://localhost:8080";
const DEFAULT_PAGE_SIZE: u64 = 5;

pub struct Config {
    pub database_url: String,

    /// Identity provider domain, e.g. `tenant.us.auth0.com`.
    pub auth_domain: String,

    pub bind_address: SocketAddr,
    pub public_url: Url,
    pub page_size: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            database_url: required("DATABASE_URL")?,
            auth_domain: required("AUTH_DOMAIN")?,
            bind_address: parse_var(
                "BIND_ADDRESS",
                optional("BIND_ADDRESS").unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string()),
            )?,
            public_url: parse_var(
                "PUBLIC_URL",
                optional("PUBLIC_URL").unwrap_or_else(|| DEFAULT_PUBLIC_URL.to_string()),
            )?,
            page_size: match optional("PAGE_SIZE") {
                Some(value) => parse_page_size(value)?,
                None => DEFAULT_PAGE_SIZE,
            },
        })
    }
}

fn required(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}

fn optional(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}

fn parse_var<T>(name: &str, value: String) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.parse().map_err(|e: T::Err| ConfigError::InvalidEnvVar {
        name: name.to_string(),
        reason: e.to_string(),
        value,
    })
}

fn parse_page_size(value: String) -> Result<u64, ConfigError> {
    let size: u64 = parse_var("PAGE_SIZE", value.clone())?;
    if size == 0 {
        return Err(ConfigError::InvalidEnvVar {
            name: "PAGE_SIZE".to_string(),
            value,
            reason: "page size must be at least 1".to_string(),
        });
    }
    Ok(size)
}
