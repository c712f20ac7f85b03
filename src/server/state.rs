//! Application state shared across all request handlers.
//!
//! This module defines the `AppState` struct which holds all shared resources and
//! dependencies needed by the application. The state is initialized once during startup
//! and then cloned for each request handler through Axum's state extraction.
//!
//! The state includes:
//! - Database connection pool for the document store
//! - Identity verifier resolving bearer tokens into caller identities
//! - Public URL used for self links when a request carries no host
//! - Listing page size

use sea_orm::DatabaseConnection;
use std::sync::Arc;
use url::Url;

use crate::server::{config::Config, service::identity::IdentityVerifier};

/// Application state containing shared resources and dependencies.
///
/// All fields use cheap-to-clone types:
/// - `DatabaseConnection` is a connection pool (clones share the pool)
/// - `Arc<dyn IdentityVerifier>` is a reference-counted pointer
/// - `Url` and `u64` are cloned when needed
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool for accessing persistent storage.
    pub db: DatabaseConnection,

    /// Verifier turning bearer tokens into caller identities.
    ///
    /// Injected so tests can substitute a verifier that does not call the identity
    /// provider.
    pub verifier: Arc<dyn IdentityVerifier>,

    /// Base URL for self links when the request has no `Host` header.
    pub public_url: Url,

    /// Number of documents per listing page.
    pub page_size: u64,
}

impl AppState {
    /// Creates a new application state with the provided dependencies.
    ///
    /// # Arguments
    /// - `db` - Database connection pool
    /// - `verifier` - Bearer token verifier
    /// - `config` - Application configuration supplying the public URL and page size
    ///
    /// # Returns
    /// - `AppState` - Initialized application state ready for use
    pub fn new(db: DatabaseConnection, verifier: Arc<dyn IdentityVerifier>, config: &Config) -> Self {
        Self {
            db,
            verifier,
            public_url: config.public_url.clone(),
            page_size: config.page_size,
        }
    }
}
