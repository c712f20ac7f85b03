//! Request extractors and guards.
//!
//! - `auth` - Caller identity extraction and the ownership guard
//! - `extract` - JSON body and `Accept` negotiation extractors
//! - `links` - Self link construction from the request's scheme and host

pub mod auth;
pub mod extract;
pub mod links;
