//! Service layer for business logic and orchestration.
//!
//! This module contains the service layer of the application, which sits between the
//! controller (API) layer and the data (repository) layer. Services are responsible for:
//!
//! - **Business Logic**: Creating, updating and deleting documents with their invariants
//! - **Orchestration**: Keeping both sides of a relationship in step across documents
//! - **Domain Models**: Working with domain models rather than DTOs or entity models
//! - **Identity**: Resolving bearer tokens into caller identities

pub mod athlete;
pub mod course;
pub mod identity;
pub mod listing;
pub mod race;
pub mod relationship;

#[cfg(test)]
mod test;
