//! Server-side domain models and parameter types.
//!
//! This module contains the documents persisted in the store, the validated parameter
//! types built from request bodies, and the cross-reference and link types shared by
//! them. Documents are decoded from stored JSON at the repository boundary and
//! transformed to DTOs at the controller boundary.

pub mod athlete;
pub mod course;
pub mod document;
pub mod identity;
pub mod link;
pub mod race;
pub mod reference;
