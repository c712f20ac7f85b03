//! Request and response bodies exchanged over the REST API.

pub mod api;
pub mod athlete;
pub mod course;
pub mod race;
