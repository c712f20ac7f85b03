//! Factory methods for creating test documents.
//!
//! Each document kind has a `Factory` struct for customization and a `create_*`
//! convenience function for quick default creation. Factories write rows straight into
//! the document table, so they can seed both consistent and deliberately one-sided
//! relationships.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! let course = factory::create_course(&db).await?;
//! let race = factory::race::RaceFactory::new(&db, "auth0|creator")
//!     .course(course.id)
//!     .build()
//!     .await?;
//! ```

pub mod athlete;
pub mod course;
pub mod helpers;
pub mod race;

pub use athlete::create_athlete;
pub use course::create_course;
pub use race::create_race;
