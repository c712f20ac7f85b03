//! SeaORM entities backing the raceboard document store.

pub mod document;
pub mod prelude;
