//! Database repository layer.
//!
//! Athletes, races and courses share one schema-less document table, so a single generic
//! repository serves all three. Documents are decoded from their stored JSON here and
//! handed to the service layer as typed domain models.

pub mod document;
