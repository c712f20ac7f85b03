//! Shared helper utilities for factory methods.

use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};
use serde_json::{json, Value};

/// Base URL used for self links in seeded references.
pub const TEST_BASE_URL: &str = "http://localhost";

/// Counter for generating unique names in tests.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Builds a `{id, self}` reference entry for a document under `collection`.
///
/// # Arguments
/// - `collection` - Plural path segment such as `"races"`
/// - `id` - Referenced document ID
pub fn reference(collection: &str, id: i32) -> Value {
    json!({
        "id": id,
        "self": format!("{}/{}/{}", TEST_BASE_URL, collection, id),
    })
}

/// Inserts a raw document row of the given kind.
///
/// # Returns
/// - `Ok(entity::document::Model)` - Inserted row with its assigned ID
/// - `Err(DbErr)` - Database error during insert
pub async fn insert_document(
    db: &DatabaseConnection,
    kind: &str,
    data: Value,
) -> Result<entity::document::Model, DbErr> {
    entity::document::ActiveModel {
        id: ActiveValue::NotSet,
        kind: ActiveValue::Set(kind.to_string()),
        data: ActiveValue::Set(data),
        version: ActiveValue::Set(0),
    }
    .insert(db)
    .await
}
