use crate::server::{
    error::AppError,
    model::document::{Cursor, Kind},
};

/// Parses a document ID from a path segment
///
/// IDs are store-assigned positive integers, so anything else cannot name an existing
/// document and is reported as not found rather than as a malformed request.
///
/// # Arguments
/// - `kind` - Key space the ID belongs to, used for the error message
/// - `value` - Raw path segment
///
/// # Returns
/// - `Ok(i32)` - Parsed document ID
/// - `Err(AppError::NotFound)` - Segment is not a positive integer
pub fn parse_id(kind: Kind, value: &str) -> Result<i32, AppError> {
    match value.parse::<i32>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(AppError::not_found(kind)),
    }
}

/// Parses a `cursor` query parameter issued by a previous page
///
/// # Returns
/// - `Ok(Cursor)` - Cursor positioned after the encoded ID
/// - `Err(AppError::BadRequest)` - Token was not issued by this service
pub fn parse_cursor(token: &str) -> Result<Cursor, AppError> {
    token
        .parse::<i32>()
        .ok()
        .filter(|id| *id >= 0)
        .map(Cursor::after)
        .ok_or_else(|| AppError::BadRequest(format!("Invalid cursor '{}'", token)))
}
