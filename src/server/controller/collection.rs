//! Method guards for collection endpoints.
//!
//! Collections only support listing and creation. Other methods answer 405 with a body
//! naming the method and path instead of axum's empty default.

use axum::http::{Method, Uri};

use crate::server::error::AppError;

/// Fallback for methods a collection route does not support
pub async fn method_not_allowed(method: Method, uri: Uri) -> AppError {
    AppError::MethodNotAllowed {
        method: method.to_string(),
        path: uri.path().to_string(),
    }
}
