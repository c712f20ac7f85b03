use thiserror::Error;

use crate::server::{error::AppError, model::document::Kind};

/// Internal issues indicating unexpected behavior or a store left in a partial state.
///
/// All variants result in a 500 Internal Server Error with a generic message returned
/// to the client; details are only logged.
#[derive(Error, Debug)]
pub enum InternalError {
    /// The second write of a two-sided relationship change failed after the first
    /// succeeded, or reverting a refused write failed. The write is not rolled back.
    #[error("{operation} half-applied: {applied} was written but the paired write failed: {source}")]
    HalfApplied {
        /// Relationship operation being performed
        operation: String,
        /// Description of the write that did succeed
        applied: String,
        /// Error from the failed write
        #[source]
        source: Box<AppError>,
    },

    /// One or more detachments of a cascading delete failed; the document was kept.
    #[error("Cascading delete of {kind} {id} incomplete: {failed} of {total} detachments failed")]
    CascadeIncomplete {
        kind: Kind,
        id: i32,
        failed: usize,
        total: usize,
    },

    /// A document kept being written while it was severed for deletion; it was kept.
    #[error("{kind} {id} kept changing during its cascading delete; gave up after {attempts} attempts")]
    Contended {
        kind: Kind,
        id: i32,
        attempts: usize,
    },
}
