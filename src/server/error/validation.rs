use thiserror::Error;

/// Field content rejected by the validation layer.
///
/// Results in a 403 Forbidden response; no write is performed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Field '{field}' contains a forbidden character")]
    ForbiddenCharacter { field: &'static str },

    #[error("Field '{field}' must be at most {max} characters long")]
    TooLong { field: &'static str, max: usize },

    #[error("Field '{field}' must not be negative")]
    Negative { field: &'static str },

    #[error("Field '{field}' must be an integer")]
    NotAnInteger { field: &'static str },
}
