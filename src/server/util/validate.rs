//! Field checks applied to request bodies before any write.

use serde_json::Value;

use crate::server::error::validation::ValidationError;

/// Characters never allowed in text fields.
pub const FORBIDDEN_CHARACTERS: &str = "`!@#$%^&*()_+-=[]{};':\"\\|,.<>/?~";

/// Length bound of a text field, counted in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextLimit {
    /// Value must be strictly shorter than the bound.
    Below(usize),
    /// Value may reach the bound but not exceed it.
    AtMost(usize),
}

impl TextLimit {
    /// Longest accepted length.
    pub fn max(self) -> usize {
        match self {
            Self::Below(bound) => bound.saturating_sub(1),
            Self::AtMost(bound) => bound,
        }
    }
}

/// Names are rejected at 128 characters.
pub const NAME_LIMIT: TextLimit = TextLimit::Below(128);
/// Race types, cities and athlete profile text are rejected at 64 characters.
pub const SHORT_TEXT_LIMIT: TextLimit = TextLimit::Below(64);
/// Two-letter state codes.
pub const STATE_LIMIT: TextLimit = TextLimit::AtMost(2);

/// Rejects text containing a forbidden character or exceeding `limit`
///
/// # Returns
/// - `Ok(())` - Value accepted
/// - `Err(ValidationError::ForbiddenCharacter)` - Value contains a forbidden character
/// - `Err(ValidationError::TooLong)` - Value is longer than the limit allows
pub fn check_text(
    field: &'static str,
    value: &str,
    limit: TextLimit,
) -> Result<(), ValidationError> {
    if value.chars().any(|c| FORBIDDEN_CHARACTERS.contains(c)) {
        return Err(ValidationError::ForbiddenCharacter { field });
    }

    if value.chars().count() > limit.max() {
        return Err(ValidationError::TooLong {
            field,
            max: limit.max(),
        });
    }

    Ok(())
}

/// Checks an optional text field, skipping absent values.
pub fn check_optional_text(
    field: &'static str,
    value: Option<&str>,
    limit: TextLimit,
) -> Result<(), ValidationError> {
    match value {
        Some(value) => check_text(field, value, limit),
        None => Ok(()),
    }
}

/// Coerces a JSON value into an integer
///
/// Integers pass through, fractional numbers are truncated and strings are read up to
/// the first non-digit after an optional sign (`"42km"` becomes `42`).
///
/// # Returns
/// - `Ok(i64)` - Coerced value
/// - `Err(ValidationError::NotAnInteger)` - No leading integer could be read
pub fn coerce_integer(field: &'static str, value: &Value) -> Result<i64, ValidationError> {
    let not_an_integer = || ValidationError::NotAnInteger { field };

    match value {
        Value::Number(number) => {
            if let Some(int) = number.as_i64() {
                return Ok(int);
            }
            number
                .as_f64()
                .filter(|float| float.is_finite() && float.abs() < i64::MAX as f64)
                .map(|float| float.trunc() as i64)
                .ok_or_else(not_an_integer)
        }
        Value::String(text) => leading_integer(text).ok_or_else(not_an_integer),
        _ => Err(not_an_integer()),
    }
}

/// Coerces a JSON value into an integer and rejects negative results.
pub fn coerce_non_negative(field: &'static str, value: &Value) -> Result<i64, ValidationError> {
    let int = coerce_integer(field, value)?;
    if int < 0 {
        return Err(ValidationError::Negative { field });
    }
    Ok(int)
}

fn leading_integer(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let (negative, rest) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let magnitude = rest[..digits_end].parse::<i64>().ok()?;

    Some(if negative { -magnitude } else { magnitude })
}
