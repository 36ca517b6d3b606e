//! Shared string-to-value coercion used by every output wrapper.
//!
//! CLI tools emit every field as text. The parsers keep values as raw
//! strings; the output wrappers coerce them through these helpers so the
//! policy (what counts as `true`, how integer failures are reported)
//! lives in exactly one place.

use crate::error::{ParseError, Result};

/// Coerces a CLI string field to a boolean.
///
/// Only the literal string `"true"` is true; everything else, including
/// `"True"`, `"ok"`, and `"yes"`, is false. This mirrors how the status
/// commands under test spell their boolean fields.
///
/// # Examples
///
/// ```
/// use cli_output_core::coerce;
///
/// assert!(coerce::as_bool("true"));
/// assert!(!coerce::as_bool("false"));
/// assert!(!coerce::as_bool("True"));
/// ```
pub fn as_bool(value: &str) -> bool {
    value == "true"
}

/// Coerces a CLI string field to an integer.
///
/// The value is trimmed before parsing. A non-numeric value produces
/// [`ParseError::InvalidInteger`] naming the field, so coercion failures
/// surface at construction rather than deep in accessor use.
///
/// # Examples
///
/// ```
/// use cli_output_core::coerce;
///
/// assert_eq!(coerce::as_int("pool_id", " 42 ").unwrap(), 42);
/// assert!(coerce::as_int("pool_id", "n/a").is_err());
/// ```
pub fn as_int(field: &str, value: &str) -> Result<i64> {
    value
        .trim()
        .parse::<i64>()
        .map_err(|_| ParseError::InvalidInteger {
            field: field.to_string(),
            value: value.to_string(),
        })
}
