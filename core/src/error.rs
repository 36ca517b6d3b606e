//! Error types for CLI output parsing.
//!
//! Provides a unified error type covering configuration mistakes,
//! malformed command output, value coercion failures, and lookups that
//! violate an exactly-one expectation.

use thiserror::Error;

/// Errors that can occur while parsing command output.
///
/// Parse-time errors propagate uncaught out of the output constructors:
/// a deviation from a command's assumed output schema is a signal worth
/// surfacing to the test author, never something to paper over.
#[derive(Debug, Error)]
pub enum ParseError {
    /// A table parser was used without a column vocabulary. This is a
    /// programmer error, not a data condition.
    #[error("no possible headers defined; use a parser configured with the column vocabulary for this command")]
    MissingHeaderVocabulary,

    /// Output did not match the shape the command is known to emit.
    #[error("unexpected {command} output format: {detail}")]
    UnexpectedFormat { command: String, detail: String },

    /// A single line deviated from the command's line schema.
    #[error("malformed line in {command} output: {line:?}")]
    MalformedLine { command: String, line: String },

    /// A field that must be numeric held a non-numeric value.
    #[error("invalid integer value {value:?} for field '{field}'")]
    InvalidInteger { field: String, value: String },

    /// A lookup that must resolve to exactly one entity matched several.
    #[error("found {count} {entity}(s) named {name:?}, expected exactly one")]
    AmbiguousLookup {
        entity: String,
        name: String,
        count: usize,
    },

    /// A lookup that must resolve to exactly one entity matched none.
    #[error("there is no {entity} named {name:?}")]
    NotFound { entity: String, name: String },
}

impl ParseError {
    /// Builds an [`UnexpectedFormat`](ParseError::UnexpectedFormat) error.
    pub fn unexpected_format(command: &str, detail: impl Into<String>) -> Self {
        Self::UnexpectedFormat {
            command: command.to_string(),
            detail: detail.into(),
        }
    }

    /// Builds a [`MalformedLine`](ParseError::MalformedLine) error.
    pub fn malformed_line(command: &str, line: &str) -> Self {
        Self::MalformedLine {
            command: command.to_string(),
            line: line.to_string(),
        }
    }
}

/// Convenience alias for results with [`ParseError`].
pub type Result<T> = std::result::Result<T, ParseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ambiguous_lookup_message_includes_count() {
        let err = ParseError::AmbiguousLookup {
            entity: "service".to_string(),
            name: "ptp1".to_string(),
            count: 2,
        };
        let message = err.to_string();
        assert!(message.contains('2'), "message should carry the count: {message}");
        assert!(message.contains("ptp1"));
    }

    #[test]
    fn test_malformed_line_message_quotes_offending_line() {
        let err = ParseError::malformed_line("ipmitool sensor", "Fan1 | 1234");
        assert!(err.to_string().contains("Fan1 | 1234"));
    }
}
