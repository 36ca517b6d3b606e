//! The unit of parser input: captured text from one remote command.

use serde::{Deserialize, Serialize};

/// Raw text captured from one completed remote command execution.
///
/// The SSH layer delivers command output either as a single multi-line
/// string or as an ordered sequence of line strings; both shapes convert
/// into a `RawOutput`. The text arrives verbatim, including shell
/// prompts, `Password:` echoes from `sudo -S`, and terminal control
/// sequences; filtering that noise is the parsers' job.
///
/// Line order is preserved exactly; callers may rely on first-row
/// semantics.
///
/// # Examples
///
/// ```
/// use cli_output_core::RawOutput;
///
/// let from_str = RawOutput::from("NAME  STATE\nlo    UNKNOWN\n");
/// let from_lines = RawOutput::from(vec!["NAME  STATE".to_string(), "lo    UNKNOWN".to_string()]);
/// assert_eq!(from_str.lines().count(), from_lines.lines().count());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawOutput {
    lines: Vec<String>,
}

impl RawOutput {
    /// Iterates the captured lines in source order.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    /// The captured lines as a slice.
    pub fn as_slice(&self) -> &[String] {
        &self.lines
    }

    /// Number of captured lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// True when no lines were captured.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl From<&str> for RawOutput {
    fn from(text: &str) -> Self {
        Self {
            lines: text.lines().map(str::to_string).collect(),
        }
    }
}

impl From<String> for RawOutput {
    fn from(text: String) -> Self {
        Self::from(text.as_str())
    }
}

impl From<Vec<String>> for RawOutput {
    fn from(lines: Vec<String>) -> Self {
        // Lines handed over by the SSH layer may keep their trailing
        // newline; strip it so both input shapes parse identically.
        Self {
            lines: lines
                .into_iter()
                .map(|line| line.trim_end_matches(['\n', '\r']).to_string())
                .collect(),
        }
    }
}

impl From<&[String]> for RawOutput {
    fn from(lines: &[String]) -> Self {
        Self::from(lines.to_vec())
    }
}

impl From<&[&str]> for RawOutput {
    fn from(lines: &[&str]) -> Self {
        Self::from(
            lines
                .iter()
                .map(|line| (*line).to_string())
                .collect::<Vec<_>>(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_and_line_inputs_are_equivalent() {
        let text = RawOutput::from("a\nb\nc");
        let lines = RawOutput::from(vec![
            "a\n".to_string(),
            "b\n".to_string(),
            "c".to_string(),
        ]);
        assert_eq!(text, lines);
    }

    #[test]
    fn test_order_is_preserved() {
        let raw = RawOutput::from("first\nsecond");
        let collected: Vec<&str> = raw.lines().collect();
        assert_eq!(collected, vec!["first", "second"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(RawOutput::from("").is_empty());
    }

    #[test]
    fn test_serializes_as_a_line_array() {
        let raw = RawOutput::from("a\nb");
        let json = serde_json::to_value(&raw).unwrap();
        assert_eq!(json, serde_json::json!({ "lines": ["a", "b"] }));
        let restored: RawOutput = serde_json::from_value(json).unwrap();
        assert_eq!(restored, raw);
    }
}
