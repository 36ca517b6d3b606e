//! Colon-delimited key/value block parsing.
//!
//! Shared by commands that print one record as `Key : value` lines
//! (`ipmitool chassis status`, `dpkg -s`). A line without a colon is a
//! continuation of the previous key's value and is appended with a
//! newline separator, never overwritten; `dpkg -s` relies on this for
//! its multi-line `Description` field.

use std::collections::HashMap;

use cli_output_core::{ParseError, RawOutput, Result};
use tracing::debug;

use crate::normalize;

/// Parses colon-delimited output into a single key/value record.
///
/// Noise lines (prompts, blanks, `Password:` echoes) are skipped. A
/// continuation line that arrives before any key has been seen means
/// the output deviated from the assumed schema and produces a
/// [`ParseError::MalformedLine`].
pub fn parse_colon_block(command: &str, raw: &RawOutput) -> Result<HashMap<String, String>> {
    let mut record: HashMap<String, String> = HashMap::new();
    let mut last_key: Option<String> = None;

    for line in raw.lines() {
        let line = normalize::strip_ansi(line);
        let line = normalize::strip_password_echo(&line);
        if normalize::is_noise(line) {
            continue;
        }

        match line.split_once(':') {
            Some((key, value)) => {
                let key = key.trim().to_string();
                record.insert(key.clone(), value.trim().to_string());
                last_key = Some(key);
            }
            None => {
                let Some(key) = &last_key else {
                    return Err(ParseError::malformed_line(command, line));
                };
                let value = record.entry(key.clone()).or_default();
                value.push('\n');
                value.push_str(line.trim());
            }
        }
    }

    debug!(command, fields = record.len(), "parsed colon-delimited block");
    Ok(record)
}
