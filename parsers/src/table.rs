//! Generic column-aligned table parsing.
//!
//! Turns a header line plus aligned data lines into one field map per
//! row, tolerating variable-width columns. CLI tools emit no
//! machine-readable schema, so the set of possible column names is
//! supplied by the caller as a fixed vocabulary per command.

use std::collections::HashMap;

use cli_output_core::{ParseError, RawOutput, Result};
use tracing::debug;

use crate::normalize;

/// One recognized column: its name and its character span within a row.
///
/// The end offset of each header equals the start offset of the next
/// header in ascending order, or the length of the longest input line
/// for the last header, so column slicing stays correct even when a
/// cell's alignment is loose.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub name: String,
    pub start: usize,
    pub end: usize,
}

impl Header {
    /// The `[start, end)` slice of `row` belonging to this column,
    /// trimmed of surrounding whitespace.
    pub fn slice<'a>(&self, row: &'a str) -> &'a str {
        let len = row.len();
        row.get(self.start.min(len)..self.end.min(len))
            .unwrap_or("")
            .trim()
    }
}

/// Parser for commands that print a column-aligned table with an
/// explicit header line (`docker images`, `kubectl get pods`, ...).
///
/// The first non-noise line is the header line; every following
/// non-noise line is a data row. Shell-prompt lines never become rows.
#[derive(Debug, Clone)]
pub struct ColumnTableParser {
    possible_headers: Vec<String>,
}

impl ColumnTableParser {
    /// Creates a parser with the column vocabulary of one command.
    pub fn new(possible_headers: &[&str]) -> Self {
        Self {
            possible_headers: possible_headers.iter().map(|h| (*h).to_string()).collect(),
        }
    }

    /// Parses the raw output into one field map per data row, in source
    /// order.
    ///
    /// Fails with [`ParseError::MissingHeaderVocabulary`] when no
    /// vocabulary was configured: that is a programmer error and must
    /// not silently return an empty result.
    pub fn parse(&self, raw: &RawOutput) -> Result<Vec<HashMap<String, String>>> {
        if self.possible_headers.is_empty() {
            return Err(ParseError::MissingHeaderVocabulary);
        }

        let max_line_len = raw.lines().map(str::len).max().unwrap_or(0);

        let mut headers: Option<Vec<Header>> = None;
        let mut rows = Vec::new();

        for line in raw.lines() {
            if normalize::is_noise(line) {
                continue;
            }

            match &headers {
                None => {
                    headers = Some(self.resolve_headers(line, max_line_len));
                }
                Some(headers) => {
                    let mut record = HashMap::with_capacity(headers.len());
                    for header in headers {
                        record.insert(header.name.clone(), header.slice(line).to_string());
                    }
                    rows.push(record);
                }
            }
        }

        debug!(
            columns = headers.as_ref().map_or(0, Vec::len),
            rows = rows.len(),
            "parsed column table"
        );
        Ok(rows)
    }

    /// Resolves the recognized headers from the header line, sorted by
    /// ascending start offset, with end offsets filled in a single
    /// ascending pass: each header ends where the next one starts, and
    /// the last one ends at the longest line's length so short final
    /// cells are not truncated.
    fn resolve_headers(&self, header_line: &str, max_line_len: usize) -> Vec<Header> {
        let mut headers: Vec<Header> = self
            .possible_headers
            .iter()
            .filter_map(|name| {
                find_whole_word(header_line, name).map(|start| Header {
                    name: name.clone(),
                    start,
                    end: 0,
                })
            })
            .collect();

        headers.sort_by_key(|header| header.start);

        let starts: Vec<usize> = headers.iter().map(|header| header.start).collect();
        for (index, header) in headers.iter_mut().enumerate() {
            header.end = starts
                .get(index + 1)
                .copied()
                .unwrap_or_else(|| max_line_len.max(header_line.len()));
        }

        headers
    }
}

/// Finds `word` in `line` immediately followed by a space or the end of
/// the line. When both kinds of match exist, the end-of-line match wins:
/// a header name that is a prefix of another (e.g. "Memory" and
/// "Memory Usage") would otherwise bind to the longer header's cell.
fn find_whole_word(line: &str, word: &str) -> Option<usize> {
    let eol_match = line
        .ends_with(word)
        .then(|| line.len() - word.len());
    if eol_match.is_some() {
        return eol_match;
    }

    let mut search_from = 0;
    while let Some(relative) = line[search_from..].find(word) {
        let start = search_from + relative;
        let end = start + word.len();
        match line[end..].chars().next() {
            None | Some(' ') => return Some(start),
            _ => search_from = end,
        }
    }
    None
}
