//! Section-repeating block parsing.
//!
//! Several commands print repeated "blocks", each introduced by a marker
//! line, with colon- or space-delimited key/value pairs accumulating
//! until the next marker: `systemctl status` over several service units
//! (marker `●`), `clock-conf.conf` (a repeating `ifname` key opens each
//! interface block), `gnss-monitor-ptp.conf` (no marker, one block of
//! INI-style pairs).
//!
//! The source text has no end-of-block marker: whatever block is open
//! when input runs out is flushed as the final block.

use std::collections::HashMap;

use cli_output_core::{ParseError, RawOutput, Result};
use tracing::debug;

use crate::normalize;

/// Box-drawing glyph systemd uses for the command line of a unit.
const CONTINUATION_MARKER: &str = "└─";

/// How key and value are separated within a block's lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    /// Split on the first colon (`systemctl status` style).
    Colon,
    /// Split on the first whitespace run (`clock-conf` / INI style).
    Whitespace,
}

/// What opens a new block.
#[derive(Debug, Clone)]
pub enum BlockMarker {
    /// A line starting with `prefix` opens a block; the block name is the
    /// text between `name_after` and `name_before` on that line.
    Prefix {
        prefix: &'static str,
        name_after: &'static str,
        name_before: &'static str,
    },
    /// A key/value line whose key equals this opens a block. The very
    /// first occurrence starts the first block rather than closing a
    /// non-existent prior one, and the line's value is kept as both the
    /// block name and an ordinary field.
    Key(&'static str),
}

/// One parsed block: its marker-derived name and accumulated fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Block {
    pub name: String,
    pub fields: HashMap<String, String>,
}

/// Parser for marker-introduced repeating blocks.
#[derive(Debug, Clone)]
pub struct BlockParser {
    command: String,
    marker: Option<BlockMarker>,
    delimiter: Delimiter,
    /// Skip `#` comment lines and `[section]` header lines (INI-style
    /// config files).
    skip_comments_and_sections: bool,
}

impl BlockParser {
    pub fn new(command: &str, marker: Option<BlockMarker>, delimiter: Delimiter) -> Self {
        Self {
            command: command.to_string(),
            marker,
            delimiter,
            skip_comments_and_sections: false,
        }
    }

    /// Enables INI-style skipping of comment and section-header lines.
    pub fn skipping_comments_and_sections(mut self) -> Self {
        self.skip_comments_and_sections = true;
        self
    }

    /// Parses the raw output into blocks in source order.
    ///
    /// Lines inside a block that do not split into a key/value pair on
    /// the configured delimiter fail with
    /// [`ParseError::MalformedLine`]; unexpected-format input is never
    /// silently dropped. Lines arriving before the first marker carry
    /// no block and are skipped.
    pub fn parse(&self, raw: &RawOutput) -> Result<Vec<Block>> {
        let mut blocks: Vec<Block> = Vec::new();
        let mut current: Option<Block> = None;

        for line in raw.lines() {
            let line = normalize::strip_ansi(line);
            if normalize::is_noise(&line) {
                continue;
            }
            let trimmed = line.trim();
            if self.skip_comments_and_sections
                && (trimmed.starts_with('#') || trimmed.starts_with('['))
            {
                continue;
            }

            if let Some(rest) = trimmed.strip_prefix(CONTINUATION_MARKER) {
                let Some(block) = current.as_mut() else {
                    return Err(ParseError::malformed_line(&self.command, trimmed));
                };
                block
                    .fields
                    .insert("command".to_string(), rest.trim().to_string());
                continue;
            }

            match &self.marker {
                Some(BlockMarker::Prefix {
                    prefix,
                    name_after,
                    name_before,
                }) => {
                    if let Some(marker_rest) = trimmed.strip_prefix(prefix) {
                        if let Some(open) = current.take() {
                            blocks.push(open);
                        }
                        current = Some(Block {
                            name: extract_between(marker_rest, name_after, name_before)
                                .ok_or_else(|| {
                                    ParseError::malformed_line(&self.command, trimmed)
                                })?
                                .to_string(),
                            fields: HashMap::new(),
                        });
                        continue;
                    }
                }
                Some(BlockMarker::Key(marker_key)) => {
                    if let Some((key, value)) = self.split_pair(trimmed) {
                        if key == *marker_key {
                            if let Some(open) = current.take() {
                                blocks.push(open);
                            }
                            let mut block = Block {
                                name: value.to_string(),
                                fields: HashMap::new(),
                            };
                            block.fields.insert(key.to_string(), value.to_string());
                            current = Some(block);
                            continue;
                        }
                    }
                }
                None => {
                    if current.is_none() {
                        current = Some(Block::default());
                    }
                }
            }

            let Some(block) = current.as_mut() else {
                debug!(command = %self.command, line = trimmed, "line before first block marker, skipping");
                continue;
            };
            let (key, value) = self
                .split_pair(trimmed)
                .ok_or_else(|| ParseError::malformed_line(&self.command, trimmed))?;
            block.fields.insert(key.to_string(), value.to_string());
        }

        if let Some(open) = current.take() {
            blocks.push(open);
        }

        debug!(command = %self.command, blocks = blocks.len(), "parsed block output");
        Ok(blocks)
    }

    fn split_pair<'a>(&self, line: &'a str) -> Option<(&'a str, &'a str)> {
        match self.delimiter {
            Delimiter::Colon => line
                .split_once(':')
                .map(|(key, value)| (key.trim(), value.trim())),
            Delimiter::Whitespace => line
                .split_once(char::is_whitespace)
                .map(|(key, value)| (key.trim(), value.trim()))
                .filter(|(_, value)| !value.is_empty()),
        }
    }
}

fn extract_between<'a>(text: &'a str, after: &str, before: &str) -> Option<&'a str> {
    let start = text.find(after)? + after.len();
    let end = text[start..].find(before)? + start;
    Some(&text[start..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn systemctl_parser() -> BlockParser {
        BlockParser::new(
            "systemctl status",
            Some(BlockMarker::Prefix {
                prefix: "●",
                name_after: "@",
                name_before: ".service",
            }),
            Delimiter::Colon,
        )
    }

    #[test]
    fn test_marker_opens_blocks_and_final_block_is_flushed() {
        let raw = RawOutput::from(
            "● ptp4l@ptp1.service - PTP service\n\
             Loaded: loaded\n\
             ● ptp4l@ptp3.service - PTP service\n\
             Loaded: masked\n",
        );
        let blocks = systemctl_parser().parse(&raw).unwrap();
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].name, "ptp1");
        assert_eq!(blocks[0].fields["Loaded"], "loaded");
        assert_eq!(blocks[1].name, "ptp3");
        assert_eq!(blocks[1].fields["Loaded"], "masked");
    }

    #[test]
    fn test_continuation_glyph_carries_command_line() {
        let raw = RawOutput::from(
            "● ptp4l@ptp1.service - PTP service\n\
             └─15221 /usr/sbin/ptp4l -f ptp4l-ptp1.conf\n",
        );
        let blocks = systemctl_parser().parse(&raw).unwrap();
        assert_eq!(
            blocks[0].fields["command"],
            "15221 /usr/sbin/ptp4l -f ptp4l-ptp1.conf"
        );
    }

    #[test]
    fn test_key_marker_first_occurrence_starts_first_block() {
        let parser = BlockParser::new(
            "cat clock-conf.conf",
            Some(BlockMarker::Key("ifname")),
            Delimiter::Whitespace,
        );
        let raw = RawOutput::from(
            "ifname enp138s0f0\nsma1 input\nifname enp138s0f1\nsma1 output\n",
        );
        let blocks = parser.parse(&raw).unwrap();
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].name, "enp138s0f0");
        assert_eq!(blocks[0].fields["sma1"], "input");
        assert_eq!(blocks[1].fields["ifname"], "enp138s0f1");
    }

    #[test]
    fn test_unsplittable_line_inside_block_is_malformed() {
        let raw = RawOutput::from("● ptp4l@ptp1.service - x\nloneword\n");
        let err = systemctl_parser().parse(&raw).unwrap_err();
        assert!(matches!(err, ParseError::MalformedLine { .. }));
    }

    #[test]
    fn test_ini_noise_is_skipped_with_markerless_block() {
        let parser = BlockParser::new("cat gnss-monitor-ptp.conf", None, Delimiter::Whitespace)
            .skipping_comments_and_sections();
        let raw = RawOutput::from("[global]\n# thresholds\nsatellite_count 9\n");
        let blocks = parser.parse(&raw).unwrap();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].fields["satellite_count"], "9");
    }
}
