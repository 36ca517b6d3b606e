//! `clock-conf.conf` parsing.
//!
//! The clock configuration file repeats one block per interface. There
//! is no bullet marker: a line whose key is `ifname` opens the next
//! block (the very first `ifname` opens the first block). Within a
//! block, keys and values are separated by the first whitespace run;
//! the SMA connector line uses the connector name itself as the key:
//!
//! ```text
//! ifname enp138s0f0
//! base_port enp138s0f0
//! sma1 input
//! ifname enp138s0f1
//! base_port enp138s0f1
//! sma1 output
//! ```

use cli_output_core::{RawOutput, Result};
use serde::{Deserialize, Serialize};

use crate::block::{Block, BlockMarker, BlockParser, Delimiter};

/// One interface block of `clock-conf.conf`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockConfObject {
    pub ifname: String,
    pub base_port: Option<String>,
    /// Name of the SMA connector line (`sma1`, `sma2`), when present.
    pub sma_name: Option<String>,
    /// Direction configured for the SMA connector (`input`/`output`).
    pub sma_mode: Option<String>,
}

impl ClockConfObject {
    fn from_block(block: Block) -> Self {
        // One SMA line per interface block; pick the lowest-numbered
        // connector if the file ever carries several.
        let sma = block
            .fields
            .iter()
            .filter(|(key, _)| key.starts_with("sma"))
            .min_by(|left, right| left.0.cmp(right.0));

        Self {
            ifname: block.name.clone(),
            base_port: block.fields.get("base_port").cloned(),
            sma_name: sma.map(|(key, _)| key.clone()),
            sma_mode: sma.map(|(_, value)| value.clone()),
        }
    }
}

/// Parsed `clock-conf.conf` content.
#[derive(Debug, Clone)]
pub struct ClockConfOutput {
    interfaces: Vec<ClockConfObject>,
}

impl ClockConfOutput {
    /// Parses raw `cat clock-conf.conf` output.
    pub fn parse(raw: impl Into<RawOutput>) -> Result<Self> {
        let raw = raw.into();
        let parser = BlockParser::new(
            "cat clock-conf.conf",
            Some(BlockMarker::Key("ifname")),
            Delimiter::Whitespace,
        )
        .skipping_comments_and_sections();
        let blocks = parser.parse(&raw)?;

        Ok(Self {
            interfaces: blocks.into_iter().map(ClockConfObject::from_block).collect(),
        })
    }

    /// All interface blocks in source order.
    pub fn get_clock_conf_objects(&self) -> &[ClockConfObject] {
        &self.interfaces
    }
}
