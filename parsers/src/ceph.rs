//! `ceph osd pool ls detail` parsing.
//!
//! Each line of output is one pool's entire record, in a fixed word
//! order ceph emits:
//!
//! ```text
//! pool 1 '.mgr' replicated size 2 min_size 1 crush_rule 9 object_hash ...
//! ```
//!
//! Extraction is positional word-splitting, an inherently fragile but
//! intentional contract matching that fixed order: the 2nd token is the
//! pool id, the 3rd the quote-wrapped pool name, the 6th the replicated
//! size, the 8th min_size.

use cli_output_core::{ParseError, RawOutput, Result, coerce};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::normalize;

/// One pool from `ceph osd pool ls detail`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CephOsdPoolLsDetailObject {
    pub pool_id: i64,
    pub pool_name: String,
    pub replicated_size: i64,
    pub min_size: i64,
}

/// Parsed `ceph osd pool ls detail` output.
#[derive(Debug, Clone)]
pub struct CephOsdPoolLsDetailOutput {
    pools: Vec<CephOsdPoolLsDetailObject>,
}

impl CephOsdPoolLsDetailOutput {
    /// Parses raw `ceph osd pool ls detail` output.
    pub fn parse(raw: impl Into<RawOutput>) -> Result<Self> {
        let raw = raw.into();
        let mut pools = Vec::new();

        for line in raw.lines() {
            let line = normalize::strip_ansi(line);
            // The command ends its listing with a bare "\n" separator
            // line; that and any prompt echo never become pools.
            if normalize::is_noise(&line) {
                continue;
            }

            let tokens: Vec<&str> = line.split_whitespace().collect();
            if tokens.first() != Some(&"pool") || tokens.len() < 8 {
                return Err(ParseError::malformed_line("ceph osd pool ls detail", &line));
            }

            pools.push(CephOsdPoolLsDetailObject {
                pool_id: coerce::as_int("pool_id", tokens[1])?,
                pool_name: tokens[2].trim_matches('\'').to_string(),
                replicated_size: coerce::as_int("replicated_size", tokens[5])?,
                min_size: coerce::as_int("min_size", tokens[7])?,
            });
        }

        debug!(pools = pools.len(), "parsed ceph pool listing");
        Ok(Self { pools })
    }

    /// All pools in source order.
    pub fn get_ceph_osd_pool_list(&self) -> &[CephOsdPoolLsDetailObject] {
        &self.pools
    }

    /// The pool with the given name; errors on zero or several matches.
    pub fn get_ceph_osd_pool(&self, pool_name: &str) -> Result<&CephOsdPoolLsDetailObject> {
        let matches: Vec<&CephOsdPoolLsDetailObject> = self
            .pools
            .iter()
            .filter(|pool| pool.pool_name == pool_name)
            .collect();
        match matches.as_slice() {
            [pool] => Ok(pool),
            [] => Err(ParseError::NotFound {
                entity: "pool".to_string(),
                name: pool_name.to_string(),
            }),
            _ => Err(ParseError::AmbiguousLookup {
                entity: "pool".to_string(),
                name: pool_name.to_string(),
                count: matches.len(),
            }),
        }
    }
}
