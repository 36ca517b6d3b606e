//! `ip -br addr` parsing.
//!
//! The brief address listing is space-delimited with fixed positions:
//! interface name, operational state, then zero or more addresses. Each
//! address token may carry a `/prefixlen` suffix, which the owning
//! [`IpObject`] splits into a separate integer field; the line parser
//! itself keeps address tokens opaque.

use cli_output_core::{ParseError, RawOutput, Result, coerce};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::normalize;

/// One address token from `ip -br addr`, with the prefix length split
/// off.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpObject {
    pub address: String,
    pub prefix_length: Option<i64>,
}

impl IpObject {
    /// Splits an `addr/prefixlen` token.
    fn from_token(token: &str) -> Result<Self> {
        match token.split_once('/') {
            Some((address, prefix)) => Ok(Self {
                address: address.to_string(),
                prefix_length: Some(coerce::as_int("prefix_length", prefix)?),
            }),
            None => Ok(Self {
                address: token.to_string(),
                prefix_length: None,
            }),
        }
    }
}

/// One interface row from `ip -br addr`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpBrAddrObject {
    pub interface: String,
    pub state: String,
    pub addresses: Vec<IpObject>,
}

/// Parsed `ip -br addr` output.
#[derive(Debug, Clone)]
pub struct IpBrAddrOutput {
    interfaces: Vec<IpBrAddrObject>,
}

impl IpBrAddrOutput {
    /// Parses raw `ip -br addr` output.
    pub fn parse(raw: impl Into<RawOutput>) -> Result<Self> {
        let raw = raw.into();
        let mut interfaces = Vec::new();

        for line in raw.lines() {
            let line = normalize::strip_ansi(line);
            if normalize::is_noise(&line) {
                continue;
            }
            // The terminal echoes the command itself back before the
            // listing; discard that literal line.
            if line.trim() == "ip -br addr" {
                continue;
            }

            let tokens: Vec<&str> = line.split_whitespace().collect();
            let [interface, state, address_tokens @ ..] = tokens.as_slice() else {
                return Err(ParseError::malformed_line("ip -br addr", &line));
            };

            let addresses = address_tokens
                .iter()
                .map(|token| IpObject::from_token(token))
                .collect::<Result<Vec<_>>>()?;

            interfaces.push(IpBrAddrObject {
                interface: (*interface).to_string(),
                state: (*state).to_string(),
                addresses,
            });
        }

        debug!(interfaces = interfaces.len(), "parsed ip -br addr listing");
        Ok(Self { interfaces })
    }

    /// All interface rows in source order.
    pub fn get_interfaces(&self) -> &[IpBrAddrObject] {
        &self.interfaces
    }

    /// The row for the given interface name; errors on zero or several
    /// matches.
    pub fn get_interface(&self, interface: &str) -> Result<&IpBrAddrObject> {
        let matches: Vec<&IpBrAddrObject> = self
            .interfaces
            .iter()
            .filter(|row| row.interface == interface)
            .collect();
        match matches.as_slice() {
            [row] => Ok(row),
            [] => Err(ParseError::NotFound {
                entity: "interface".to_string(),
                name: interface.to_string(),
            }),
            _ => Err(ParseError::AmbiguousLookup {
                entity: "interface".to_string(),
                name: interface.to_string(),
                count: matches.len(),
            }),
        }
    }
}
