//! Core types shared by the CLI output parsers.
//!
//! This crate defines the foundational pieces every parser and output
//! wrapper builds on:
//!
//! - [`RawOutput`] — the unit of input: text captured verbatim from one
//!   remote command execution, whether delivered as a single string or
//!   as an ordered sequence of lines.
//! - [`ParseError`] / [`Result`] — the single error type covering
//!   configuration mistakes, malformed command output, coercion
//!   failures, and lookups that violate an exactly-one expectation.
//! - [`coerce`] — the shared string→bool and string→int coercion policy
//!   applied by every output wrapper.
//!
//! # Example
//!
//! ```
//! use cli_output_core::{RawOutput, coerce};
//!
//! let raw = RawOutput::from("pool 1 '.mgr' replicated size 2 min_size 1");
//! let first = raw.lines().next().unwrap();
//! let id = first.split_whitespace().nth(1).unwrap();
//! assert_eq!(coerce::as_int("pool_id", id).unwrap(), 1);
//! ```

pub mod coerce;
mod error;
mod raw;

pub use error::{ParseError, Result};
pub use raw::RawOutput;
