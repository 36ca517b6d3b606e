//! Parsers for `ipmitool` output.

pub mod chassis;
pub mod sensor;
