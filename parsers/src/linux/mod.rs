//! Parsers for general Linux host commands.

pub mod dpkg;
pub mod ifconfig;
pub mod ip_addr;
