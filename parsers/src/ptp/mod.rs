//! Parsers for PTP (Precision Time Protocol) tooling output.

pub mod cgu;
pub mod clock_conf;
pub mod gnss_monitor;
pub mod ptp4l;
