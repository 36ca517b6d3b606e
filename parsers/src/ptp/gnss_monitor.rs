//! `gnss-monitor-ptp.conf` parsing.
//!
//! The GNSS monitoring configuration is a single INI-style block:
//! `[section]` headers and `#` comment lines are skipped, every other
//! line is a key and a value separated by the first whitespace run.

use cli_output_core::{ParseError, RawOutput, Result, coerce};
use serde::{Deserialize, Serialize};

use crate::block::{BlockParser, Delimiter};

const COMMAND: &str = "cat gnss-monitor-ptp.conf";

/// Thresholds configured for GNSS monitoring.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GnssMonitorConfObject {
    pub devices: String,
    pub satellite_count: i64,
    pub signal_quality_db: i64,
}

/// Parsed `gnss-monitor-ptp.conf` content.
#[derive(Debug, Clone)]
pub struct GnssMonitorConfOutput {
    conf: GnssMonitorConfObject,
}

impl GnssMonitorConfOutput {
    /// Parses raw `cat gnss-monitor-ptp.conf` output.
    pub fn parse(raw: impl Into<RawOutput>) -> Result<Self> {
        let raw = raw.into();
        let parser = BlockParser::new(COMMAND, None, Delimiter::Whitespace)
            .skipping_comments_and_sections();
        let blocks = parser.parse(&raw)?;
        let Some(block) = blocks.into_iter().next() else {
            return Err(ParseError::unexpected_format(
                COMMAND,
                "no configuration lines found",
            ));
        };

        let int_field = |key: &str| match block.fields.get(key) {
            Some(value) => coerce::as_int(key, value),
            None => Err(ParseError::unexpected_format(
                COMMAND,
                format!("missing key {key:?}"),
            )),
        };

        Ok(Self {
            conf: GnssMonitorConfObject {
                devices: block.fields.get("devices").cloned().unwrap_or_default(),
                satellite_count: int_field("satellite_count")?,
                signal_quality_db: int_field("signal_quality_db")?,
            },
        })
    }

    pub fn get_gnss_monitor_conf_object(&self) -> &GnssMonitorConfObject {
        &self.conf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GNSS_CONF: &str = "\
[global]
#
# GNSS monitoring thresholds
#
devices /dev/gnss0
satellite_count 9
signal_quality_db 30
";

    #[test]
    fn test_thresholds_are_coerced_to_integers() {
        let output = GnssMonitorConfOutput::parse(GNSS_CONF).unwrap();
        let conf = output.get_gnss_monitor_conf_object();
        assert_eq!(conf.devices, "/dev/gnss0");
        assert_eq!(conf.satellite_count, 9);
        assert_eq!(conf.signal_quality_db, 30);
    }

    #[test]
    fn test_non_numeric_threshold_is_rejected() {
        let err =
            GnssMonitorConfOutput::parse("devices /dev/gnss0\nsatellite_count many\nsignal_quality_db 30\n")
                .unwrap_err();
        assert!(matches!(err, ParseError::InvalidInteger { .. }));
    }

    #[test]
    fn test_empty_input_is_unexpected_format() {
        let err = GnssMonitorConfOutput::parse("[global]\n# nothing\n").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedFormat { .. }));
    }
}
