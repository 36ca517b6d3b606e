//! `ipmitool sensor` parsing.
//!
//! Sensor output is a pipe-delimited table with a fixed arity: every
//! row carries exactly ten columns (nine `|` separators). The format is
//! assumed stable, so a row with any other separator count is a hard
//! parse error rather than a best-effort record.

use cli_output_core::{ParseError, RawOutput, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::normalize;

const COLUMNS: usize = 10;

/// One row of `ipmitool sensor`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpmiToolSensorObject {
    pub sensor_name: String,
    pub current_reading: String,
    pub unit_of_measurement: String,
    pub operational_status: String,
    pub lower_non_recoverable: String,
    pub lower_critical: String,
    pub lower_non_critical: String,
    pub upper_non_critical: String,
    pub upper_critical: String,
    pub upper_non_recoverable: String,
}

/// Parsed `ipmitool sensor` output owning one object per sensor row.
#[derive(Debug, Clone)]
pub struct IpmiToolSensorOutput {
    sensors: Vec<IpmiToolSensorObject>,
}

impl IpmiToolSensorOutput {
    /// Parses raw `ipmitool sensor` output.
    ///
    /// Fails with [`ParseError::MalformedLine`] on any row that does
    /// not split into exactly ten columns.
    pub fn parse(raw: impl Into<RawOutput>) -> Result<Self> {
        let raw = raw.into();
        let mut sensors = Vec::new();

        for line in raw.lines() {
            let line = normalize::strip_ansi(line);
            if normalize::is_noise(&line) {
                continue;
            }

            let cells: Vec<&str> = line.split('|').map(str::trim).collect();
            if cells.len() != COLUMNS {
                return Err(ParseError::malformed_line("ipmitool sensor", &line));
            }

            sensors.push(IpmiToolSensorObject {
                sensor_name: cells[0].to_string(),
                current_reading: cells[1].to_string(),
                unit_of_measurement: cells[2].to_string(),
                operational_status: cells[3].to_string(),
                lower_non_recoverable: cells[4].to_string(),
                lower_critical: cells[5].to_string(),
                lower_non_critical: cells[6].to_string(),
                upper_non_critical: cells[7].to_string(),
                upper_critical: cells[8].to_string(),
                upper_non_recoverable: cells[9].to_string(),
            });
        }

        debug!(sensors = sensors.len(), "parsed ipmitool sensor table");
        Ok(Self { sensors })
    }

    /// All sensor rows in source order.
    pub fn get_sensors(&self) -> &[IpmiToolSensorObject] {
        &self.sensors
    }

    /// The sensor with the given name; errors on zero or several
    /// matches.
    pub fn get_sensor(&self, sensor_name: &str) -> Result<&IpmiToolSensorObject> {
        let matches: Vec<&IpmiToolSensorObject> = self
            .sensors
            .iter()
            .filter(|sensor| sensor.sensor_name == sensor_name)
            .collect();
        match matches.as_slice() {
            [sensor] => Ok(sensor),
            [] => Err(ParseError::NotFound {
                entity: "sensor".to_string(),
                name: sensor_name.to_string(),
            }),
            _ => Err(ParseError::AmbiguousLookup {
                entity: "sensor".to_string(),
                name: sensor_name.to_string(),
                count: matches.len(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SENSORS: &str = "\
Temp             | 24.000     | degrees C  | ok    | na        | na        | na        | 95.000    | 100.000   | na
Fan1A            | 4680.000   | RPM        | ok    | 480.000   | 840.000   | na        | na        | na        | na
Voltage 1        | 12.192     | Volts      | ok    | na        | na        | na        | na        | na        | na
";

    #[test]
    fn test_rows_split_into_ten_columns() {
        let output = IpmiToolSensorOutput::parse(SENSORS).unwrap();
        let sensors = output.get_sensors();
        assert_eq!(sensors.len(), 3);
        assert_eq!(sensors[0].sensor_name, "Temp");
        assert_eq!(sensors[0].upper_critical, "100.000");
        assert_eq!(sensors[1].lower_non_recoverable, "480.000");
        assert_eq!(sensors[2].unit_of_measurement, "Volts");
    }

    #[test]
    fn test_wrong_arity_is_a_hard_error() {
        let err = IpmiToolSensorOutput::parse("Temp | 24.000 | degrees C | ok\n").unwrap_err();
        assert!(matches!(err, ParseError::MalformedLine { .. }));
    }

    #[test]
    fn test_name_lookup() {
        let output = IpmiToolSensorOutput::parse(SENSORS).unwrap();
        assert_eq!(
            output.get_sensor("Fan1A").unwrap().current_reading,
            "4680.000"
        );
        assert!(matches!(
            output.get_sensor("Fan9Z"),
            Err(ParseError::NotFound { .. })
        ));
    }
}
