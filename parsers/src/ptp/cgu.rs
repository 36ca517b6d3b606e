//! Clock Generation Unit (CGU) debug dump parsing.
//!
//! The ice driver exposes a CGU dump under debugfs:
//!
//! ```text
//! Found ZL80032 CGU
//! DPLL Config ver: 1.3.0.1
//! DPLL FW ver: 7006
//! CGU Input status:
//!                |            |      priority     |            |
//!    input (idx) |      state |  EEC (0) | PPS (8) | ESync fail |
//!  -------------------------------------------------------------
//!  CVL-SDP22 (0) |    invalid |      255 |       5 |        N/A |
//!  ...
//! EEC DPLL:
//!         Current reference:      GNSS-1PPS
//!         Status:         locked_ho_acq
//! PPS DPLL:
//!         Current reference:      GNSS-1PPS
//!         Status:         locked_ho_acq
//!         Phase offset [ps]:                     4 094
//! ```
//!
//! The first content line must announce the chip or the dump is
//! rejected outright. Input rows are recognized by shape rather than
//! position, so the decorative header and ruler lines need no special
//! casing. The phase offset is printed with digit-group spaces
//! (`4 094`), which are removed before integer coercion.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use cli_output_core::{ParseError, RawOutput, Result, coerce};
use tracing::debug;

const COMMAND: &str = "cat cgu";

static FOUND_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^Found (?P<chip_model>\S+) CGU$").expect("static regex must compile")
});

static CONFIG_VER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^DPLL Config ver:\s*(?P<version>.*)$").expect("static regex must compile")
});

static FW_VER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^DPLL FW ver:\s*(?P<version>.*)$").expect("static regex must compile")
});

static INPUT_ROW_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^\s*(?P<name>\S+)\s*\((?P<idx>\d+)\)\s*\|\s*(?P<state>\S+)\s*\|\s*(?P<eec>\d+)\s*\|\s*(?P<pps>\d+)\s*\|\s*(?P<esync_fail>N/A|\S+)\s*\|?$",
    )
    .expect("static regex must compile")
});

static CURRENT_REFERENCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*Current reference:\s*(?P<reference>.*)$").expect("static regex must compile")
});

static STATUS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*Status:\s*(?P<status>.*)$").expect("static regex must compile")
});

static PHASE_OFFSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*Phase offset \[ps]:\s*(?P<offset>.*)$").expect("static regex must compile")
});

/// One row of the CGU input status table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PtpCguInputObject {
    pub name: String,
    pub idx: i64,
    pub state: String,
    /// EEC DPLL priority for this input.
    pub eec: i64,
    /// PPS DPLL priority for this input.
    pub pps: i64,
    pub esync_fail: String,
}

/// The EEC DPLL status section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PtpCguEecDpllObject {
    pub current_reference: String,
    pub status: String,
}

/// The PPS DPLL status section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PtpCguPpsDpllObject {
    pub current_reference: String,
    pub status: String,
    /// Picoseconds.
    pub phase_offset: i64,
}

/// One CGU component: chip identity, input table, and DPLL sections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PtpCguComponentObject {
    pub chip_model: String,
    pub config_version: String,
    pub fw_version: String,
    pub cgu_inputs: Vec<PtpCguInputObject>,
    pub eec_dpll: Option<PtpCguEecDpllObject>,
    pub pps_dpll: Option<PtpCguPpsDpllObject>,
}

impl PtpCguComponentObject {
    /// The input row with the given name (e.g. `"CVL-SDP22"`).
    ///
    /// Returns `Ok(None)` when the dump has no such input, and fails
    /// when the name matches several rows rather than picking one
    /// arbitrarily.
    pub fn get_cgu_input(&self, name: &str) -> Result<Option<&PtpCguInputObject>> {
        let matches: Vec<&PtpCguInputObject> = self
            .cgu_inputs
            .iter()
            .filter(|input| input.name == name)
            .collect();
        match matches.as_slice() {
            [] => Ok(None),
            [input] => Ok(Some(input)),
            _ => Err(ParseError::AmbiguousLookup {
                entity: "CGU input".to_string(),
                name: name.to_string(),
                count: matches.len(),
            }),
        }
    }
}

/// Parsed CGU debugfs dump.
#[derive(Debug, Clone)]
pub struct PtpCguOutput {
    component: PtpCguComponentObject,
}

impl PtpCguOutput {
    /// Parses a raw CGU debugfs dump.
    pub fn parse(raw: impl Into<RawOutput>) -> Result<Self> {
        let raw = raw.into();
        let lines: Vec<String> = raw
            .lines()
            .map(crate::normalize::strip_ansi)
            .map(|line| crate::normalize::strip_password_echo(&line).to_string())
            .filter(|line| !crate::normalize::is_noise(line))
            .collect();

        let Some(first) = lines.first() else {
            return Err(ParseError::unexpected_format(COMMAND, "empty dump"));
        };
        let Some(found) = FOUND_RE.captures(first) else {
            return Err(ParseError::unexpected_format(
                COMMAND,
                format!("expected \"Found <chip> CGU\" header, got {first:?}"),
            ));
        };

        let mut component = PtpCguComponentObject {
            chip_model: found["chip_model"].to_string(),
            ..PtpCguComponentObject::default()
        };

        let mut i = 1;
        while i < lines.len() {
            let line = lines[i].as_str();

            if let Some(caps) = CONFIG_VER_RE.captures(line) {
                component.config_version = caps["version"].trim().to_string();
            } else if let Some(caps) = FW_VER_RE.captures(line) {
                component.fw_version = caps["version"].trim().to_string();
            } else if let Some(caps) = INPUT_ROW_RE.captures(line) {
                component.cgu_inputs.push(PtpCguInputObject {
                    name: caps["name"].to_string(),
                    idx: coerce::as_int("idx", &caps["idx"])?,
                    state: caps["state"].to_string(),
                    eec: coerce::as_int("eec", &caps["eec"])?,
                    pps: coerce::as_int("pps", &caps["pps"])?,
                    esync_fail: caps["esync_fail"].to_string(),
                });
            } else if line.trim() == "EEC DPLL:" {
                let reference = capture_next(&lines, &mut i, &CURRENT_REFERENCE_RE, "reference")?;
                let status = capture_next(&lines, &mut i, &STATUS_RE, "status")?;
                component.eec_dpll = Some(PtpCguEecDpllObject {
                    current_reference: reference,
                    status,
                });
            } else if line.trim() == "PPS DPLL:" {
                let reference = capture_next(&lines, &mut i, &CURRENT_REFERENCE_RE, "reference")?;
                let status = capture_next(&lines, &mut i, &STATUS_RE, "status")?;
                let offset = capture_next(&lines, &mut i, &PHASE_OFFSET_RE, "offset")?;
                // Digit groups are space-separated in the dump.
                let offset: String = offset.chars().filter(|c| !c.is_whitespace()).collect();
                component.pps_dpll = Some(PtpCguPpsDpllObject {
                    current_reference: reference,
                    status,
                    phase_offset: coerce::as_int("Phase offset [ps]", &offset)?,
                });
            } else {
                // Table decoration (header, ruler) and anything else we
                // do not extract.
                debug!(command = COMMAND, line, "skipping unextracted line");
            }

            i += 1;
        }

        debug!(
            command = COMMAND,
            chip_model = %component.chip_model,
            inputs = component.cgu_inputs.len(),
            "parsed CGU dump"
        );
        Ok(Self { component })
    }

    pub fn get_cgu_component(&self) -> &PtpCguComponentObject {
        &self.component
    }
}

/// Advances past `*i` and captures `group` from the next line, which
/// must match `re`.
fn capture_next(lines: &[String], i: &mut usize, re: &Regex, group: &str) -> Result<String> {
    *i += 1;
    let Some(line) = lines.get(*i) else {
        return Err(ParseError::unexpected_format(
            COMMAND,
            format!("dump ended while expecting {group}"),
        ));
    };
    let Some(caps) = re.captures(line) else {
        return Err(ParseError::unexpected_format(
            COMMAND,
            format!("expected {group} line, got {line:?}"),
        ));
    };
    Ok(caps.name(group)
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    const CGU_DUMP: &str = "\
Found ZL80032 CGU
DPLL Config ver: 1.3.0.1
DPLL FW ver: 7006
CGU Input status:
               |            |      priority     |            |
    input (idx) |      state |  EEC (0) | PPS (8) | ESync fail |
  --------------------------------------------------------------
  CVL-SDP22 (0) |    invalid |      255 |       5 |        N/A |
  CVL-SDP20 (1) |    invalid |      255 |       3 |        N/A |
   C827_0-RCLKA (2) |    invalid |       15 |       4 |        N/A |
      GNSS-1PPS (5) |      valid |        0 |       0 |        N/A |
EEC DPLL:
        Current reference:      GNSS-1PPS
        Status:         locked_ho_acq
PPS DPLL:
        Current reference:      GNSS-1PPS
        Status:         locked_ho_acq
        Phase offset [ps]:                     4 094
";

    #[test]
    fn test_chip_and_versions() {
        let output = PtpCguOutput::parse(CGU_DUMP).unwrap();
        let component = output.get_cgu_component();
        assert_eq!(component.chip_model, "ZL80032");
        assert_eq!(component.config_version, "1.3.0.1");
        assert_eq!(component.fw_version, "7006");
        assert_eq!(component.cgu_inputs.len(), 4);
    }

    #[test]
    fn test_input_row_fields() {
        let output = PtpCguOutput::parse(CGU_DUMP).unwrap();
        let component = output.get_cgu_component();
        let input = component
            .get_cgu_input("CVL-SDP22")
            .unwrap()
            .unwrap();
        assert_eq!(input.idx, 0);
        assert_eq!(input.state, "invalid");
        assert_eq!(input.eec, 255);
        assert_eq!(input.pps, 5);
        assert_eq!(input.esync_fail, "N/A");
    }

    #[test]
    fn test_dpll_sections_and_spaced_phase_offset() {
        let output = PtpCguOutput::parse(CGU_DUMP).unwrap();
        let component = output.get_cgu_component();

        let eec = component.eec_dpll.as_ref().unwrap();
        assert_eq!(eec.current_reference, "GNSS-1PPS");
        assert_eq!(eec.status, "locked_ho_acq");

        let pps = component.pps_dpll.as_ref().unwrap();
        assert_eq!(pps.current_reference, "GNSS-1PPS");
        assert_eq!(pps.phase_offset, 4094, "digit-group space must be removed");
    }

    #[test]
    fn test_password_echo_before_header_is_tolerated() {
        let echoed = format!("Password: {CGU_DUMP}");
        let output = PtpCguOutput::parse(echoed.as_str()).unwrap();
        assert_eq!(output.get_cgu_component().chip_model, "ZL80032");
    }

    #[test]
    fn test_missing_header_is_rejected() {
        let err = PtpCguOutput::parse("DPLL Config ver: 1.3.0.1\n").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedFormat { .. }));
    }

    #[test]
    fn test_unknown_input_lookup_returns_none() {
        let output = PtpCguOutput::parse(CGU_DUMP).unwrap();
        let component = output.get_cgu_component();
        assert_eq!(component.get_cgu_input("SMA1").unwrap(), None);
    }
}
