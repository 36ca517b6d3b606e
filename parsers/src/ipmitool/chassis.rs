//! `ipmitool chassis status` parsing.
//!
//! The command prints one colon-delimited key/value block. Fields whose
//! values are the literal strings `true`/`false` are coerced to booleans
//! by this output layer, not by the parser.

use cli_output_core::{RawOutput, Result, coerce};
use serde::{Deserialize, Serialize};

use crate::kv;

/// The chassis status record reported by `ipmitool chassis status`.
///
/// Every field is optional: the BMC omits lines it has no reading for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpmiToolChassisStatusObject {
    pub system_power: Option<String>,
    pub power_overload: Option<bool>,
    pub power_interlock: Option<String>,
    pub main_power_fault: Option<bool>,
    pub power_control_fault: Option<bool>,
    pub power_restore_policy: Option<String>,
    pub last_power_event: Option<String>,
    pub chassis_intrusion: Option<String>,
    pub front_panel_lockout: Option<String>,
    pub drive_fault: Option<bool>,
    pub cooling_fan_fault: Option<bool>,
    pub sleep_button_disable: Option<String>,
    pub diag_button_disable: Option<String>,
    pub reset_button_disable: Option<String>,
    pub power_button_disable: Option<String>,
    pub sleep_button_disabled: Option<bool>,
    pub diag_button_disabled: Option<bool>,
    pub reset_button_disabled: Option<bool>,
    pub power_button_disabled: Option<bool>,
}

/// Parsed `ipmitool chassis status` output.
#[derive(Debug, Clone)]
pub struct IpmiToolChassisStatusOutput {
    chassis_status: IpmiToolChassisStatusObject,
}

impl IpmiToolChassisStatusOutput {
    /// Parses raw `ipmitool chassis status` output.
    pub fn parse(raw: impl Into<RawOutput>) -> Result<Self> {
        let raw = raw.into();
        let record = kv::parse_colon_block("ipmitool chassis status", &raw)?;

        let text = |key: &str| record.get(key).cloned();
        let flag = |key: &str| record.get(key).map(|value| coerce::as_bool(value));

        let chassis_status = IpmiToolChassisStatusObject {
            system_power: text("System Power"),
            power_overload: flag("Power Overload"),
            power_interlock: text("Power Interlock"),
            main_power_fault: flag("Main Power Fault"),
            power_control_fault: flag("Power Control Fault"),
            power_restore_policy: text("Power Restore Policy"),
            last_power_event: text("Last Power Event"),
            chassis_intrusion: text("Chassis Intrusion"),
            front_panel_lockout: text("Front-Panel Lockout"),
            drive_fault: flag("Drive Fault"),
            cooling_fan_fault: flag("Cooling/Fan Fault"),
            sleep_button_disable: text("Sleep Button Disable"),
            diag_button_disable: text("Diag Button Disable"),
            reset_button_disable: text("Reset Button Disable"),
            power_button_disable: text("Power Button Disable"),
            sleep_button_disabled: flag("Sleep Button Disabled"),
            diag_button_disabled: flag("Diag Button Disabled"),
            reset_button_disabled: flag("Reset Button Disabled"),
            power_button_disabled: flag("Power Button Disabled"),
        };

        Ok(Self { chassis_status })
    }

    pub fn get_chassis_status(&self) -> &IpmiToolChassisStatusObject {
        &self.chassis_status
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHASSIS: &str = "\
System Power         : on
Power Overload       : false
Power Interlock      : inactive
Main Power Fault     : false
Power Control Fault  : false
Power Restore Policy : always-off
Last Power Event     : command
Chassis Intrusion    : inactive
Front-Panel Lockout  : inactive
Drive Fault          : false
Cooling/Fan Fault    : true
";

    #[test]
    fn test_string_and_bool_fields() {
        let output = IpmiToolChassisStatusOutput::parse(CHASSIS).unwrap();
        let status = output.get_chassis_status();
        assert_eq!(status.system_power.as_deref(), Some("on"));
        assert_eq!(status.power_overload, Some(false));
        assert_eq!(status.cooling_fan_fault, Some(true));
        assert_eq!(status.power_restore_policy.as_deref(), Some("always-off"));
    }

    #[test]
    fn test_absent_fields_stay_none() {
        let output = IpmiToolChassisStatusOutput::parse("System Power : off\n").unwrap();
        let status = output.get_chassis_status();
        assert_eq!(status.system_power.as_deref(), Some("off"));
        assert_eq!(status.power_overload, None);
        assert_eq!(status.sleep_button_disabled, None);
    }
}
