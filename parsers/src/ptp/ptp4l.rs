//! `systemctl status ptp4l@*` parsing.
//!
//! One invocation reports several service units; each unit is a block
//! introduced by a `●` bullet line naming the instance
//! (`ptp4l@ptp1.service`), followed by colon-delimited status fields
//! and a `└─` continuation line carrying the unit's command line.

use cli_output_core::{ParseError, RawOutput, Result};
use serde::{Deserialize, Serialize};

use crate::block::{BlockMarker, BlockParser, Delimiter};

/// Status of one ptp4l service instance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ptp4lStatusObject {
    pub service_name: String,
    pub loaded: String,
    pub active: String,
    pub process: String,
    pub main_pid: String,
    pub tasks: String,
    pub memory: String,
    pub cpu: String,
    pub cgroup: String,
    pub command: String,
}

/// Parsed multi-unit `systemctl status` output for ptp4l services.
#[derive(Debug, Clone)]
pub struct Ptp4lStatusOutput {
    services: Vec<Ptp4lStatusObject>,
}

impl Ptp4lStatusOutput {
    /// Parses raw `systemctl status ptp4l@*` output.
    pub fn parse(raw: impl Into<RawOutput>) -> Result<Self> {
        let raw = raw.into();
        let parser = BlockParser::new(
            "systemctl status ptp4l",
            Some(BlockMarker::Prefix {
                prefix: "●",
                name_after: "@",
                name_before: ".service",
            }),
            Delimiter::Colon,
        );
        let blocks = parser.parse(&raw)?;

        let services = blocks
            .into_iter()
            .map(|block| {
                let field = |key: &str| block.fields.get(key).cloned().unwrap_or_default();
                Ptp4lStatusObject {
                    service_name: block.name,
                    loaded: field("Loaded"),
                    active: field("Active"),
                    process: field("Process"),
                    main_pid: field("Main PID"),
                    tasks: field("Tasks"),
                    memory: field("Memory"),
                    cpu: field("CPU"),
                    cgroup: field("CGroup"),
                    command: field("command"),
                }
            })
            .collect();

        Ok(Self { services })
    }

    /// All service instances in source order.
    pub fn get_ptp4l_objects(&self) -> &[Ptp4lStatusObject] {
        &self.services
    }

    /// The instance with the given service name (e.g. `"ptp1"`).
    ///
    /// More than one unit with the same name should never happen, but
    /// is guarded rather than assumed: the error carries the match
    /// count instead of returning an arbitrary unit.
    pub fn get_ptp4l_object(&self, service_name: &str) -> Result<&Ptp4lStatusObject> {
        let matches: Vec<&Ptp4lStatusObject> = self
            .services
            .iter()
            .filter(|service| service.service_name == service_name)
            .collect();
        match matches.as_slice() {
            [service] => Ok(service),
            [] => Err(ParseError::NotFound {
                entity: "service".to_string(),
                name: service_name.to_string(),
            }),
            _ => Err(ParseError::AmbiguousLookup {
                entity: "service".to_string(),
                name: service_name.to_string(),
                count: matches.len(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STATUS: &str = "\
● ptp4l@ptp1.service - Precision Time Protocol (PTP) service
     Loaded: loaded (/etc/systemd/system/ptp4l@.service; enabled; vendor preset: disabled)
     Active: active (running) since Mon 2025-02-10 18:36:34 UTC; 3 days ago
     Main PID: 15221 (ptp4l)
     Tasks: 1 (limit: 150897)
     Memory: 336.0K
       CPU: 1min 33.917s
     CGroup: /system.slice/system-ptp4l.slice/ptp4l@ptp1.service
       └─15221 /usr/sbin/ptp4l -f /etc/linuxptp/ptpinstance/ptp4l-ptp1.conf

● ptp4l@ptp3.service - Precision Time Protocol (PTP) service
     Loaded: loaded (/etc/systemd/system/ptp4l@.service; enabled; vendor preset: disabled)
     Active: active (running) since Wed 2025-02-12 16:22:23 UTC; 2 days ago
     Process: 3816049 ExecStartPost=/bin/bash -c echo $MAINPID > /var/run/ptp4l-ptp3.pid (code=exited, status=0/SUCCESS)
     Main PID: 3816048 (ptp4l)
     Tasks: 1 (limit: 150897)
     Memory: 328.0K
       CPU: 38.984s
     CGroup: /system.slice/system-ptp4l.slice/ptp4l@ptp3.service
       └─3816048 /usr/sbin/ptp4l -f /etc/linuxptp/ptpinstance/ptp4l-ptp3.conf
";

    #[test]
    fn test_two_units_do_not_cross_contaminate() {
        let output = Ptp4lStatusOutput::parse(STATUS).unwrap();
        assert_eq!(output.get_ptp4l_objects().len(), 2);

        let ptp1 = output.get_ptp4l_object("ptp1").unwrap();
        assert!(ptp1.active.starts_with("active (running) since Mon"));
        assert_eq!(ptp1.main_pid, "15221 (ptp4l)");
        assert_eq!(ptp1.memory, "336.0K");
        assert_eq!(ptp1.cpu, "1min 33.917s");
        assert_eq!(
            ptp1.command,
            "15221 /usr/sbin/ptp4l -f /etc/linuxptp/ptpinstance/ptp4l-ptp1.conf"
        );

        let ptp3 = output.get_ptp4l_object("ptp3").unwrap();
        assert!(ptp3.active.starts_with("active (running) since Wed"));
        assert_eq!(ptp3.main_pid, "3816048 (ptp4l)");
        assert_eq!(ptp3.memory, "328.0K");
        assert_eq!(ptp3.cpu, "38.984s");
        assert_eq!(
            ptp3.command,
            "3816048 /usr/sbin/ptp4l -f /etc/linuxptp/ptpinstance/ptp4l-ptp3.conf"
        );
        assert!(ptp3.process.starts_with("3816049 ExecStartPost"));
    }

    #[test]
    fn test_missing_service_lookup_errors() {
        let output = Ptp4lStatusOutput::parse(STATUS).unwrap();
        assert!(matches!(
            output.get_ptp4l_object("ptp9"),
            Err(ParseError::NotFound { .. })
        ));
    }

    #[test]
    fn test_duplicate_service_name_lookup_is_ambiguous() {
        let doubled = format!("{STATUS}\n{}", STATUS.replace("ptp3", "ptp1"));
        let output = Ptp4lStatusOutput::parse(doubled.as_str()).unwrap();
        let err = output.get_ptp4l_object("ptp1").unwrap_err();
        assert!(matches!(err, ParseError::AmbiguousLookup { count: 3, .. }));
    }
}
