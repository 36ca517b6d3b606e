//! `ifconfig -a` parsing.
//!
//! Each interface prints a block like:
//!
//! ```text
//! apxeboot: flags=5187<UP,BROADCAST,RUNNING,MASTER,MULTICAST>  mtu 1500
//!         inet 200.224.202.2  netmask 255.255.255.0  broadcast 200.224.202.255
//!         inet6 ffff::dddd:feff:fea1:3228  prefixlen 64  scopeid 0x20<link>
//!         ether 5c:fd:fe:a1:32:28  txqueuelen 1000  (Ethernet)
//!         RX packets 649707801  bytes 456281185903 (424.9 GiB)
//!         ...
//! ```
//!
//! Only the interface, inet, inet6, and ether lines carry extracted
//! fields; packet counters are ignored. Interfaces without an ether
//! line (loopback, netrom) are not reported.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use cli_output_core::{RawOutput, Result};
use tracing::debug;

static INTERFACE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<interface_name>[^\s:]+):\s*flags=(?P<flags>[0-9a-fA-F]+(?:<[^>]*>)?)\s+mtu\s+(?P<mtu>\d+)$",
    )
    .expect("static regex must compile")
});

static INET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^\s*inet\s+(?P<inet>\d{1,3}(?:\.\d{1,3}){3})\s+netmask\s+(?P<netmask>\d{1,3}(?:\.\d{1,3}){3})\s+broadcast\s+(?P<broadcast>\d{1,3}(?:\.\d{1,3}){3})",
    )
    .expect("static regex must compile")
});

static INET6_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"inet6\s+(?P<inet6>[0-9a-fA-F:]+)\s+prefixlen\s+(?P<prefixlen>\d+)\s+scopeid\s+(?P<scopeid>0x[0-9a-fA-F]+(?:<[^>]+>)?)",
    )
    .expect("static regex must compile")
});

static ETHER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*ether\s+(?P<ether>[0-9a-fA-F:]{17})\s+txqueuelen\s+(?P<txqueuelen>\d+)")
        .expect("static regex must compile")
});

/// One IPv4 address line of an interface block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inet {
    pub inet: String,
    pub netmask: String,
    pub broadcast: String,
}

/// One IPv6 address line of an interface block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inet6 {
    pub inet6: String,
    pub prefix_len: String,
    pub scope_id: String,
}

impl Inet6 {
    /// True when this address has global scope (scopeid
    /// `0x0<global>`), as opposed to link- or host-local.
    pub fn is_global(&self) -> bool {
        self.scope_id.contains("global")
    }
}

/// One interface block of `ifconfig -a`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IfConfigObject {
    pub interface_name: String,
    pub flags: String,
    pub mtu: String,
    pub ether: String,
    pub txqueuelen: String,
    pub inet_objects: Vec<Inet>,
    pub inet6_objects: Vec<Inet6>,
}

/// Parsed `ifconfig -a` output.
#[derive(Debug, Clone)]
pub struct IfConfigOutput {
    interfaces: Vec<IfConfigObject>,
}

impl IfConfigOutput {
    /// Parses raw `ifconfig -a` output.
    pub fn parse(raw: impl Into<RawOutput>) -> Result<Self> {
        let raw = raw.into();
        let mut interfaces = Vec::new();
        let mut current: Option<IfConfigObject> = None;

        for line in raw.lines() {
            if let Some(caps) = INTERFACE_RE.captures(line) {
                current = Some(IfConfigObject {
                    interface_name: caps["interface_name"].to_string(),
                    flags: caps["flags"].to_string(),
                    mtu: caps["mtu"].to_string(),
                    ..IfConfigObject::default()
                });
                continue;
            }

            let Some(interface) = current.as_mut() else {
                continue;
            };

            if let Some(caps) = INET6_RE.captures(line) {
                interface.inet6_objects.push(Inet6 {
                    inet6: caps["inet6"].to_string(),
                    prefix_len: caps["prefixlen"].to_string(),
                    scope_id: caps["scopeid"].to_string(),
                });
                continue;
            }

            if let Some(caps) = INET_RE.captures(line) {
                interface.inet_objects.push(Inet {
                    inet: caps["inet"].to_string(),
                    netmask: caps["netmask"].to_string(),
                    broadcast: caps["broadcast"].to_string(),
                });
                continue;
            }

            // The ether line closes out the fields we extract; blocks
            // without one (loopback, netrom) are not reported.
            if let Some(caps) = ETHER_RE.captures(line) {
                interface.ether = caps["ether"].to_string();
                interface.txqueuelen = caps["txqueuelen"].to_string();
                if let Some(done) = current.take() {
                    interfaces.push(done);
                }
            }
        }

        debug!(interfaces = interfaces.len(), "parsed ifconfig output");
        Ok(Self { interfaces })
    }

    /// All reported interface blocks in source order.
    pub fn get_ifconfig_objects(&self) -> &[IfConfigObject] {
        &self.interfaces
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IFCONFIG: &str = "\
apxeboot: flags=5187<UP,BROADCAST,RUNNING,MASTER,MULTICAST>  mtu 1500
        inet 200.224.202.2  netmask 255.255.255.0  broadcast 200.224.202.255
        inet6 ffff::dddd:feff:fea1:3228  prefixlen 64  scopeid 0x20<link>
        inet6 2620:10a:a001:a106::212  prefixlen 64  scopeid 0x0<global>
        ether 5c:fd:fe:a1:32:28  txqueuelen 1000  (Ethernet)
        RX packets 649707801  bytes 456281185903 (424.9 GiB)
        RX errors 0  dropped 115121  overruns 0  frame 0

lo: flags=73<UP,LOOPBACK,RUNNING>  mtu 65536
        inet 127.0.0.1  netmask 255.0.0.0  broadcast 127.255.255.255
        loop  txqueuelen 1000  (Local Loopback)
";

    #[test]
    fn test_interface_fields_and_nested_addresses() {
        let output = IfConfigOutput::parse(IFCONFIG).unwrap();
        let objects = output.get_ifconfig_objects();
        assert_eq!(objects.len(), 1, "loopback has no ether line");

        let apxeboot = &objects[0];
        assert_eq!(apxeboot.interface_name, "apxeboot");
        assert_eq!(apxeboot.mtu, "1500");
        assert_eq!(apxeboot.ether, "5c:fd:fe:a1:32:28");
        assert_eq!(apxeboot.inet_objects[0].netmask, "255.255.255.0");
        assert_eq!(apxeboot.inet6_objects.len(), 2);
    }

    #[test]
    fn test_global_scope_predicate() {
        let output = IfConfigOutput::parse(IFCONFIG).unwrap();
        let inet6 = &output.get_ifconfig_objects()[0].inet6_objects;
        assert!(!inet6[0].is_global());
        assert!(inet6[1].is_global());
    }
}
