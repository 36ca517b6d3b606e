//! `dpkg -s <package>` parsing.
//!
//! Package status is a colon-delimited key/value block; the
//! `Description` field spans multiple lines, which the shared
//! key/value parser folds back together with newline separators.

use cli_output_core::{RawOutput, Result, coerce};
use serde::{Deserialize, Serialize};

use crate::kv;

/// One package record from `dpkg -s`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DpkgStatusObject {
    pub package: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub section: Option<String>,
    /// Kilobytes, `-1` when dpkg did not report a size.
    pub installed_size: i64,
    pub maintainer: Option<String>,
    pub architecture: Option<String>,
    pub version: Option<String>,
    pub depends: Option<String>,
    pub description: Option<String>,
    pub homepage: Option<String>,
}

impl Default for DpkgStatusObject {
    fn default() -> Self {
        Self {
            package: None,
            status: None,
            priority: None,
            section: None,
            installed_size: -1,
            maintainer: None,
            architecture: None,
            version: None,
            depends: None,
            description: None,
            homepage: None,
        }
    }
}

/// Parsed `dpkg -s` output.
#[derive(Debug, Clone)]
pub struct DpkgStatusOutput {
    package_status: DpkgStatusObject,
}

impl DpkgStatusOutput {
    /// Parses raw `dpkg -s` output.
    pub fn parse(raw: impl Into<RawOutput>) -> Result<Self> {
        let raw = raw.into();
        let record = kv::parse_colon_block("dpkg -s", &raw)?;

        let text = |key: &str| record.get(key).cloned();
        let installed_size = match record.get("Installed-Size") {
            Some(value) => coerce::as_int("Installed-Size", value)?,
            None => -1,
        };

        Ok(Self {
            package_status: DpkgStatusObject {
                package: text("Package"),
                status: text("Status"),
                priority: text("Priority"),
                section: text("Section"),
                installed_size,
                maintainer: text("Maintainer"),
                architecture: text("Architecture"),
                version: text("Version"),
                depends: text("Depends"),
                description: text("Description"),
                homepage: text("Homepage"),
            },
        })
    }

    pub fn get_package_status(&self) -> &DpkgStatusObject {
        &self.package_status
    }
}
