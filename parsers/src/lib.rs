//! Typed parsers for raw CLI command output.
//!
//! Each submodule converts the text a command prints over SSH into
//! typed objects, built on a small set of shared engines:
//!
//! - [`table`]: column-aligned tables with a caller-supplied header
//!   vocabulary (`docker images`)
//! - [`kv`]: colon-delimited key/value blocks with continuation lines
//!   (`ipmitool chassis status`, `dpkg -s`)
//! - [`block`]: marker-introduced repeating blocks (`systemctl status`,
//!   `clock-conf.conf`, `gnss-monitor-ptp.conf`)
//! - [`normalize`]: shared shell-noise filtering (prompts, `Password:`
//!   echoes, ANSI control sequences)
//!
//! Command-specific parsers sit on top and expose `parse` plus typed
//! accessors:
//!
//! ```
//! use cli_output_parsers::docker::DockerImagesOutput;
//!
//! let raw = "\
//! REPOSITORY   TAG      IMAGE ID       CREATED       SIZE
//! alpine       latest   1d34ffeaf190   4 weeks ago   7.79MB
//! ";
//! let output = DockerImagesOutput::parse(raw)?;
//! assert_eq!(output.get_image("alpine")?.tag, "latest");
//! # Ok::<(), cli_output_core::ParseError>(())
//! ```

pub mod block;
pub mod ceph;
pub mod docker;
pub mod ipmitool;
pub mod kv;
pub mod linux;
pub mod normalize;
pub mod ptp;
pub mod table;
