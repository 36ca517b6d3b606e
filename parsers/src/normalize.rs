//! Output-noise filtering shared by all parsers.
//!
//! Remote shells decorate command output with material that carries no
//! field data: the prompt echoed after the command finishes, `Password:`
//! echoes from `sudo -S`, and terminal control sequences such as
//! bracketed-paste toggles (`\x1b[?2004h`). The invariant every parser
//! upholds is that none of these lines may produce a spurious record.

use regex::Regex;
use std::sync::LazyLock;

/// ANSI/terminal control sequences (CSI escapes, bracketed paste, colors).
static ANSI_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\x1b\[[0-9;?]*[ -/]*[@-~]").expect("static regex must compile")
});

/// Strips ANSI/terminal control sequences from a line.
pub fn strip_ansi(line: &str) -> String {
    ANSI_RE.replace_all(line, "").into_owned()
}

/// True when the line is a shell prompt echoed back after the command
/// (e.g. `sysadmin@controller-0:~$ `).
pub fn is_prompt(line: &str) -> bool {
    line.contains(":~$")
}

/// Strips a leading `Password: ` echo left by `sudo -S`, if present.
pub fn strip_password_echo(line: &str) -> &str {
    line.strip_prefix("Password: ").unwrap_or(line)
}

/// True when the line carries no semantic content at all: blank, a bare
/// newline artifact, or a shell prompt.
pub fn is_noise(line: &str) -> bool {
    let cleaned = strip_ansi(line);
    let trimmed = cleaned.trim();
    trimmed.is_empty() || trimmed == "Password:" || is_prompt(trimmed)
}
