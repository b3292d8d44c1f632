//! Registry collaborator for the OS-identity fallback.
//!
//! Shells out to `reg query` against the Windows CurrentVersion key and
//! parses the value table. On other platforms every lookup is absent,
//! which the resolver treats as "no fallback source".

use report::{RegistryView, ScanError};
use tracing::debug;

/// Registry key holding the OS identity values.
#[cfg(windows)]
const CURRENT_VERSION_KEY: &str = r"HKLM\SOFTWARE\Microsoft\Windows NT\CurrentVersion";

/// Live registry lookup via `reg query`.
pub struct SystemRegistry;

impl RegistryView for SystemRegistry {
    fn value(&self, name: &str) -> Option<String> {
        query_value(name)
    }
}

#[cfg(windows)]
fn query_value(name: &str) -> Option<String> {
    let output = std::process::Command::new("reg")
        .args(["query", CURRENT_VERSION_KEY, "/v", name])
        .output();
    match output {
        Ok(output) if output.status.success() => {
            let stdout = String::from_utf8_lossy(&output.stdout);
            parse_reg_value(&stdout, name)
        }
        Ok(output) => {
            let err = ScanError::CollaboratorUnavailable(format!(
                "reg query exited with {}",
                output.status
            ));
            debug!(%err, value = name, "registry lookup failed");
            None
        }
        Err(e) => {
            let err = ScanError::CollaboratorUnavailable(e.to_string());
            debug!(%err, value = name, "registry lookup failed");
            None
        }
    }
}

#[cfg(not(windows))]
fn query_value(name: &str) -> Option<String> {
    let err = ScanError::CollaboratorUnavailable("registry lookup is Windows-only".to_string());
    debug!(%err, value = name, "registry lookup skipped");
    None
}

/// Parses one value out of `reg query` output.
///
/// Rows look like `    ProductName    REG_SZ    Windows 11 Pro`;
/// REG_DWORD values are hex-encoded and converted to decimal so numeric
/// consumers can parse them directly. Malformed lines are skipped.
pub fn parse_reg_value(stdout: &str, name: &str) -> Option<String> {
    for line in stdout.lines() {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() < 3 {
            continue;
        }
        if !tokens[0].eq_ignore_ascii_case(name) || !tokens[1].starts_with("REG_") {
            continue;
        }
        let raw = tokens[2..].join(" ");
        if tokens[1] == "REG_DWORD" {
            let hex = raw.trim_start_matches("0x");
            return u64::from_str_radix(hex, 16).ok().map(|v| v.to_string());
        }
        return Some(raw);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const REG_OUTPUT: &str = "\r\n\
HKEY_LOCAL_MACHINE\\SOFTWARE\\Microsoft\\Windows NT\\CurrentVersion\r\n\
    ProductName    REG_SZ    Windows 11 Pro\r\n\
    UBR    REG_DWORD    0xd77\r\n\
\r\n";

    #[test]
    fn test_parse_string_value() {
        assert_eq!(
            parse_reg_value(REG_OUTPUT, "ProductName").as_deref(),
            Some("Windows 11 Pro")
        );
    }

    #[test]
    fn test_parse_dword_as_decimal() {
        assert_eq!(parse_reg_value(REG_OUTPUT, "UBR").as_deref(), Some("3447"));
    }

    #[test]
    fn test_missing_value() {
        assert_eq!(parse_reg_value(REG_OUTPUT, "DisplayVersion"), None);
    }

    #[test]
    fn test_malformed_lines_are_skipped() {
        assert_eq!(parse_reg_value("garbage\nProductName\n", "ProductName"), None);
    }
}
