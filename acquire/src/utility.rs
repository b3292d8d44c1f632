//! Locating and invoking the third-party diagnostic utility.

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::info;

/// Binary names probed on PATH, in order.
const UTILITY_CANDIDATES: &[&str] = &["hwdiag", "hwdiag64"];

/// Resolves the diagnostic utility binary.
///
/// An explicitly configured path wins; otherwise the known binary names
/// are searched on PATH.
pub fn locate_utility(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        if path.exists() {
            return Ok(path.to_path_buf());
        }
        bail!("Configured utility path does not exist: {}", path.display());
    }

    for candidate in UTILITY_CANDIDATES {
        if let Some(found) = find_on_path(candidate) {
            return Ok(found);
        }
    }

    bail!(
        "Diagnostic utility not found. Install one of {:?} or pass an explicit path.",
        UTILITY_CANDIDATES
    )
}

/// Searches PATH directories for an executable name.
fn find_on_path(name: &str) -> Option<PathBuf> {
    let path_var = std::env::var_os("PATH")?;
    for dir in std::env::split_paths(&path_var) {
        let candidate = dir.join(name);
        if candidate.is_file() {
            return Some(candidate);
        }
        #[cfg(windows)]
        {
            let with_exe = dir.join(format!("{}.exe", name));
            if with_exe.is_file() {
                return Some(with_exe);
            }
        }
    }
    None
}

/// Runs the utility in report mode, writing to `out`.
///
/// The utility is expected to exit after scheduling the report; file
/// completion is handled separately by the stability wait.
pub fn generate_report(utility: &Path, out: &Path) -> Result<()> {
    info!(utility = %utility.display(), out = %out.display(), "invoking diagnostic utility");
    let output = Command::new(utility)
        .arg("-r")
        .arg("-f")
        .arg(out)
        .output()
        .with_context(|| format!("Failed to execute {}", utility.display()))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!(
            "Diagnostic utility failed with {}:\n{}",
            output.status,
            stderr
        );
    }
    Ok(())
}
