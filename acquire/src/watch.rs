//! Waiting for the report file to be fully written.
//!
//! The utility writes its report asynchronously; the core must never see
//! partial text. A file counts as stable once it exists, is non-empty,
//! and its size has not changed across two consecutive polls.

use anyhow::{bail, Context, Result};
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::debug;

const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Waits for `path` to stabilize and reads it, with a hard timeout.
pub fn wait_for_stable(path: &Path, timeout: Duration) -> Result<String> {
    wait_for_stable_with(path, POLL_INTERVAL, timeout)
}

/// As [`wait_for_stable`], with a caller-chosen poll interval.
pub fn wait_for_stable_with(
    path: &Path,
    interval: Duration,
    timeout: Duration,
) -> Result<String> {
    let deadline = Instant::now() + timeout;
    let mut last_size: Option<u64> = None;

    loop {
        let size = std::fs::metadata(path).map(|m| m.len()).ok();
        match (last_size, size) {
            (Some(previous), Some(current)) if previous == current && current > 0 => {
                debug!(path = %path.display(), size = current, "report file stable");
                return std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read report {}", path.display()));
            }
            _ => last_size = size,
        }

        if Instant::now() >= deadline {
            bail!(
                "Timed out waiting for report file to stabilize: {}",
                path.display()
            );
        }
        std::thread::sleep(interval);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("hwsnap-watch-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_reads_completed_file() {
        let path = temp_path("done.txt");
        std::fs::write(&path, "report body").unwrap();

        let text = wait_for_stable_with(
            &path,
            Duration::from_millis(10),
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(text, "report body");

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_times_out_on_missing_file() {
        let path = temp_path("never-written.txt");
        let result = wait_for_stable_with(
            &path,
            Duration::from_millis(10),
            Duration::from_millis(50),
        );
        assert!(result.is_err());
    }
}
