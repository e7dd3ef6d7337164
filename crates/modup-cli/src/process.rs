//! Process coordination around the program being updated.

use std::fs::OpenOptions;
use std::path::Path;
use std::process::Command;
use std::thread;
use std::time::{Duration, Instant};

use tracing::debug;

/// Poll interval while waiting for the program file to become writable.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Wait until the file at `path` can be opened for writing, up to
/// `timeout`.
///
/// A running program holds its own executable open; once the file is
/// writable the old version has exited far enough for the update to
/// replace it. Returns `false` when the timeout elapses first.
pub fn wait_until_writable(path: &Path, timeout: Duration) -> bool {
    let start = Instant::now();
    loop {
        if OpenOptions::new().write(true).open(path).is_ok() {
            return true;
        }
        if start.elapsed() > timeout {
            debug!(path = %path.display(), "timed out waiting for writable file");
            return false;
        }
        thread::sleep(POLL_INTERVAL);
    }
}

/// Start the updated program and return without waiting for it.
pub fn relaunch(program: &Path) -> std::io::Result<()> {
    debug!(program = %program.display(), "relaunching");
    Command::new(program).spawn()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writable_file_returns_immediately() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("program");
        std::fs::write(&path, "bin").unwrap();

        assert!(wait_until_writable(&path, Duration::from_secs(1)));
    }

    #[test]
    fn missing_file_times_out() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ghost");

        let start = Instant::now();
        assert!(!wait_until_writable(&path, Duration::from_millis(250)));
        assert!(start.elapsed() >= Duration::from_millis(250));
    }
}
