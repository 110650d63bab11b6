//! Git subprocess client
//!
//! All version-control work goes through the system `git` command; only the
//! exit status and the first line of stdout are interpreted. Two rules keep
//! concurrent pipelines correct and live:
//!
//! - the working directory is passed explicitly to every invocation, never
//!   taken from (or written to) the process-wide current directory, since
//!   multiple repository pipelines run at once;
//! - every invocation is wrapped in a timeout and killed when it expires, so
//!   a hung remote stalls only its own repository's pipeline.
//!
//! The `GitClient` trait exists so tests can substitute a mock and assert on
//! the exact commands a pipeline issues without touching the network.

use crate::error::{Error, Result};
use std::io::Read;
use std::path::Path;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

/// Default per-operation timeout for git subprocesses.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Captured result of a successful git invocation.
#[derive(Debug, Clone, Default)]
pub struct GitOutput {
    /// First line of stdout; the remainder is discarded.
    pub first_line: String,
}

/// Trait for git invocations - allows mocking in tests
pub trait GitClient: Send + Sync {
    /// Run `git <args>` with `cwd` as its working directory.
    fn run(&self, args: &[&str], cwd: &Path) -> Result<GitOutput>;
}

/// The real client, shelling out to the system `git`.
///
/// Using the system command means SSH keys, credential helpers and anything
/// else configured in `~/.gitconfig` work without special handling.
#[derive(Debug, Clone)]
pub struct SystemGit {
    program: String,
    timeout: Duration,
}

impl SystemGit {
    pub fn new(timeout: Duration) -> Self {
        Self {
            program: "git".to_string(),
            timeout,
        }
    }

    /// Substitute the invoked program, for tests that need a controlled
    /// subprocess (e.g. one that never exits).
    #[cfg(test)]
    fn with_program(program: &str, timeout: Duration) -> Self {
        Self {
            program: program.to_string(),
            timeout,
        }
    }
}

impl Default for SystemGit {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

impl GitClient for SystemGit {
    fn run(&self, args: &[&str], cwd: &Path) -> Result<GitOutput> {
        let command = args.join(" ");

        let mut child = Command::new(&self.program)
            .args(args)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| Error::GitSpawn {
                command: command.clone(),
                message: e.to_string(),
            })?;

        // Drain both pipes on threads so a chatty subprocess can't block on
        // a full pipe while we poll for exit.
        let stdout_handle = child.stdout.take().map(reader_thread);
        let stderr_handle = child.stderr.take().map(reader_thread);

        let start = Instant::now();
        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) => {
                    if start.elapsed() > self.timeout {
                        let _ = child.kill();
                        let _ = child.wait();
                        return Err(Error::GitTimeout {
                            command,
                            dir: cwd.to_path_buf(),
                            seconds: self.timeout.as_secs(),
                        });
                    }
                    std::thread::sleep(POLL_INTERVAL);
                }
                Err(e) => {
                    return Err(Error::GitSpawn {
                        command,
                        message: e.to_string(),
                    });
                }
            }
        };

        let stdout = join_reader(stdout_handle);
        let stderr = join_reader(stderr_handle);

        if !status.success() {
            return Err(Error::GitCommand {
                command,
                dir: cwd.to_path_buf(),
                stderr: String::from_utf8_lossy(&stderr).trim().to_string(),
            });
        }

        let first_line = String::from_utf8_lossy(&stdout)
            .lines()
            .next()
            .unwrap_or_default()
            .to_string();
        Ok(GitOutput { first_line })
    }
}

fn reader_thread<R: Read + Send + 'static>(mut reader: R) -> std::thread::JoinHandle<Vec<u8>> {
    std::thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = reader.read_to_end(&mut buf);
        buf
    })
}

fn join_reader(handle: Option<std::thread::JoinHandle<Vec<u8>>>) -> Vec<u8> {
    handle
        .and_then(|h| h.join().ok())
        .unwrap_or_default()
}
