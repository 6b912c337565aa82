use std::path::Path;
use std::time::Duration;

use tokio::process::Command;

use sweepr_core::error::SweeprError;

/// Timeout for `git remote get-url`.
pub const REMOTE_TIMEOUT: Duration = Duration::from_secs(5);
/// Timeout for `git status --porcelain`.
pub const STATUS_TIMEOUT: Duration = Duration::from_secs(5);
/// Timeout for the network-reaching `git fetch --dry-run` probe.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(10);
/// Timeout for the disk-usage measurement.
pub const SIZE_TIMEOUT: Duration = Duration::from_secs(10);
/// Timeout for `git push`.
pub const PUSH_TIMEOUT: Duration = Duration::from_secs(60);

/// Captured result of a subprocess execution.
#[derive(Debug)]
pub struct CmdOutput {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
}

/// Run a git command in `dir`, killing it if the timeout elapses.
///
/// A non-zero exit is not an error here; callers inspect `success`.
/// Errors mean the process could not be run at all (spawn failure or
/// timeout); there is exactly one execution attempt, never a retry.
pub async fn run_git(
    dir: &Path,
    args: &[&str],
    timeout: Duration,
) -> Result<CmdOutput, SweeprError> {
    run_command(dir, "git", args, timeout).await
}

async fn run_command(
    dir: &Path,
    program: &str,
    args: &[&str],
    timeout: Duration,
) -> Result<CmdOutput, SweeprError> {
    let output = Command::new(program)
        .args(args)
        .current_dir(dir)
        .stdin(std::process::Stdio::null())
        .kill_on_drop(true)
        .output();

    match tokio::time::timeout(timeout, output).await {
        Ok(Ok(output)) => Ok(CmdOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
        }),
        Ok(Err(e)) => Err(SweeprError::CommandFailed {
            message: format!("failed to run {program} {}: {e}", args.join(" ")),
        }),
        Err(_) => Err(SweeprError::CommandTimeout {
            command: format!("{program} {}", args.join(" ")),
            seconds: timeout.as_secs(),
        }),
    }
}

/// Measure the byte size of `dir`'s tree with the platform disk-usage tool.
pub async fn disk_usage(dir: &Path) -> Result<u64, SweeprError> {
    let out = run_du(dir).await?;
    if !out.success {
        return Err(SweeprError::CommandFailed {
            message: format!("disk usage measurement failed: {}", out.stderr.trim()),
        });
    }
    out.stdout
        .split_whitespace()
        .next()
        .and_then(|field| field.parse().ok())
        .ok_or_else(|| SweeprError::CommandFailed {
            message: format!("unparseable disk usage output: {}", out.stdout.trim()),
        })
}

#[cfg(not(windows))]
async fn run_du(dir: &Path) -> Result<CmdOutput, SweeprError> {
    run_command(dir, "du", &["-sb", "."], SIZE_TIMEOUT).await
}

#[cfg(windows)]
async fn run_du(dir: &Path) -> Result<CmdOutput, SweeprError> {
    let script = "(Get-ChildItem -Recurse -Force . | Measure-Object -Property Length -Sum).Sum";
    run_command(dir, "powershell", &["-NoProfile", "-Command", script], SIZE_TIMEOUT).await
}
