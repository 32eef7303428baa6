use std::io;
use std::process::{Command, Stdio};
use std::thread;

use tracing::{debug, warn};

use crate::types::CommandResult;

use super::ProbeError;

pub(crate) fn run_command(
    program: &str,
    args: &[&str],
    envs: &[(&str, &str)],
) -> Result<CommandResult, ProbeError> {
    let output = Command::new(program)
        .args(args)
        .envs(envs.iter().copied())
        .stdin(Stdio::null())
        .output()
        .map_err(|source| ProbeError::Launch {
            program: program.to_string(),
            source,
        })?;

    Ok(CommandResult {
        code: output.status.code(),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    })
}

/// Runs a query command and returns its stdout, failing on a non-zero exit.
pub(crate) fn run_query(
    program: &str,
    args: &[&str],
    envs: &[(&str, &str)],
) -> Result<String, ProbeError> {
    let result = run_command(program, args, envs)?;
    if !result.success() {
        return Err(ProbeError::Failed {
            program: program.to_string(),
            code: result.code,
            stderr: result.stderr.trim().to_string(),
        });
    }
    Ok(result.stdout)
}

/// Starts `program` without waiting for it.
///
/// The child is handed to a reaper thread that waits on it, so the caller never
/// blocks and finished updaters do not linger as zombies.
pub(crate) fn spawn_detached(program: &str, args: &[&str]) -> io::Result<()> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .spawn()?;

    let name = program.to_string();
    let pid = child.id();
    debug!(program = %name, pid, "launched updater");

    thread::Builder::new()
        .name("updater-reaper".to_string())
        .spawn(move || match child.wait() {
            Ok(status) => debug!(program = %name, pid, %status, "updater exited"),
            Err(err) => warn!(program = %name, pid, "failed to reap updater: {}", err),
        })?;

    Ok(())
}
