//! Child-process execution for lifecycle hook scripts.

use std::path::Path;
use std::process::{Command, Output};

use anyhow::Result;

use crate::error::HookError;

/// Result of a hook execution.
#[derive(Debug)]
pub struct ExecResult {
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
    /// Whether the process exited with status zero.
    pub success: bool,
    /// Exit code, if the process exited normally.
    pub code: Option<i32>,
}

impl From<Output> for ExecResult {
    fn from(output: Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
            code: output.status.code(),
        }
    }
}

/// Run a hook executable with a single positional argument and a scrubbed
/// environment.
///
/// The child process sees *only* the variables in `env` — nothing is
/// inherited from the caller, not even `PATH`.  Hook scripts that invoke
/// external programs must therefore use absolute paths.
///
/// # Errors
///
/// Returns [`HookError::Spawn`] if the process cannot be started and
/// [`HookError::Failed`] if it exits non-zero.
pub fn run_hook(
    executable: &Path,
    name: &str,
    arg: &Path,
    env: &[(&str, &Path)],
) -> Result<ExecResult> {
    let mut cmd = Command::new(executable);
    cmd.arg(arg).env_clear();
    for (key, value) in env {
        cmd.env(key, value);
    }

    tracing::debug!("running hook '{name}': {}", executable.display());

    let output = cmd.output().map_err(|source| HookError::Spawn {
        name: name.to_string(),
        source,
    })?;

    let result = ExecResult::from(output);
    if !result.success {
        return Err(HookError::Failed {
            name: name.to_string(),
            code: result.code.unwrap_or(-1),
            stderr: result.stderr.trim().to_string(),
        }
        .into());
    }
    Ok(result)
}
