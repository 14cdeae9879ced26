//! Subprocess execution primitive.
//!
//! Runs one synthesized compiler command through the shell, capturing stdout
//! and stderr combined so diagnostics come back in emission order.

use std::process::Command;

use crate::error::DriverError;

/// Captured result of one child process run.
#[derive(Debug)]
pub struct CmdOutput {
    /// Combined stdout and stderr of the child.
    pub output: String,
    /// Child exit code; becomes the driver's own exit code.
    pub exit_code: i32,
}

/// Runs a command line through `sh`, blocking until the child terminates.
pub fn run_shell(cmd: &str) -> Result<CmdOutput, DriverError> {
    let out = Command::new("sh")
        .arg("-c")
        .arg(format!("({}) 2>&1", cmd))
        .output()?;

    Ok(CmdOutput {
        output: String::from_utf8_lossy(&out.stdout).into_owned(),
        // signal-terminated children carry no code
        exit_code: out.status.code().unwrap_or(1),
    })
}
