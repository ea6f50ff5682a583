//! Executor backed by `std::process::Command`.

use std::path::Path;
use std::process::{Command, Stdio};

use super::{CommandExecutor, CommandOutput};

/// Spawns real processes and waits for them to finish.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemExecutor;

impl SystemExecutor {
    pub fn new() -> Self {
        Self
    }
}

impl CommandExecutor for SystemExecutor {
    fn run(&self, program: &str, args: &[String], dir: &Path) -> std::io::Result<CommandOutput> {
        tracing::debug!(program, ?args, dir = %dir.display(), "running command");

        let output = Command::new(program)
            .args(args)
            .current_dir(dir)
            .stdin(Stdio::null())
            .output()?;

        let stdout = non_empty(&output.stdout);
        let stderr = non_empty(&output.stderr);
        let code = output.status.code();

        if !output.status.success() {
            tracing::warn!(
                program,
                ?args,
                ?code,
                stderr = stderr.as_deref().map(str::trim).unwrap_or_default(),
                "command exited unsuccessfully"
            );
        }

        Ok(CommandOutput {
            stdout,
            stderr,
            code,
        })
    }
}

fn non_empty(bytes: &[u8]) -> Option<String> {
    if bytes.is_empty() {
        None
    } else {
        Some(String::from_utf8_lossy(bytes).into_owned())
    }
}
