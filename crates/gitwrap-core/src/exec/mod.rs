//! Process execution seam.
//!
//! The repository client never spawns processes directly; it goes through a
//! [`CommandExecutor`]. Production code uses [`SystemExecutor`], tests script
//! responses with `FakeExecutor`.

mod system;

#[cfg(any(test, feature = "test-support"))]
mod fake;

pub use system::SystemExecutor;

#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeExecutor, RecordedCall};

use std::path::Path;

/// Captured result of a finished process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Standard output, `None` when the process wrote nothing.
    pub stdout: Option<String>,
    /// Standard error, `None` when the process wrote nothing.
    pub stderr: Option<String>,
    /// Exit status, `None` when the process ended without one (signal).
    pub code: Option<i32>,
}

impl CommandOutput {
    /// Output of a process that exited with status 0.
    pub fn success(stdout: impl Into<String>) -> Self {
        let stdout = stdout.into();
        Self {
            stdout: (!stdout.is_empty()).then_some(stdout),
            stderr: None,
            code: Some(0),
        }
    }

    /// Output of a process that exited with status 0 and printed nothing.
    pub fn empty() -> Self {
        Self {
            stdout: None,
            stderr: None,
            code: Some(0),
        }
    }

    /// Output of a process that exited with the given non-zero status.
    pub fn failure(code: i32, stderr: impl Into<String>) -> Self {
        let stderr = stderr.into();
        Self {
            stdout: None,
            stderr: (!stderr.is_empty()).then_some(stderr),
            code: Some(code),
        }
    }

    pub fn with_stdout(mut self, stdout: impl Into<String>) -> Self {
        self.stdout = Some(stdout.into());
        self
    }

    pub fn is_success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Runs an external program synchronously.
///
/// An `Err` means the program could not be run at all. A process that ran
/// and failed is reported through [`CommandOutput::code`].
pub trait CommandExecutor {
    fn run(&self, program: &str, args: &[String], dir: &Path) -> std::io::Result<CommandOutput>;
}

impl<E: CommandExecutor + ?Sized> CommandExecutor for &E {
    fn run(&self, program: &str, args: &[String], dir: &Path) -> std::io::Result<CommandOutput> {
        (**self).run(program, args, dir)
    }
}

impl<E: CommandExecutor + ?Sized> CommandExecutor for Box<E> {
    fn run(&self, program: &str, args: &[String], dir: &Path) -> std::io::Result<CommandOutput> {
        (**self).run(program, args, dir)
    }
}
