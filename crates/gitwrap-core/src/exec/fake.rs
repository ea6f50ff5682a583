//! Scripted executor for tests.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use super::{CommandExecutor, CommandOutput};

/// A single invocation seen by [`FakeExecutor`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub program: String,
    pub args: Vec<String>,
    pub dir: PathBuf,
}

/// Returns queued responses in order and records every call.
///
/// When the queue runs dry the executor answers with a successful, silent
/// process so that tests only have to script the calls they care about.
#[derive(Debug, Default)]
pub struct FakeExecutor {
    responses: RefCell<VecDeque<std::io::Result<CommandOutput>>>,
    calls: RefCell<Vec<RecordedCall>>,
}

impl FakeExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response for the next call.
    pub fn respond(self, output: CommandOutput) -> Self {
        self.responses.borrow_mut().push_back(Ok(output));
        self
    }

    /// Queue a successful response with the given stdout.
    pub fn respond_stdout(self, stdout: impl Into<String>) -> Self {
        self.respond(CommandOutput::success(stdout))
    }

    /// Queue an execution failure for the next call.
    pub fn respond_io_error(self, kind: std::io::ErrorKind) -> Self {
        self.responses
            .borrow_mut()
            .push_back(Err(std::io::Error::new(kind, "scripted failure")));
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.borrow().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    /// Arguments of the call at `index`.
    pub fn args_of(&self, index: usize) -> Option<Vec<String>> {
        self.calls.borrow().get(index).map(|c| c.args.clone())
    }
}

impl CommandExecutor for FakeExecutor {
    fn run(&self, program: &str, args: &[String], dir: &Path) -> std::io::Result<CommandOutput> {
        self.calls.borrow_mut().push(RecordedCall {
            program: program.to_string(),
            args: args.to_vec(),
            dir: dir.to_path_buf(),
        });
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok(CommandOutput::empty()))
    }
}
