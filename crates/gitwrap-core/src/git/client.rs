//! Repository client wrapping the git command line.

use std::path::{Path, PathBuf};

use chrono::{DateTime, FixedOffset};

use super::parse::{
    parse_commit_date, parse_commit_list, parse_remote_refs, qualified_ref, select_remote,
};
use crate::config::GitwrapConfig;
use crate::error::{GitError, Result};
use crate::exec::{CommandExecutor, SystemExecutor};

/// Executable invoked when no other program is configured.
pub const DEFAULT_PROGRAM: &str = "git";

/// Typed access to a single working copy through the git CLI.
///
/// Each operation spawns exactly one git process and waits for it. The
/// resolved remote name is cached on the client; operations that talk to
/// the remote resolve it on first use. A client is not meant to be shared
/// between threads without external locking.
#[derive(Debug)]
pub struct RepoClient<E = SystemExecutor> {
    working_dir: PathBuf,
    program: String,
    remote: Option<String>,
    executor: E,
}

impl RepoClient<SystemExecutor> {
    /// Create a client for `working_dir`. The remote is resolved lazily.
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        Self::with_executor(working_dir, SystemExecutor)
    }

    /// Create a client and resolve the remote immediately.
    ///
    /// Fails if `remote` is not given and no remote can be discovered.
    pub fn open(working_dir: impl Into<PathBuf>, remote: Option<&str>) -> Result<Self> {
        Self::open_with_executor(working_dir, remote, SystemExecutor)
    }

    /// Create a client from loaded configuration.
    pub fn from_config(config: &GitwrapConfig) -> Result<Self> {
        let working_dir = match &config.working_dir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir().map_err(|e| {
                GitError::Config(format!("could not determine working directory: {}", e))
            })?,
        };

        let mut client = Self::new(working_dir).with_program(config.program());
        if let Some(remote) = &config.remote {
            client = client.with_remote(remote);
        }
        if config.eager_remote() {
            client.remote()?;
        }
        Ok(client)
    }
}

impl<E: CommandExecutor> RepoClient<E> {
    /// Create a client that runs git through `executor`.
    pub fn with_executor(working_dir: impl Into<PathBuf>, executor: E) -> Self {
        Self {
            working_dir: working_dir.into(),
            program: DEFAULT_PROGRAM.to_string(),
            remote: None,
            executor,
        }
    }

    /// Eager variant of [`RepoClient::with_executor`].
    pub fn open_with_executor(
        working_dir: impl Into<PathBuf>,
        remote: Option<&str>,
        executor: E,
    ) -> Result<Self> {
        let mut client = Self::with_executor(working_dir, executor);
        if let Some(remote) = remote {
            client = client.with_remote(remote);
        }
        client.remote()?;
        Ok(client)
    }

    /// Use a known remote instead of discovering one. Blank names are ignored.
    pub fn with_remote(mut self, remote: impl Into<String>) -> Self {
        let remote = remote.into();
        let remote = remote.trim();
        if !remote.is_empty() {
            self.remote = Some(remote.to_string());
        }
        self
    }

    /// Invoke a different git executable.
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// The remote name if it has already been resolved or supplied.
    pub fn cached_remote(&self) -> Option<&str> {
        self.remote.as_deref()
    }

    /// Resolve the remote name, reusing the cached value when present.
    pub fn remote(&mut self) -> Result<String> {
        if let Some(remote) = &self.remote {
            return Ok(remote.clone());
        }
        self.refresh_remote()
    }

    /// Ask git for the remote again, replacing the cached value on success.
    ///
    /// With several remotes configured the last one listed is used.
    pub fn refresh_remote(&mut self) -> Result<String> {
        tracing::debug!("looking up git remote");
        let stdout = self
            .run("remote", &["remote"])
            .inspect_err(|_| tracing::error!("failed to lookup git remote"))?;

        let (remote, count) = stdout
            .as_deref()
            .and_then(select_remote)
            .ok_or_else(|| GitError::NotFound("failed to find a git remote".to_string()))?;

        if count > 1 {
            tracing::warn!(
                remote = %remote,
                count,
                "multiple remotes were found, using the last one set"
            );
        }

        self.remote = Some(remote.clone());
        Ok(remote)
    }

    /// Fetch from the remote.
    pub fn fetch(&mut self) -> Result<()> {
        let remote = self.remote()?;
        tracing::debug!(remote = %remote, "running git fetch");
        self.run("fetch", &["fetch", remote.as_str()])?;
        Ok(())
    }

    /// List reference names of one category (`heads`, `tags`, ...) on the remote.
    ///
    /// Names are returned in the order git prints them, without the
    /// `refs/<ref_type>/` prefix. Unparseable lines are skipped.
    pub fn list_remote_refs(&mut self, ref_type: &str) -> Result<Vec<String>> {
        let remote = self.remote()?;
        tracing::info!(ref_type, remote = %remote, "listing remote references");

        let flag = format!("--{}", ref_type);
        let stdout = self
            .run("ls-remote", &["ls-remote", flag.as_str(), remote.as_str()])
            .inspect_err(|_| tracing::warn!(remote = %remote, "failed to lookup from remote"))?;

        match stdout {
            Some(stdout) if !stdout.trim().is_empty() => Ok(parse_remote_refs(&stdout, ref_type)),
            _ => Err(GitError::NotFound(format!(
                "failed to find any {} against remote {}",
                ref_type, remote
            ))),
        }
    }

    /// List commit hashes, newest first, optionally restricted to `range`
    /// (anything `git log` accepts, e.g. `main..feature`).
    pub fn list_commits(&self, range: &[&str]) -> Result<Vec<String>> {
        tracing::debug!(?range, "looking up git commits");
        let mut args = vec!["log", r#"--pretty=format:"%H""#];
        args.extend_from_slice(range);

        let stdout = self
            .run("log", &args)
            .inspect_err(|_| tracing::warn!("failed to run git log"))?;

        Ok(stdout.as_deref().map(parse_commit_list).unwrap_or_default())
    }

    /// Name of the checked-out branch (`HEAD` when detached).
    ///
    /// `None` when git printed nothing.
    pub fn current_branch(&self) -> Result<Option<String>> {
        tracing::debug!("getting the current branch");
        let stdout = self
            .run("rev-parse", &["rev-parse", "--abbrev-ref", "HEAD"])
            .inspect_err(|_| tracing::warn!("failed to get the current git branch"))?;

        Ok(stdout.map(|s| s.trim().to_string()))
    }

    /// Most recent commit reachable from `reference`.
    pub fn last_commit_on_ref(&self, reference: &str) -> Result<String> {
        tracing::debug!(reference, remote = ?self.remote, "getting most recent commit for reference");
        let stdout = self
            .run("rev-list", &["rev-list", "-n", "1", reference])
            .inspect_err(|_| tracing::info!(reference, "failed to get commit for reference"))?;

        stdout
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                GitError::NotFound(format!("failed to get commit on reference {}", reference))
            })
    }

    /// Full message of the commit `hash`, without trailing blank lines.
    pub fn commit_message_body(&self, hash: &str) -> Result<Option<String>> {
        tracing::debug!(hash, "getting the commit message");
        let stdout = self
            .run("log", &["log", "--format=%B", "-n", "1", hash])
            .inspect_err(|_| tracing::warn!(hash, "failed to get the commit message"))?;

        Ok(stdout.map(|s| s.trim_end().to_string()))
    }

    /// Committer date of the commit `reference` points to.
    pub fn reference_date_time(&self, reference: &str) -> Result<DateTime<FixedOffset>> {
        tracing::debug!(reference, "getting the date time for reference");
        let stdout = self
            .run("log", &["log", "--format=%cd", "-n", "1", reference])
            .inspect_err(|_| tracing::warn!(reference, "failed to get the commit date time"))?;

        let stdout = stdout.ok_or_else(|| {
            GitError::NotFound(format!("failed to get a date time for {}", reference))
        })?;

        parse_commit_date(&stdout).inspect_err(|_| {
            tracing::warn!(reference, "date time came back in an unexpected format")
        })
    }

    /// Force-push `source` to the fully qualified `destination` on the remote.
    pub fn force_push(&mut self, source: &str, destination: &str) -> Result<()> {
        let remote = self.remote()?;
        tracing::debug!(source, destination, remote = %remote, "force pushing");

        let refspec = format!("{}:{}", source, destination);
        self.run("push", &["push", "-f", remote.as_str(), refspec.as_str()])
            .inspect_err(|_| {
                tracing::warn!(destination, remote = %remote, "failed to force push to git ref")
            })?;
        Ok(())
    }

    /// Force-push `source` to `refs/<ref_type>/<reference>` on the remote.
    pub fn force_push_to_ref(&mut self, source: &str, reference: &str, ref_type: &str) -> Result<()> {
        self.force_push(source, &qualified_ref(ref_type, reference))
    }

    /// Run git and return its stdout if it exited successfully.
    fn run(&self, operation: &'static str, args: &[&str]) -> Result<Option<String>> {
        let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
        let output = self
            .executor
            .run(&self.program, &args, &self.working_dir)
            .map_err(|source| GitError::Execution { operation, source })?;

        if !output.is_success() {
            return Err(GitError::NonZeroExit {
                operation,
                code: output.code,
                stderr: output.stderr.map(|s| s.trim().to_string()),
            });
        }

        Ok(output.stdout)
    }
}
