//! Gitwrap - typed git operations from the command line
//!
//! Usage:
//!   gitwrap remote                  # Show the remote in use
//!   gitwrap refs heads              # List branches on the remote
//!   gitwrap commits main..feature   # List commit hashes
//!   gitwrap push HEAD main --ref-type heads

mod output;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dialoguer::{Confirm, theme::ColorfulTheme};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gitwrap_core::config::{self, ConfigStore, GitwrapConfig};
use gitwrap_core::git::{RepoClient, qualified_ref};

use crate::output::{OutputFormat, Printer};

#[derive(Parser)]
#[command(name = "gitwrap")]
#[command(about = "Typed git operations", long_about = None)]
struct Cli {
    /// Run as if started in this directory
    #[arg(short = 'C', long = "dir", global = true, value_name = "PATH")]
    dir: Option<PathBuf>,

    /// Use this remote instead of discovering one
    #[arg(long, global = true)]
    remote: Option<String>,

    /// Load configuration from this file only
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short = 'o', long, global = true, default_value = "table")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the remote operations run against
    Remote {
        /// Ask git again instead of using the configured remote
        #[arg(long)]
        refresh: bool,
    },

    /// Fetch from the remote
    Fetch,

    /// List references of one category on the remote
    Refs {
        /// Reference category (heads, tags, ...)
        ref_type: String,
    },

    /// List commit hashes, newest first
    Commits {
        /// Revision range and other arguments passed to git log
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        range: Vec<String>,
    },

    /// Show the checked-out branch
    Branch,

    /// Show the most recent commit on a reference
    LastCommit {
        /// Branch, tag or any revision
        reference: String,
    },

    /// Show the full message of a commit
    Message {
        /// Commit hash or revision
        hash: String,
    },

    /// Show the committer date of a reference
    Date {
        /// Branch, tag or any revision
        reference: String,
    },

    /// Force-push a local revision to a remote reference
    Push {
        /// Local revision to push
        source: String,
        /// Destination reference (fully qualified unless --ref-type is given)
        destination: String,
        /// Category to qualify the destination with (heads, tags, ...)
        #[arg(long, short = 't')]
        ref_type: Option<String>,
        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Print the effective configuration
    Config,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gitwrap=info,gitwrap_core=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    let printer = Printer::new(cli.format);

    run_cli(cli.command, &config, &printer)
}

/// Merge config files with command-line overrides.
fn load_config(cli: &Cli) -> Result<GitwrapConfig> {
    let working_dir = match &cli.dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().context("Failed to determine current directory")?,
    };

    let mut store = ConfigStore::from_paths(config::default_global_dir(), working_dir.clone());
    if let Some(path) = &cli.config {
        store = store.with_explicit_path(path);
    }

    let overrides = GitwrapConfig {
        working_dir: cli.dir.clone(),
        remote: cli.remote.clone(),
        ..GitwrapConfig::default()
    };
    let config = store.load()?.merge(overrides);
    config.validate()?;
    tracing::debug!(?config, "effective configuration");

    Ok(GitwrapConfig {
        working_dir: config.working_dir.or(Some(working_dir)),
        ..config
    })
}

fn run_cli(command: Commands, config: &GitwrapConfig, printer: &Printer) -> Result<()> {
    let open = || RepoClient::from_config(config);

    match command {
        Commands::Remote { refresh } => {
            let mut git = open()?;
            let remote = if refresh {
                git.refresh_remote()?
            } else {
                git.remote()?
            };
            printer.value("remote", &remote)?;
        }
        Commands::Fetch => {
            let mut git = open()?;
            git.fetch()?;
            printer.done(&format!("Fetched from '{}'", git.remote()?))?;
        }
        Commands::Refs { ref_type } => {
            let mut git = open()?;
            let refs = git.list_remote_refs(&ref_type)?;
            printer.list(&ref_type, &refs)?;
        }
        Commands::Commits { range } => {
            let git = open()?;
            let range: Vec<&str> = range.iter().map(String::as_str).collect();
            let commits = git.list_commits(&range)?;
            printer.list("commits", &commits)?;
        }
        Commands::Branch => {
            let git = open()?;
            let branch = git.current_branch()?;
            printer.optional("branch", branch.as_deref())?;
        }
        Commands::LastCommit { reference } => {
            let git = open()?;
            let commit = git.last_commit_on_ref(&reference)?;
            printer.value("commit", &commit)?;
        }
        Commands::Message { hash } => {
            let git = open()?;
            let message = git.commit_message_body(&hash)?;
            printer.optional("message", message.as_deref())?;
        }
        Commands::Date { reference } => {
            let git = open()?;
            let date = git.reference_date_time(&reference)?;
            printer.date(&reference, &date)?;
        }
        Commands::Push {
            source,
            destination,
            ref_type,
            yes,
        } => {
            let mut git = open()?;
            let destination = match &ref_type {
                Some(ref_type) => qualified_ref(ref_type, &destination),
                None => destination,
            };
            let remote = git.remote()?;

            if !yes && !confirm_push(&source, &destination, &remote)? {
                printer.done("Push cancelled")?;
                return Ok(());
            }

            git.force_push(&source, &destination)?;
            printer.done(&format!(
                "Force-pushed {} to {} on '{}'",
                source, destination, remote
            ))?;
        }
        Commands::Config => printer.config(config)?,
    }

    Ok(())
}

fn confirm_push(source: &str, destination: &str, remote: &str) -> Result<bool> {
    let confirmed = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(format!(
            "Overwrite {} on '{}' with {}?",
            destination, remote, source
        ))
        .default(false)
        .interact()?;
    Ok(confirmed)
}
