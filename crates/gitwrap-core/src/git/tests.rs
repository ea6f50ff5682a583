//! Tests for the git module.

use super::*;
use crate::error::GitError;
use crate::exec::{CommandOutput, FakeExecutor};
use std::io::ErrorKind;
use std::path::Path;

fn client(fake: FakeExecutor) -> RepoClient<FakeExecutor> {
    RepoClient::with_executor("/work/repo", fake)
}

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

mod remote_tests {
    use super::*;

    #[test]
    fn resolves_single_remote() {
        let mut git = client(FakeExecutor::new().respond_stdout("origin\n"));

        assert_eq!(git.remote().unwrap(), "origin");
        assert_eq!(git.cached_remote(), Some("origin"));

        let calls = git.executor().calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].program, "git");
        assert_eq!(calls[0].args, args(&["remote"]));
        assert_eq!(calls[0].dir, Path::new("/work/repo"));
    }

    #[test]
    fn last_remote_wins() {
        let mut git = client(FakeExecutor::new().respond_stdout("origin\nupstream\nmirror\n"));
        assert_eq!(git.remote().unwrap(), "mirror");
    }

    #[test]
    fn remote_is_cached() {
        let mut git = client(FakeExecutor::new().respond_stdout("origin\n"));

        assert_eq!(git.remote().unwrap(), "origin");
        assert_eq!(git.remote().unwrap(), "origin");
        assert_eq!(git.executor().call_count(), 1);
    }

    #[test]
    fn supplied_remote_skips_lookup() {
        let mut git = client(FakeExecutor::new()).with_remote("upstream");
        assert_eq!(git.remote().unwrap(), "upstream");
        assert_eq!(git.executor().call_count(), 0);
    }

    #[test]
    fn blank_supplied_remote_is_ignored() {
        let mut git = client(FakeExecutor::new().respond_stdout("origin\n")).with_remote("  ");
        assert_eq!(git.cached_remote(), None);
        assert_eq!(git.remote().unwrap(), "origin");
    }

    #[test]
    fn refresh_replaces_cached_remote() {
        let mut git = client(
            FakeExecutor::new()
                .respond_stdout("origin\n")
                .respond_stdout("origin\nfork\n"),
        );

        assert_eq!(git.remote().unwrap(), "origin");
        assert_eq!(git.refresh_remote().unwrap(), "fork");
        assert_eq!(git.cached_remote(), Some("fork"));
        assert_eq!(git.executor().call_count(), 2);
    }

    #[test]
    fn failed_refresh_keeps_previous_remote() {
        let mut git = client(
            FakeExecutor::new()
                .respond_stdout("origin\n")
                .respond(CommandOutput::failure(1, "fatal")),
        );

        git.remote().unwrap();
        assert!(git.refresh_remote().is_err());
        assert_eq!(git.cached_remote(), Some("origin"));
    }

    #[test]
    fn no_remote_is_not_found() {
        let mut git = client(FakeExecutor::new().respond(CommandOutput::empty()));
        let err = git.remote().unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(git.cached_remote(), None);
    }

    #[test]
    fn whitespace_only_output_is_not_found() {
        let mut git = client(FakeExecutor::new().respond_stdout("\n  \n"));
        assert!(git.remote().unwrap_err().is_not_found());
    }

    #[test]
    fn missing_executable_is_execution_error() {
        let mut git = client(FakeExecutor::new().respond_io_error(ErrorKind::NotFound));
        let err = git.remote().unwrap_err();
        assert!(matches!(err, GitError::Execution { operation: "remote", .. }));
    }

    #[test]
    fn non_zero_exit_wins_over_output() {
        let mut git = client(
            FakeExecutor::new().respond(CommandOutput::failure(128, "fatal").with_stdout("origin\n")),
        );
        let err = git.remote().unwrap_err();
        assert!(matches!(err, GitError::NonZeroExit { operation: "remote", .. }));
        assert_eq!(err.exit_code(), Some(128));
    }

    #[test]
    fn eager_open_resolves_remote() {
        let git =
            RepoClient::open_with_executor("/r", None, FakeExecutor::new().respond_stdout("origin\n"))
                .unwrap();
        assert_eq!(git.cached_remote(), Some("origin"));
    }

    #[test]
    fn eager_open_fails_without_remote() {
        let result = RepoClient::open_with_executor("/r", None, FakeExecutor::new());
        assert!(result.unwrap_err().is_not_found());
    }

    #[test]
    fn eager_open_with_known_remote_runs_nothing() {
        let fake = FakeExecutor::new();
        let git = RepoClient::open_with_executor("/r", Some("origin"), &fake).unwrap();
        assert_eq!(git.cached_remote(), Some("origin"));
        assert_eq!(fake.call_count(), 0);
    }
}

mod fetch_tests {
    use super::*;

    #[test]
    fn fetches_cached_remote() {
        let mut git = client(FakeExecutor::new()).with_remote("origin");
        git.fetch().unwrap();
        assert_eq!(git.executor().args_of(0), Some(args(&["fetch", "origin"])));
    }

    #[test]
    fn resolves_remote_before_fetching() {
        let mut git = client(FakeExecutor::new().respond_stdout("upstream\n"));
        git.fetch().unwrap();
        assert_eq!(git.executor().args_of(0), Some(args(&["remote"])));
        assert_eq!(git.executor().args_of(1), Some(args(&["fetch", "upstream"])));
    }

    #[test]
    fn fetch_failure_is_non_zero_exit() {
        let mut git =
            client(FakeExecutor::new().respond(CommandOutput::failure(1, ""))).with_remote("origin");
        let err = git.fetch().unwrap_err();
        assert_eq!(err.to_string(), "git fetch command returned a non zero code");
    }
}

mod remote_refs_tests {
    use super::*;

    #[test]
    fn lists_heads_skipping_malformed_lines() {
        let mut git = client(
            FakeExecutor::new().respond_stdout("refs/heads/main\nrefs/heads/dev\nmalformed-line\n"),
        )
        .with_remote("origin");

        let refs = git.list_remote_refs("heads").unwrap();
        assert_eq!(refs, vec!["main", "dev"]);
        assert_eq!(
            git.executor().args_of(0),
            Some(args(&["ls-remote", "--heads", "origin"]))
        );
    }

    #[test]
    fn lists_tags_with_ref_kind() {
        let mut git = client(
            FakeExecutor::new().respond_stdout("abc\trefs/tags/v1.0.0\ndef\trefs/tags/v1.1.0\n"),
        )
        .with_remote("origin");

        let refs = git.list_remote_refs(RefKind::Tags.as_str()).unwrap();
        assert_eq!(refs, vec!["v1.0.0", "v1.1.0"]);
        assert_eq!(
            git.executor().args_of(0),
            Some(args(&["ls-remote", "--tags", "origin"]))
        );
    }

    #[test]
    fn empty_listing_is_not_found() {
        let mut git = client(FakeExecutor::new()).with_remote("origin");
        let err = git.list_remote_refs("heads").unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().contains("origin"));
    }

    #[test]
    fn ls_remote_failure() {
        let mut git = client(FakeExecutor::new().respond(CommandOutput::failure(2, "")))
            .with_remote("origin");
        let err = git.list_remote_refs("heads").unwrap_err();
        assert_eq!(err.operation(), Some("ls-remote"));
    }
}

mod commit_tests {
    use super::*;

    #[test]
    fn lists_commits_without_range() {
        let git = client(FakeExecutor::new().respond_stdout("\"abc123\"\n\"\"\n\"def456\"\n"));

        let commits = git.list_commits(&[]).unwrap();
        assert_eq!(commits, vec!["abc123", "def456"]);
        assert_eq!(
            git.executor().args_of(0),
            Some(args(&["log", "--pretty=format:\"%H\""]))
        );
    }

    #[test]
    fn passes_range_through() {
        let git = client(FakeExecutor::new().respond_stdout("\"abc\""));

        git.list_commits(&["main..feature", "--", "src"]).unwrap();
        assert_eq!(
            git.executor().args_of(0),
            Some(args(&["log", "--pretty=format:\"%H\"", "main..feature", "--", "src"]))
        );
    }

    #[test]
    fn no_output_is_empty_list() {
        let git = client(FakeExecutor::new());
        assert_eq!(git.list_commits(&[]).unwrap(), Vec::<String>::new());
    }

    #[test]
    fn listing_does_not_need_a_remote() {
        let git = client(FakeExecutor::new().respond_stdout("\"abc\"\n"));
        git.list_commits(&[]).unwrap();
        assert_eq!(git.executor().call_count(), 1);
        assert_eq!(git.cached_remote(), None);
    }

    #[test]
    fn log_failure() {
        let git = client(FakeExecutor::new().respond(CommandOutput::failure(128, "bad range")));
        let err = git.list_commits(&["nope"]).unwrap_err();
        match err {
            GitError::NonZeroExit {
                operation, stderr, ..
            } => {
                assert_eq!(operation, "log");
                assert_eq!(stderr.as_deref(), Some("bad range"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn last_commit_is_trimmed() {
        let git = client(FakeExecutor::new().respond_stdout("0123abcd\n"));
        assert_eq!(git.last_commit_on_ref("main").unwrap(), "0123abcd");
        assert_eq!(
            git.executor().args_of(0),
            Some(args(&["rev-list", "-n", "1", "main"]))
        );
    }

    #[test]
    fn last_commit_without_output_is_not_found() {
        let git = client(FakeExecutor::new());
        assert!(git.last_commit_on_ref("main").unwrap_err().is_not_found());
    }

    #[test]
    fn message_body_trims_trailing_newlines() {
        let git = client(FakeExecutor::new().respond_stdout("Subject\n\nBody line\n\n"));
        assert_eq!(
            git.commit_message_body("abc").unwrap().as_deref(),
            Some("Subject\n\nBody line")
        );
        assert_eq!(
            git.executor().args_of(0),
            Some(args(&["log", "--format=%B", "-n", "1", "abc"]))
        );
    }

    #[test]
    fn message_body_absent() {
        let git = client(FakeExecutor::new());
        assert_eq!(git.commit_message_body("abc").unwrap(), None);
    }
}

mod branch_tests {
    use super::*;

    #[test]
    fn current_branch() {
        let git = client(FakeExecutor::new().respond_stdout("feature/x\n"));
        assert_eq!(git.current_branch().unwrap().as_deref(), Some("feature/x"));
        assert_eq!(
            git.executor().args_of(0),
            Some(args(&["rev-parse", "--abbrev-ref", "HEAD"]))
        );
    }

    #[test]
    fn current_branch_failure() {
        let git = client(FakeExecutor::new().respond(CommandOutput::failure(128, "not a repo")));
        let err = git.current_branch().unwrap_err();
        assert_eq!(err.operation(), Some("rev-parse"));
    }
}

mod date_tests {
    use super::*;

    #[test]
    fn parses_reference_date() {
        let git = client(FakeExecutor::new().respond_stdout("Mon Jan 2 15:04:05 2021 +0000\n"));
        let dt = git.reference_date_time("v1.0").unwrap();
        assert_eq!(dt.to_rfc3339(), "2021-01-02T15:04:05+00:00");
        assert_eq!(
            git.executor().args_of(0),
            Some(args(&["log", "--format=%cd", "-n", "1", "v1.0"]))
        );
    }

    #[test]
    fn unparseable_date_is_parse_error() {
        let git = client(FakeExecutor::new().respond_stdout("not-a-date\n"));
        assert!(matches!(
            git.reference_date_time("main").unwrap_err(),
            GitError::Parse { .. }
        ));
    }

    #[test]
    fn missing_date_is_not_found() {
        let git = client(FakeExecutor::new());
        assert!(git.reference_date_time("main").unwrap_err().is_not_found());
    }
}

mod push_tests {
    use super::*;

    #[test]
    fn force_push_uses_refspec() {
        let mut git = client(FakeExecutor::new()).with_remote("origin");
        git.force_push("abc123", "refs/heads/release").unwrap();
        assert_eq!(
            git.executor().args_of(0),
            Some(args(&["push", "-f", "origin", "abc123:refs/heads/release"]))
        );
    }

    #[test]
    fn force_push_to_ref_qualifies_destination() {
        let mut git = client(FakeExecutor::new()).with_remote("origin");
        git.force_push_to_ref("abc123", "v2", "tags").unwrap();
        assert_eq!(
            git.executor().args_of(0),
            Some(args(&["push", "-f", "origin", "abc123:refs/tags/v2"]))
        );
    }

    #[test]
    fn rejected_push() {
        let mut git = client(FakeExecutor::new().respond(CommandOutput::failure(1, "rejected")))
            .with_remote("origin");
        let err = git.force_push("HEAD", "refs/heads/main").unwrap_err();
        assert_eq!(err.to_string(), "git push command returned a non zero code");
    }

    #[test]
    fn custom_program_is_invoked() {
        let mut git = client(FakeExecutor::new())
            .with_remote("origin")
            .with_program("/opt/git/bin/git");
        git.force_push("HEAD", "refs/heads/main").unwrap();
        assert_eq!(git.executor().calls()[0].program, "/opt/git/bin/git");
    }
}

mod status_tests {
    use super::*;

    type Operation = fn(&mut RepoClient<FakeExecutor>) -> std::result::Result<(), GitError>;

    /// Each operation with its git subcommand and stdout it would accept.
    fn operations() -> [(&'static str, &'static str, Operation); 9] {
        [
            ("remote", "origin\n", |git| git.refresh_remote().map(drop)),
            ("fetch", "Already up to date.\n", |git| git.fetch()),
            ("ls-remote", "abc123\trefs/heads/main\n", |git| {
                git.list_remote_refs("heads").map(drop)
            }),
            ("log", "\"abc123\"\n", |git| git.list_commits(&[]).map(drop)),
            ("rev-parse", "main\n", |git| git.current_branch().map(drop)),
            ("rev-list", "abc123\n", |git| {
                git.last_commit_on_ref("main").map(drop)
            }),
            ("log", "Subject\n\nBody\n", |git| {
                git.commit_message_body("abc123").map(drop)
            }),
            ("log", "Mon Jan 2 15:04:05 2021 +0000\n", |git| {
                git.reference_date_time("main").map(drop)
            }),
            ("push", "Everything up-to-date\n", |git| {
                git.force_push("HEAD", "refs/heads/main")
            }),
        ]
    }

    #[test]
    fn failing_status_wins_over_valid_stdout() {
        for (operation, stdout, call) in operations() {
            let fake = FakeExecutor::new()
                .respond(CommandOutput::failure(1, "x").with_stdout(stdout));
            let mut git = client(fake).with_remote("origin");

            let err = call(&mut git).unwrap_err();
            assert!(
                matches!(err, GitError::NonZeroExit { code: Some(1), .. }),
                "{operation}: {err:?}"
            );
            assert_eq!(err.operation(), Some(operation));
            assert_eq!(
                err.to_string(),
                format!("git {operation} command returned a non zero code")
            );
            assert_eq!(git.executor().call_count(), 1, "{operation}");
        }
    }

    #[test]
    fn spawn_failure_is_an_execution_error() {
        for (operation, _, call) in operations() {
            let fake = FakeExecutor::new().respond_io_error(ErrorKind::NotFound);
            let mut git = client(fake).with_remote("origin");

            let err = call(&mut git).unwrap_err();
            assert!(matches!(err, GitError::Execution { .. }), "{operation}: {err:?}");
            assert_eq!(err.operation(), Some(operation));
            assert_eq!(git.executor().call_count(), 1, "{operation}");
        }
    }
}
