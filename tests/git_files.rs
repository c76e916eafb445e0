use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use ci_diff_helper::command::{MockCommandRunner, SystemRunner};
use ci_diff_helper::git::{checked_in_files, repository_root, Git, GitConfig};
use ci_diff_helper::Error;
use mockall::Sequence;

fn argv_is(argv: &[String], expected: &[&str]) -> bool {
    argv.iter().map(String::as_str).eq(expected.iter().copied())
}

fn has_git() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

#[test]
fn repository_root_runs_rev_parse() {
    let mut runner = MockCommandRunner::new();
    runner
        .expect_run()
        .withf(|argv| argv_is(argv, &["git", "rev-parse", "--show-toplevel"]))
        .times(1)
        .returning(|_| Ok("/a/b".to_string()));

    assert_eq!(repository_root(&runner).unwrap(), "/a/b");
}

#[test]
fn checked_in_files_joins_root_in_listing_order() {
    let mut seq = Sequence::new();
    let mut runner = MockCommandRunner::new();
    runner
        .expect_run()
        .withf(|argv| argv_is(argv, &["git", "rev-parse", "--show-toplevel"]))
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok("/a/b".to_string()));
    runner
        .expect_run()
        .withf(|argv| argv_is(argv, &["git", "ls-files", "--full-name", "/a/b"]))
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok("x.py\nsub/y.py\nMakefile\nd/e/f.py".to_string()));

    let files = checked_in_files(&runner).unwrap();
    assert_eq!(
        files,
        vec![
            PathBuf::from("/a/b/x.py"),
            PathBuf::from("/a/b/sub/y.py"),
            PathBuf::from("/a/b/Makefile"),
            PathBuf::from("/a/b/d/e/f.py"),
        ]
    );
}

#[test]
fn checked_in_files_empty_listing() {
    let mut runner = MockCommandRunner::new();
    runner
        .expect_run()
        .withf(|argv| argv_is(argv, &["git", "rev-parse", "--show-toplevel"]))
        .returning(|_| Ok("/repo".to_string()));
    runner
        .expect_run()
        .withf(|argv| argv_is(argv, &["git", "ls-files", "--full-name", "/repo"]))
        .returning(|_| Ok(String::new()));

    assert!(checked_in_files(&runner).unwrap().is_empty());
}

#[test]
fn root_failure_stops_before_listing() {
    let mut runner = MockCommandRunner::new();
    runner
        .expect_run()
        .times(1)
        .returning(|_| Err(Error::EmptyCommand));

    assert!(matches!(checked_in_files(&runner), Err(Error::EmptyCommand)));
}

#[test]
fn configured_program_is_used() {
    let mut runner = MockCommandRunner::new();
    runner
        .expect_run()
        .withf(|argv| argv_is(argv, &["/opt/git/bin/git", "rev-parse", "--show-toplevel"]))
        .times(1)
        .returning(|_| Ok("/srv/repo".to_string()));

    let config = GitConfig {
        program: "/opt/git/bin/git".to_string(),
    };
    let git = Git::new(&runner, &config);
    assert_eq!(git.repository_root().unwrap(), "/srv/repo");
}

fn git(dir: &Path, args: &[&str]) {
    let status = Command::new("git")
        .args(args)
        .current_dir(dir)
        .status()
        .expect("git runs");
    assert!(status.success(), "git {args:?} failed");
}

/// A temp repo with `a.txt` and `sub/b.txt` staged and `untracked.txt` left out.
fn scratch_repository() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    git(dir.path(), &["init", "--quiet"]);
    fs::write(dir.path().join("a.txt"), "a").unwrap();
    fs::create_dir(dir.path().join("sub")).unwrap();
    fs::write(dir.path().join("sub").join("b.txt"), "b").unwrap();
    fs::write(dir.path().join("untracked.txt"), "u").unwrap();
    git(dir.path(), &["add", "a.txt", "sub/b.txt"]);
    dir
}

#[test]
fn actual_repository() {
    if !has_git() {
        eprintln!("git not installed, skipping");
        return;
    }
    let dir = scratch_repository();

    let runner = SystemRunner::in_dir(dir.path());
    let root = repository_root(&runner).unwrap();
    assert_eq!(
        PathBuf::from(&root).canonicalize().unwrap(),
        dir.path().canonicalize().unwrap()
    );

    let files = checked_in_files(&runner).unwrap();
    let root = PathBuf::from(root);
    assert_eq!(files, vec![root.join("a.txt"), root.join("sub/b.txt")]);
    assert!(files.iter().all(|f| f.is_file()));
}

#[test]
fn actual_repository_from_subdirectory() {
    if !has_git() {
        eprintln!("git not installed, skipping");
        return;
    }
    let dir = scratch_repository();

    let runner = SystemRunner::in_dir(dir.path().join("sub"));
    let root = PathBuf::from(repository_root(&runner).unwrap());
    let files = checked_in_files(&runner).unwrap();

    assert_eq!(files, vec![root.join("a.txt"), root.join("sub/b.txt")]);
    assert!(files.iter().all(|f| f.is_file()), "{files:?}");
}
