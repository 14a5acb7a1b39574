//! Error handling and exit codes.

use crate::support::*;
use predicates::prelude::*;

#[test]
fn test_missing_bucket_fails() {
    let t = Test::new();

    let output = t
        .cmd()
        .args(["load", "--bucket", "missing-bucket", "--prefix", PREFIX])
        .output()
        .unwrap();

    assert_failure(&output);
    assert_eq!(output.status.code(), Some(1));
    assert_stderr_contains(&output, "bucket \"missing-bucket\" not found");
    assert!(stdout(&output).is_empty());
}

#[test]
fn test_missing_prefix_fails() {
    let t = Test::new();

    let output = t.cmd().args(["load", "--bucket", BUCKET]).output().unwrap();

    assert_failure(&output);
    assert_stderr_contains(&output, "no key prefix");
}

#[test]
fn test_empty_prefix_counts_as_unset() {
    let t = Test::new();

    let output = t
        .cmd()
        .args(["load", "--bucket", BUCKET])
        .env("BUILDKITE_PLUGIN_S3_SECRETS_BUCKET_PREFIX", "")
        .output()
        .unwrap();

    assert_failure(&output);
    assert_stderr_contains(&output, "no key prefix");
}

#[test]
fn test_missing_bucket_argument_fails() {
    let t = Test::new();

    let output = t.cmd().args(["load", "--prefix", PREFIX]).output().unwrap();

    assert_failure(&output);
    assert_stderr_contains(&output, "--bucket");
}

#[test]
fn test_unknown_store_dir_reports_missing_bucket() {
    let t = Test::new();

    t.cmd()
        .args(["load", "--bucket", BUCKET, "--prefix", PREFIX])
        .env("BUCKET_SECRETS_STORE_DIR", t.scratch_file("does-not-exist"))
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("not found"))
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_help_lists_commands() {
    let t = Test::new();

    t.cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("load"))
        .stdout(predicate::str::contains("keys"))
        .stdout(predicate::str::contains("completions"));
}
