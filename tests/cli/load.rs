//! Tests for `bucket-secrets load`.

use crate::support::*;
use std::fs;

#[test]
fn test_load_writes_env_files_in_lookup_order() {
    let t = Test::with_objects(&[
        ("env", "SHARED=1"),
        ("my-pipeline/env", "PIPELINE=2\n"),
        ("my-pipeline/environment", "LAST=3\n"),
    ]);

    let output = t.load(HTTPS_REPO);
    assert_success(&output);
    assert_eq!(stdout(&output), "SHARED=1\nPIPELINE=2\nLAST=3\n");
}

#[test]
fn test_load_configures_credential_helpers() {
    let t = Test::with_objects(&[
        ("git-credentials", GIT_CREDENTIALS),
        ("my-pipeline/git-credentials", GIT_CREDENTIALS),
    ]);

    let output = t.load(HTTPS_REPO);
    assert_success(&output);
    let dir = t.store_dir().display();
    assert_eq!(
        stdout(&output),
        format!(
            "GIT_CONFIG_PARAMETERS='credential.helper=/opt/helper --store-dir {dir} secrets git-credentials' \
             'credential.helper=/opt/helper --store-dir {dir} secrets my-pipeline/git-credentials'\n"
        )
    );
}

#[test]
fn test_load_env_before_git_config() {
    let t = Test::with_objects(&[
        ("my-pipeline/git-credentials", GIT_CREDENTIALS),
        ("my-pipeline/env", "A=1\n"),
    ]);

    let output = t.load(HTTPS_REPO);
    assert_success(&output);
    let out = stdout(&output);
    let lines: Vec<_> = out.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], "A=1");
    assert!(lines[1].starts_with("GIT_CONFIG_PARAMETERS="));
}

#[test]
fn test_load_appends_to_env_file() {
    let t = Test::with_objects(&[("my-pipeline/env", "NEW=1\n")]);
    let env_file = t.scratch_file("job.env");
    fs::write(&env_file, "EXISTING=0\n").unwrap();

    let output = t
        .cmd()
        .args(["load", "--bucket", BUCKET, "--prefix", PREFIX, "--env-file"])
        .arg(&env_file)
        .output()
        .unwrap();

    assert_success(&output);
    assert!(stdout(&output).is_empty());
    assert_eq!(fs::read_to_string(&env_file).unwrap(), "EXISTING=0\nNEW=1\n");
}

#[test]
fn test_load_with_empty_bucket_succeeds_quietly() {
    let t = Test::new();

    let output = t.load(HTTPS_REPO);
    assert_success(&output);
    assert!(stdout(&output).is_empty());
    assert_stderr_excludes(&output, "failed to find an SSH key");
}

#[test]
fn test_ssh_repo_without_key_warns() {
    let t = Test::with_objects(&[("my-pipeline/env", "A=1\n")]);

    let output = t.load(SSH_REPO);
    assert_success(&output);
    assert_stderr_contains(&output, "failed to find an SSH key in secret bucket");
    assert_eq!(stdout(&output), "A=1\n");
}

#[test]
fn test_prefix_falls_back_to_pipeline_slug() {
    let t = Test::with_objects(&[("my-pipeline/env", "FROM_SLUG=1\n")]);

    let output = t
        .cmd()
        .args(["load", "--bucket", BUCKET])
        .env("BUILDKITE_PIPELINE_SLUG", PREFIX)
        .output()
        .unwrap();

    assert_success(&output);
    assert_eq!(stdout(&output), "FROM_SLUG=1\n");
}

#[test]
fn test_buildkite_environment_drives_load() {
    let t = Test::with_objects(&[("my-pipeline/environment", "CI=1\n")]);

    let output = t
        .cmd()
        .arg("load")
        .env("BUILDKITE_PLUGIN_S3_SECRETS_BUCKET", BUCKET)
        .env("BUILDKITE_PLUGIN_S3_SECRETS_BUCKET_PREFIX", PREFIX)
        .env("BUILDKITE_REPO", HTTPS_REPO)
        .output()
        .unwrap();

    assert_success(&output);
    assert_eq!(stdout(&output), "CI=1\n");
}
