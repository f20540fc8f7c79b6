use assert_cmd::Command;
use predicates::prelude::*;

fn bin() -> Command {
    Command::cargo_bin("yt-transcriber").unwrap()
}

#[test]
fn help_prints_usage_and_exits_zero() {
    bin()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--language"))
        .stdout(predicate::str::contains("Supadata"));
}

#[test]
fn short_help_works_too() {
    bin().arg("-h").assert().success();
}

#[test]
fn missing_api_key_is_fatal_with_instructions() {
    let dir = tempfile::tempdir().unwrap();
    bin()
        .current_dir(dir.path())
        .env_remove("SUPADATA_API_KEY")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("SUPADATA_API_KEY"))
        .stderr(predicate::str::contains(".env"));
}

#[test]
fn missing_csv_warns_but_exits_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    bin()
        .current_dir(dir.path())
        .env("SUPADATA_API_KEY", "test-key")
        .assert()
        .success()
        .stdout(predicate::str::contains("No URLs found"));
}

#[test]
fn stray_positional_arguments_are_ignored() {
    let dir = tempfile::tempdir().unwrap();
    bin()
        .current_dir(dir.path())
        .env("SUPADATA_API_KEY", "test-key")
        .args(["leftover", "args"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No URLs found"));
}

#[test]
fn fully_ledgered_csv_processes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    fs_err::write(
        dir.path().join("youtube_url.csv"),
        "abc123DEFgh,https://youtu.be/abc123DEFgh,Intro video\n",
    )
    .unwrap();
    fs_err::write(
        dir.path().join("youtube_url_completed.txt"),
        "https://youtu.be/abc123DEFgh\n",
    )
    .unwrap();

    bin()
        .current_dir(dir.path())
        .env("SUPADATA_API_KEY", "test-key")
        .assert()
        .success()
        .stdout(predicate::str::contains("already been processed"));
}
