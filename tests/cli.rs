use assert_cmd::Command;
use predicates::str::contains;

fn cmd() -> Command {
    Command::cargo_bin("fate-coin").unwrap()
}

#[test]
fn help_lists_flags() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("--seed"))
        .stdout(contains("--mute"))
        .stdout(contains("--log-file"));
}

#[test]
fn rejects_out_of_range_fps() {
    cmd().args(["--fps", "0"]).assert().failure();
}
