use assert_cmd::Command;
use predicates::str::contains;

#[test]
fn taskdesk_help_works() {
    Command::cargo_bin("taskdesk")
        .expect("binary")
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("task tracker"));
}

#[test]
fn missing_user_file_fails_startup_on_variant_b() {
    let dir = tempfile::TempDir::new().expect("tempdir");
    std::fs::write(
        dir.path().join("taskdesk.toml"),
        "[auth]\nvariant = \"b\"\n",
    )
    .expect("write config");

    Command::cargo_bin("taskdesk")
        .expect("binary")
        .arg("--data-dir")
        .arg(dir.path())
        .assert()
        .failure();
}
