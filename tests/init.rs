use assert_cmd::prelude::*;
use assert_fs::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[test]
fn test_init_creates_local_config() {
    let temp = assert_fs::TempDir::new().unwrap();

    Command::cargo_bin("prx")
        .unwrap()
        .arg("init")
        .arg("--local")
        .current_dir(&temp)
        .assert()
        .success()
        .stderr(predicate::str::contains("Created Repository config"));

    temp.child(".prx.toml").assert(predicate::path::exists());

    temp.close().unwrap();
}

#[test]
fn test_init_skip_existing_without_force() {
    let temp = assert_fs::TempDir::new().unwrap();
    let config = temp.child(".prx.toml");
    config.write_str("# existing content").unwrap();

    Command::cargo_bin("prx")
        .unwrap()
        .arg("init")
        .arg("--local")
        .current_dir(&temp)
        .assert()
        .success()
        .stderr(predicate::str::contains("already exists"))
        .stderr(predicate::str::contains("--force"));

    // Original content should be preserved
    config.assert("# existing content");

    temp.close().unwrap();
}

#[test]
fn test_init_force_overwrite() {
    let temp = assert_fs::TempDir::new().unwrap();
    let config = temp.child(".prx.toml");
    config.write_str("# existing content").unwrap();

    Command::cargo_bin("prx")
        .unwrap()
        .arg("init")
        .arg("--local")
        .arg("--force")
        .current_dir(&temp)
        .assert()
        .success()
        .stderr(predicate::str::contains("Created Repository config"));

    // Content should be replaced with template
    config.assert(predicate::str::contains("prx repository configuration"));

    temp.close().unwrap();
}

#[test]
fn test_init_global_respects_xdg_config_home() {
    let temp = assert_fs::TempDir::new().unwrap();

    Command::cargo_bin("prx")
        .unwrap()
        .arg("init")
        .arg("--global")
        .env("XDG_CONFIG_HOME", temp.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("Created Global config"));

    temp.child("prx/config.toml").assert(predicate::path::exists());

    temp.close().unwrap();
}

#[test]
fn test_help_lists_subcommands() {
    Command::cargo_bin("prx")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("create"))
        .stdout(predicate::str::contains("checkout-new"))
        .stdout(predicate::str::contains("setup"));
}
