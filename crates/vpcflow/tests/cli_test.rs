#![allow(deprecated)] // TODO: cargo_bin → cargo_bin_cmd! へ移行

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

fn vpcflow() -> Command {
    let mut cmd = Command::cargo_bin("vpcflow").unwrap();
    // 実行環境のトークンや設定ファイルを拾わない
    cmd.env_remove("SEL_TOKEN")
        .env_remove("SEL_URL")
        .env_remove("VPCFLOW_LICENSES_PATH");
    cmd
}

/// CLIヘルプが正しく表示されることを確認
#[test]
fn test_cli_help() {
    vpcflow()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Selectel VPC"))
        .stdout(predicate::str::contains("apply"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("delete"));
}

/// バージョン表示が正しく動作することを確認
#[test]
fn test_cli_version() {
    vpcflow()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("vpcflow"));
}

/// applyコマンドのヘルプが正しく表示されることを確認
#[test]
fn test_apply_help() {
    vpcflow()
        .arg("apply")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--project-name"))
        .stdout(predicate::str::contains("--force"))
        .stdout(predicate::str::contains("--check"));
}

/// 存在しないコマンドはエラー
#[test]
fn test_invalid_command() {
    vpcflow()
        .arg("invalid-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

/// トークンがなければ API を呼ばずに失敗する
#[test]
fn test_list_without_token() {
    vpcflow()
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No token given"));
}

/// --project-id と --project-name は同時に指定できない
#[test]
fn test_apply_project_flags_conflict() {
    vpcflow()
        .args(["apply", "--project-id", "p1", "--project-name", "staging"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

/// 負の数量は API を呼ぶ前に拒否される
#[test]
fn test_apply_negative_quantity() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("licenses.yaml");
    fs::write(
        &path,
        "project_id: p1\nlicenses:\n  - {region: ru-1, quantity: -1, type: office}\n",
    )
    .unwrap();

    vpcflow()
        .args(["--token", "t", "--url", "http://127.0.0.1:9"])
        .arg("apply")
        .arg("-f")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid quantity -1"));
}

/// licenses のないファイルは apply できない
#[test]
fn test_apply_file_without_licenses() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("licenses.yaml");
    fs::write(&path, "project_id: p1\n").unwrap();

    vpcflow()
        .args(["--token", "t"])
        .arg("apply")
        .arg("-f")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("licenses"));
}

/// パラメータが足りない場合は JSON で失敗が返る
#[test]
fn test_run_missing_params_json() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("params.json");
    fs::write(&path, "{}").unwrap();

    vpcflow()
        .args(["--format", "json", "--token", "t", "--url", "http://127.0.0.1:9"])
        .arg("run")
        .arg(&path)
        .assert()
        .failure()
        .stdout(predicate::str::contains(r#""failed":true"#))
        .stdout(predicate::str::contains("No params for 'licenses' operations."));
}

/// 壊れたファイルはパースエラー
#[test]
fn test_run_invalid_state() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("params.yaml");
    fs::write(&path, "state: gone\n").unwrap();

    vpcflow()
        .args(["--token", "t"])
        .arg("run")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse"));
}
