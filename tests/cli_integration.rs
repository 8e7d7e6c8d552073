//! End-to-end CLI integration tests.
//!
//! These run the real binary but never reach a network: every case either
//! stops at argument parsing or fails fast on local state (missing
//! configuration, an empty address book). Commands run inside a temp
//! directory so a developer's `.env` or address book cannot leak in.

use assert_cmd::Command;
use predicates::prelude::*;
use soroban_deployer::keys::Keypair;

fn deploy_cmd(dir: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("soroban-deploy").unwrap();
    cmd.current_dir(dir)
        .env_remove("ADMIN_SECRET_KEY")
        .env_remove("SOROBAN_RPC_URL")
        .env_remove("SOROBAN_NETWORK_PASSPHRASE")
        .env_remove("SOROBAN_NETWORK")
        .env_remove("FRIENDBOT_URL")
        .env_remove("SOURCE_SECRET_KEY")
        .env_remove("ARTIFACT_DIR")
        .env_remove("ADDRESS_BOOK_DIR");
    cmd
}

#[test]
fn help_lists_every_command() {
    let dir = tempfile::tempdir().unwrap();
    deploy_cmd(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("install")
                .and(predicate::str::contains("deploy"))
                .and(predicate::str::contains("invoke"))
                .and(predicate::str::contains("bump-instance"))
                .and(predicate::str::contains("bump-code"))
                .and(predicate::str::contains("airdrop"))
                .and(predicate::str::contains("setup")),
        );
}

#[test]
fn version_flag_works() {
    let dir = tempfile::tempdir().unwrap();
    deploy_cmd(dir.path()).arg("--version").assert().success();
}

#[test]
fn unknown_subcommand_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    deploy_cmd(dir.path()).arg("teleport").assert().failure();
}

#[test]
fn install_requires_admin_secret() {
    let dir = tempfile::tempdir().unwrap();
    deploy_cmd(dir.path())
        .args(["install", "--contract", "factory"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("ADMIN_SECRET_KEY"));
}

#[test]
fn invoke_rejects_malformed_args_before_anything_else() {
    let dir = tempfile::tempdir().unwrap();
    // No admin secret in the environment: argument validation must come
    // first and still produce the parse error.
    deploy_cmd(dir.path())
        .args([
            "invoke",
            "--contract",
            "router",
            "--method",
            "swap",
            "--args",
            "{not json",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid JSON"));
}

#[test]
fn deploy_fails_fast_when_nothing_is_installed() {
    let dir = tempfile::tempdir().unwrap();
    let secret = Keypair::random().secret_key();
    deploy_cmd(dir.path())
        .env("ADMIN_SECRET_KEY", &secret)
        .args(["deploy", "--contract", "factory"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no wasm hash recorded"));
}

#[test]
fn bump_code_fails_fast_when_nothing_is_installed() {
    let dir = tempfile::tempdir().unwrap();
    let secret = Keypair::random().secret_key();
    deploy_cmd(dir.path())
        .env("ADMIN_SECRET_KEY", &secret)
        .args(["bump-code", "--wasm", "router"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no wasm hash recorded"));
}

#[test]
fn mainnet_without_rpc_url_is_a_configuration_error() {
    let dir = tempfile::tempdir().unwrap();
    let secret = Keypair::random().secret_key();
    deploy_cmd(dir.path())
        .env("ADMIN_SECRET_KEY", &secret)
        .args(["--network", "mainnet", "install", "--contract", "factory"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("SOROBAN_RPC_URL"));
}

#[test]
fn install_rejects_unknown_contract_keys() {
    let dir = tempfile::tempdir().unwrap();
    let secret = Keypair::random().secret_key();
    deploy_cmd(dir.path())
        .env("ADMIN_SECRET_KEY", &secret)
        .args(["install", "--contract", "oracle"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown contract key"));
}
