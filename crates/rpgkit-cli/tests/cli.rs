//! Integration tests for the rpgkit binary.

use assert_cmd::Command;
use predicates::prelude::*;
use rpgkit_config::alias::{BUFFER_POLYFILL, NODE_POLYFILLS};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn project() -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("package.json"),
        r#"{"name":"demo","dependencies":{"@rpgjs/client":"^4.0.0","@rpgjs/foo-plugin":"^1.0.0","lodash":"^4.17.0"}}"#,
    )
    .unwrap();
    fs::write(temp.path().join("rpg.toml"), "name = \"Demo\"\n").unwrap();
    fs::write(temp.path().join("index.html"), "<!doctype html>").unwrap();
    temp
}

/// Minimal `rollup-plugin-node-polyfills` install so client aliases resolve
fn install_polyfills(dir: &Path) {
    let package = dir.join("node_modules/rollup-plugin-node-polyfills");
    fs::create_dir_all(&package).unwrap();
    fs::write(
        package.join("package.json"),
        r#"{"name":"rollup-plugin-node-polyfills","version":"0.2.1"}"#,
    )
    .unwrap();

    for (_, polyfill) in NODE_POLYFILLS.iter().chain([&BUFFER_POLYFILL]) {
        let file = package.join("polyfills").join(format!("{polyfill}.js"));
        fs::create_dir_all(file.parent().unwrap()).unwrap();
        fs::write(file, "export default {};\n").unwrap();
    }
}

fn rpgkit() -> Command {
    let mut cmd = Command::cargo_bin("rpgkit").unwrap();
    cmd.env_remove("RPG_TYPE")
        .env_remove("VITE_SERVER_URL")
        .env_remove("RPGKIT_SIDE")
        .env_remove("RPGKIT_MODE")
        .env_remove("RPGKIT_TYPE")
        .env_remove("RPGKIT_SERVE_MODE")
        .env("NO_COLOR", "1");
    cmd
}

fn stdout_json(output: &[u8]) -> serde_json::Value {
    serde_json::from_slice(output).expect("stdout is JSON")
}

#[test]
fn config_prints_client_build() {
    let temp = project();
    install_polyfills(temp.path());

    let output = rpgkit()
        .args(["config", "--type", "rpg", "--mode", "production", "--build", "--cwd"])
        .arg(temp.path())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let config = stdout_json(&output);
    assert_eq!(config["build"]["minify"], serde_json::json!(false));
    assert_eq!(config["optimizeDeps"]["exclude"], serde_json::json!(["@rpgjs/foo-plugin"]));

    let util = config["resolve"]["alias"]["util"].as_str().unwrap();
    assert!(util.ends_with("util.js"), "{util}");
    assert!(Path::new(util).is_absolute());
    assert!(temp.path().join("dist").is_dir());
}

#[test]
fn config_prints_mmorpg_server_build() {
    let temp = project();

    let output = rpgkit()
        .args(["config", "--side", "server", "--type", "mmorpg", "--mode", "production", "--build"])
        .arg("--cwd")
        .arg(temp.path())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let config = stdout_json(&output);
    let out_dir = config["build"]["outDir"].as_str().unwrap();
    assert!(Path::new(out_dir).ends_with("dist/server"), "{out_dir}");
    assert!(config["build"]["ssr"].is_object());
}

#[test]
fn environment_layer_selects_side() {
    let temp = project();

    let output = rpgkit()
        .env("RPGKIT_SIDE", "server")
        .env("RPGKIT_SERVE_MODE", "true")
        .args(["config", "--compact", "--cwd"])
        .arg(temp.path())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let config = stdout_json(&output);
    let names: Vec<&str> = config["plugins"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|p| p["name"].as_str())
        .collect();
    assert!(names.contains(&"rpgjs-map-update"));
}

#[test]
fn config_writes_output_file() {
    let temp = project();
    let target = temp.path().join("out/server.json");

    rpgkit()
        .args(["config", "--side", "server", "--build", "--cwd"])
        .arg(temp.path())
        .arg("--output")
        .arg(&target)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let written: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(target).unwrap()).unwrap();
    assert!(written["build"].is_object());
}

#[test]
fn check_reports_missing_index() {
    let temp = project();
    fs::remove_file(temp.path().join("index.html")).unwrap();

    rpgkit()
        .args(["check", "--mode", "production", "--build", "--cwd"])
        .arg(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("INDEX_NOT_FOUND"))
        .stderr(predicate::str::contains("could not be built"));
}

#[test]
fn check_summarizes_server_config() {
    let temp = project();

    rpgkit()
        .args(["check", "--side", "server", "--build", "--cwd"])
        .arg(temp.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("excluded from pre-bundling: @rpgjs/foo-plugin"))
        .stderr(predicate::str::contains("is valid"));
}

#[test]
fn invalid_rpg_type_fails() {
    let temp = project();

    rpgkit()
        .env("RPG_TYPE", "arcade")
        .args(["check", "--side", "server", "--cwd"])
        .arg(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("arcade"));
}

#[test]
fn schema_lists_manifest_fields() {
    rpgkit()
        .arg("schema")
        .assert()
        .success()
        .stdout(predicate::str::contains("compilerOptions"))
        .stdout(predicate::str::contains("spritesheetDirectories"));
}
