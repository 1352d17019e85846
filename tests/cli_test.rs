use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn topo() -> Command {
    let mut cmd = Command::cargo_bin("topo").unwrap();
    cmd.env_remove("TOPO_CONFIG").env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_sort_from_stdin() {
    topo()
        .arg("sort")
        .write_stdin("a -> b\na -> c\n")
        .assert()
        .success()
        .stdout("a\nb\nc\n");
}

#[test]
fn test_sort_diamond_from_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("diamond.txt");
    fs::write(&path, "a -> b, c\nb -> d\nc -> d\n").unwrap();

    topo()
        .arg("sort")
        .arg(&path)
        .assert()
        .success()
        .stdout("a\nb\nc\nd\n");
}

#[test]
fn test_sort_single_node() {
    topo()
        .args(["sort", "-"])
        .write_stdin("a\n")
        .assert()
        .success()
        .stdout("a\n");
}

#[test]
fn test_sort_cycle_fails() {
    topo()
        .arg("sort")
        .write_stdin("a -> b\nb -> a\n")
        .assert()
        .failure()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("Cycle detected: a → b → a"));
}

#[test]
fn test_sort_self_loop_fails() {
    topo()
        .arg("sort")
        .write_stdin("a -> a\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cycle detected: a → a"));
}

#[test]
fn test_sort_lexicographic() {
    topo()
        .args(["sort", "--tie-break", "lexicographic"])
        .write_stdin("r -> c, b\nb -> a\nc -> d\n")
        .assert()
        .success()
        .stdout("r\nb\na\nc\nd\n");
}

#[test]
fn test_sort_json_output() {
    topo()
        .args(["sort", "--output", "json"])
        .write_stdin("x -> y\n")
        .assert()
        .success()
        .stdout("{\"order\":[\"x\",\"y\"]}\n");
}

#[test]
fn test_sort_json_cycle_report() {
    topo()
        .args(["sort", "--output", "json"])
        .write_stdin("s -> a\na -> b\nb -> a\n")
        .assert()
        .failure()
        .stdout(predicate::str::contains("\"error\":\"CycleDetected\""))
        .stdout(predicate::str::contains("\"unresolved\":[\"a\",\"b\"]"))
        .stdout(predicate::str::contains("\"cycle\":[\"a\",\"b\",\"a\"]"));
}

#[test]
fn test_sort_json_input() {
    topo()
        .arg("sort")
        .write_stdin(r#"{"nodes": ["solo"], "edges": [["a", "b"]]}"#)
        .assert()
        .success()
        .stdout("solo\na\nb\n");
}

#[test]
fn test_sort_inconsistent_adjacency_rejected() {
    topo()
        .arg("sort")
        .write_stdin(r#"{"outgoing": {"a": ["b"], "b": []}, "incoming": {"a": [], "b": []}}"#)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid graph"));
}

#[test]
fn test_sort_parse_error() {
    topo()
        .args(["sort", "--input", "edges"])
        .write_stdin("a -> b\n -> c\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Parse error on line 2"));
}

#[test]
fn test_check_acyclic() {
    topo()
        .arg("check")
        .write_stdin("a -> b\nb -> c\n")
        .assert()
        .success()
        .stdout("acyclic: 3 nodes, 2 edges\n");
}

#[test]
fn test_check_json() {
    topo()
        .args(["check", "--output", "json"])
        .write_stdin("a -> b\n")
        .assert()
        .success()
        .stdout("{\"acyclic\":true,\"nodes\":2,\"edges\":1}\n");
}

#[test]
fn test_check_cycle() {
    topo()
        .arg("check")
        .write_stdin("a -> b\nb -> c\nc -> a\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cycle detected: a → b → c → a"));
}

#[test]
fn test_config_file_sets_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("topo.json");
    fs::write(&config, r#"{"tie_break": "lexicographic", "output_format": "json"}"#).unwrap();

    topo()
        .arg("--config")
        .arg(&config)
        .arg("sort")
        .write_stdin("b\na\n")
        .assert()
        .success()
        .stdout("{\"order\":[\"a\",\"b\"]}\n");
}

#[test]
fn test_config_from_env_overridden_by_flag() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("topo.json");
    fs::write(&config, r#"{"output_format": "json"}"#).unwrap();

    topo()
        .env("TOPO_CONFIG", &config)
        .args(["sort", "--output", "text"])
        .write_stdin("b\na\n")
        .assert()
        .success()
        .stdout("b\na\n");
}

#[test]
fn test_missing_config_file() {
    let temp_dir = TempDir::new().unwrap();

    topo()
        .arg("--config")
        .arg(temp_dir.path().join("missing.json"))
        .arg("sort")
        .write_stdin("a\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config error"));
}

#[test]
fn test_missing_input_file() {
    let temp_dir = TempDir::new().unwrap();

    topo()
        .arg("sort")
        .arg(temp_dir.path().join("nope.txt"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("IO error"));
}
