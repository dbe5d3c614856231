//! CLI regression tests for the `specprep` binary.
//!
//! These tests invoke the binary as a subprocess to catch regressions in flag
//! names, exit codes, and the files it leaves behind.
//!
//! Run with: `cargo test -p specprep-test`
//! Requires the `specprep` binary to be built first (`cargo build -p specprep`).

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::str::contains;
use specprep_core::{Document, Segment};
use tempfile::TempDir;

use crate::{fixtures, SpecServer};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Returns an assert_cmd Command wrapping the `specprep` binary.
fn specprep() -> Command {
    // cargo_bin is deprecated for custom build-dir setups; fine for standard workspace use.
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("specprep")
        .expect("specprep binary not found, run `cargo build -p specprep` first");
    for var in [
        "SPECPREP_URL",
        "SPECPREP_INPUT",
        "SPECPREP_OUTPUT",
        "SPECPREP_OFFLINE",
        "SPECPREP_LOG_LEVEL",
        "SPECPREP_LOG_FORMAT",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

/// Copy a fixture into `dir` as the cached upstream spec.
fn stage(dir: &Path, fixture: &str) -> PathBuf {
    let input = dir.join("openapi.yml");
    std::fs::copy(fixtures().join(fixture), &input).expect("copy fixture");
    input
}

fn parameters(doc: &Document, path: &str, method: &str) -> Vec<serde_yaml::Value> {
    doc.get(&[
        Segment::Key("paths"),
        Segment::Key(path),
        Segment::Key(method),
        Segment::Key("parameters"),
    ])
    .expect("parameters")
    .as_sequence()
    .expect("parameters sequence")
    .clone()
}

fn names(params: &[serde_yaml::Value]) -> Vec<String> {
    params
        .iter()
        .filter_map(|p| p["name"].as_str().map(str::to_string))
        .collect()
}

// ---------------------------------------------------------------------------
// transform
// ---------------------------------------------------------------------------

#[test]
fn offline_run_rewrites_fixture() {
    let tmp = TempDir::new().expect("temp dir");
    let input = stage(tmp.path(), "minimal.yaml");
    let output = tmp.path().join("generator.yml");

    specprep()
        .arg("--offline")
        .arg("--input")
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout("")
        .stderr(contains("5 edits, from local copy"));

    let before = Document::from_file(&input).expect("parse input");
    let after = Document::from_file(&output).expect("parse output");

    let base = "/collections/{collectionName}/documents";

    let search = parameters(&after, &format!("{base}/search"), "get");
    assert_eq!(
        names(&search),
        vec!["collectionName", "q", "query_by", "include_fields", "per_page", "max_candidates"]
    );
    assert!(search[1..].iter().all(|p| p["in"].as_str() == Some("query")));
    let required: Vec<String> = search[1..]
        .iter()
        .filter(|p| p["required"].as_bool() == Some(true))
        .filter_map(|p| p["name"].as_str().map(str::to_string))
        .collect();
    assert_eq!(required, vec!["q", "query_by"]);

    let import = parameters(&after, &format!("{base}/import"), "post");
    assert_eq!(
        names(&import),
        vec!["collectionName", "action", "batch_size", "dirty_values"]
    );
    assert_eq!(import[1]["schema"]["enum"].as_sequence().map(Vec::len), Some(4));
    assert!(import[2]["schema"].as_mapping().expect("schema").get("enum").is_none());

    let export = parameters(&after, &format!("{base}/export"), "get");
    assert_eq!(
        names(&export),
        vec!["collectionName", "filter_by", "include_fields", "exclude_fields"]
    );
    assert_eq!(export[2]["schema"]["items"]["type"].as_str(), Some("string"));

    let delete = parameters(&after, base, "delete");
    assert_eq!(names(&delete), vec!["collectionName", "filter_by", "batch_size"]);

    let hit = after
        .mapping(&[
            Segment::Key("components"),
            Segment::Key("schemas"),
            Segment::Key("SearchResultHit"),
            Segment::Key("properties"),
            Segment::Key("document"),
        ])
        .expect("document schema");
    assert!(!hit.contains_key("additionalProperties"));

    for key in ["openapi", "info", "externalDocs", "security", "tags"] {
        assert_eq!(
            after.get(&[Segment::Key(key)]).expect("key in output"),
            before.get(&[Segment::Key(key)]).expect("key in input"),
            "{key} changed"
        );
    }
    assert_eq!(
        after
            .get(&[Segment::Key("components"), Segment::Key("securitySchemes")])
            .expect("securitySchemes"),
        before
            .get(&[Segment::Key("components"), Segment::Key("securitySchemes")])
            .expect("securitySchemes"),
    );
}

#[test]
fn missing_properties_exits_one_without_output() {
    let tmp = TempDir::new().expect("temp dir");
    let input = stage(tmp.path(), "missing-properties.yaml");
    let output = tmp.path().join("generator.yml");

    specprep()
        .arg("--offline")
        .arg("--input")
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .assert()
        .failure()
        .code(1)
        .stderr(contains("error: edit 'documents-export' failed"))
        .stderr(contains("schema.properties"));

    assert!(!output.exists(), "output must not be created on failure");
}

#[test]
fn missing_properties_keeps_previous_output() {
    let tmp = TempDir::new().expect("temp dir");
    let input = stage(tmp.path(), "missing-properties.yaml");
    let output = tmp.path().join("generator.yml");
    std::fs::write(&output, "previous: true\n").expect("write output");

    specprep()
        .arg("--offline")
        .arg("--input")
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .assert()
        .failure()
        .code(1);

    assert_eq!(
        std::fs::read_to_string(&output).expect("read output"),
        "previous: true\n"
    );
}

#[test]
fn missing_input_exits_one() {
    let tmp = TempDir::new().expect("temp dir");

    specprep()
        .args(["--offline", "--input", "this-file-does-not-exist.yaml", "--output"])
        .arg(tmp.path().join("generator.yml"))
        .assert()
        .failure()
        .code(1)
        .stderr(contains("failed to read"));
}

#[test]
fn parse_error_exits_one() {
    let tmp = TempDir::new().expect("temp dir");
    let input = stage(tmp.path(), "invalid-parse-error.yaml");

    specprep()
        .arg("--offline")
        .arg("--input")
        .arg(&input)
        .arg("--output")
        .arg(tmp.path().join("generator.yml"))
        .assert()
        .failure()
        .code(1)
        .stderr(contains("failed to parse spec"));
}

#[test]
fn default_paths_are_relative_to_working_directory() {
    let tmp = TempDir::new().expect("temp dir");
    let generator = tmp.path().join("typesense/api/generator");
    std::fs::create_dir_all(&generator).expect("create dirs");
    std::fs::copy(fixtures().join("minimal.yaml"), generator.join("openapi.yml"))
        .expect("copy fixture");

    specprep()
        .current_dir(tmp.path())
        .arg("--offline")
        .assert()
        .success();

    assert!(generator.join("generator.yml").exists());
}

#[test]
fn offline_from_environment() {
    let tmp = TempDir::new().expect("temp dir");
    let input = stage(tmp.path(), "minimal.yaml");
    let output = tmp.path().join("generator.yml");

    specprep()
        .env("SPECPREP_OFFLINE", "true")
        .env("SPECPREP_INPUT", &input)
        .env("SPECPREP_OUTPUT", &output)
        .assert()
        .success()
        .stderr(contains("from local copy"));

    assert!(output.exists());
}

// ---------------------------------------------------------------------------
// fetch
// ---------------------------------------------------------------------------

#[test]
fn download_replaces_cached_copy() {
    let tmp = TempDir::new().expect("temp dir");
    let input = tmp.path().join("openapi.yml");
    std::fs::write(&input, "stale: true\n").expect("write stale copy");
    let output = tmp.path().join("generator.yml");

    let body = std::fs::read(fixtures().join("minimal.yaml")).expect("read fixture");
    let server = SpecServer::start(body.clone(), 200).expect("start server");

    specprep()
        .arg("--url")
        .arg(server.url())
        .arg("--input")
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stderr(contains("from fresh download"));
    server.join();

    assert_eq!(std::fs::read(&input).expect("read input"), body);
    assert!(output.exists());
}

#[test]
fn unreachable_host_falls_back_to_cached_copy() {
    let tmp = TempDir::new().expect("temp dir");
    let input = stage(tmp.path(), "minimal.yaml");
    let output = tmp.path().join("generator.yml");
    let cached = std::fs::read(&input).expect("read cached copy");

    specprep()
        .args(["--url", "http://127.0.0.1:1/openapi.yml", "--input"])
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stderr(contains("from cached copy"));

    assert_eq!(std::fs::read(&input).expect("read input"), cached);
    assert!(output.exists());
}

#[test]
fn error_status_does_not_overwrite_cache() {
    let tmp = TempDir::new().expect("temp dir");
    let input = stage(tmp.path(), "minimal.yaml");
    let cached = std::fs::read(&input).expect("read cached copy");

    let server = SpecServer::start(b"404: Not Found".to_vec(), 404).expect("start server");

    specprep()
        .arg("--url")
        .arg(server.url())
        .arg("--input")
        .arg(&input)
        .arg("--output")
        .arg(tmp.path().join("generator.yml"))
        .assert()
        .success()
        .stderr(contains("from cached copy"));
    server.join();

    assert_eq!(std::fs::read(&input).expect("read input"), cached);
}

#[test]
fn unreachable_host_without_cache_exits_one() {
    let tmp = TempDir::new().expect("temp dir");
    let output = tmp.path().join("generator.yml");

    specprep()
        .args(["--url", "http://127.0.0.1:1/openapi.yml", "--input"])
        .arg(tmp.path().join("openapi.yml"))
        .arg("--output")
        .arg(&output)
        .assert()
        .failure()
        .code(1);

    assert!(!output.exists());
}

// ---------------------------------------------------------------------------
// flags
// ---------------------------------------------------------------------------

#[test]
fn invalid_log_format_exits_two() {
    specprep()
        .args(["--offline", "--log-format", "xml"])
        .assert()
        .failure()
        .code(2)
        .stderr(contains("unknown log format"));
}

#[test]
fn json_logs_go_to_stderr() {
    let tmp = TempDir::new().expect("temp dir");
    let input = stage(tmp.path(), "minimal.yaml");

    specprep()
        .args(["--offline", "--log-format", "json", "--input"])
        .arg(&input)
        .arg("--output")
        .arg(tmp.path().join("generator.yml"))
        .assert()
        .success()
        .stdout("")
        .stderr(contains("\"event\":\"edit_applied\""));
}
