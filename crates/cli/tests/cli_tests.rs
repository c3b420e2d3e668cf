//! CLI integration tests
use predicates::prelude::*;
use tempfile::TempDir;

fn cmd() -> assert_cmd::Command {
    assert_cmd::Command::cargo_bin("jobsift").unwrap()
}

fn get_fixture_path(name: &str) -> String {
    format!("../../tests/fixtures/{}", name)
}

fn get_site_fixture_path(site: &str, name: &str) -> String {
    format!("../../tests/fixtures/sites/{}/{}", site, name)
}

#[test]
fn test_cli_file_input() {
    cmd()
        .arg(get_site_fixture_path("generic", "posting.html"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Backend Engineer"));
}

#[test]
fn test_cli_stdin_input() {
    let html = std::fs::read_to_string(get_site_fixture_path("generic", "posting.html")).unwrap();
    cmd()
        .arg("-")
        .write_stdin(html)
        .assert()
        .success()
        .stdout(predicate::str::contains("Backend Engineer"));
}

#[test]
fn test_cli_stdin_with_url() {
    let html = std::fs::read_to_string(get_site_fixture_path("generic", "posting.html")).unwrap();
    cmd()
        .args(["--url", "https://acme.example/careers/backend-engineer", "-"])
        .write_stdin(html)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "https://acme.example/careers/backend-engineer/apply",
        ));
}

#[test]
fn test_cli_json_format_parses() {
    let output = cmd()
        .args(["-f", "json", &get_site_fixture_path("generic", "posting.html")])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let value: serde_json::Value = serde_json::from_slice(&output).expect("valid JSON on stdout");
    assert_eq!(value["title"], "Backend Engineer");
    assert_eq!(value["location"], "Austin, TX");
}

#[test]
fn test_cli_pretty_json() {
    cmd()
        .args(["--pretty", &get_site_fixture_path("generic", "posting.html")])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("{\n"));
}

#[test]
fn test_cli_text_format() {
    cmd()
        .args(["-f", "text", &get_site_fixture_path("generic", "posting.html")])
        .assert()
        .success()
        .stdout(predicate::str::contains("Company:"))
        .stdout(predicate::str::contains("Quality:"));
}

#[test]
fn test_cli_output_file() {
    let tmp = TempDir::new().unwrap();
    let output = tmp.path().join("record.json");

    cmd()
        .args(["-o", output.to_str().unwrap()])
        .arg(get_site_fixture_path("generic", "posting.html"))
        .assert()
        .success();

    let written = std::fs::read_to_string(&output).unwrap();
    assert!(written.contains("Backend Engineer"));
}

#[test]
fn test_cli_structured_data_fixture() {
    cmd()
        .arg(get_fixture_path("structured_data.html"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Globex Corporation"))
        .stdout(predicate::str::contains("structured_data"));
}

#[test]
fn test_cli_empty_content_still_succeeds() {
    // a page with nothing in it degrades to fallback values, never an error
    cmd()
        .arg(get_fixture_path("empty_content.html"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Company Name Not Found"))
        .stdout(predicate::str::contains("Failed"));
}

#[test]
fn test_cli_invalid_file() {
    cmd().arg("nonexistent.html").assert().failure();
}

#[test]
fn test_cli_verbose() {
    cmd()
        .args(["-v", &get_site_fixture_path("generic", "posting.html")])
        .assert()
        .success()
        .stderr(predicate::str::contains("JobSift"))
        .stderr(predicate::str::contains("Extraction Summary"));
}

#[test]
fn test_cli_profiles_dir() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(
        tmp.path().join("board.json"),
        r#"{
            "name": "Example Board",
            "host_signatures": ["board.example"],
            "title_selectors": [".vacancy-title"]
        }"#,
    )
    .unwrap();

    let html = r#"<html><body><div class="vacancy-title">Field Service Engineer</div></body></html>"#;
    let input = tmp.path().join("page.html");
    std::fs::write(&input, html).unwrap();

    cmd()
        .args([
            "--profiles",
            tmp.path().to_str().unwrap(),
            "--url",
            "https://board.example/vacancy/9",
            input.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Field Service Engineer"));
}

#[test]
fn test_cli_profiles_dir_missing() {
    cmd()
        .args([
            "--profiles",
            "/nonexistent/profiles",
            &get_site_fixture_path("generic", "posting.html"),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("site profiles"));
}

#[test]
fn test_cli_no_frames_flag() {
    cmd()
        .args(["--no-frames", &get_site_fixture_path("generic", "posting.html")])
        .assert()
        .success();
}

#[test]
fn test_cli_invalid_format() {
    cmd()
        .args(["-f", "yaml", &get_site_fixture_path("generic", "posting.html")])
        .assert()
        .failure();
}
