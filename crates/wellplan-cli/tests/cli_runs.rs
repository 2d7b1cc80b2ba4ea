use std::fs;
use std::path::Path;
use std::process::{Command, Output};

fn wellplan(args: &[&str], cwd: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_wellplan"))
        .args(args)
        .current_dir(cwd)
        .env_remove("OPENAI_API_KEY")
        .env_remove("GEMINI_API_KEY")
        .env_remove("RUST_LOG")
        .output()
        .expect("spawn wellplan")
}

#[test]
fn generate_without_credentials_writes_fallback_run() {
    let dir = tempfile::tempdir().unwrap();
    let output = wellplan(
        &["generate", "--category", "skincare", "--out", "out/skincare.html"],
        dir.path(),
    );
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let markup = fs::read_to_string(dir.path().join("out/skincare.html")).unwrap();
    assert_eq!(markup.matches("class=\"day-entry\"").count(), 30);
    assert!(markup.contains("Your Personalized Skincare Plan"));

    let runs: Vec<_> = fs::read_dir(dir.path().join("runs"))
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .collect();
    assert_eq!(runs.len(), 1);
    for artifact in ["config.json", "content.json", "document.json", "logs.ndjson"] {
        assert!(runs[0].join(artifact).exists(), "{artifact} missing");
    }

    let record: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(runs[0].join("document.json")).unwrap()).unwrap();
    assert_eq!(record["fallback"]["code"], "no_provider");
    assert_eq!(record["document"]["page"]["format"], "A4");

    let logs = fs::read_to_string(runs[0].join("logs.ndjson")).unwrap();
    assert!(logs.contains("fallback_triggered"));
}

#[test]
fn explicit_provider_without_key_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = wellplan(
        &[
            "generate",
            "--category",
            "fitness",
            "--provider",
            "openai",
            "--out",
            "fitness.html",
        ],
        dir.path(),
    );
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("OPENAI_API_KEY"));
    assert!(!dir.path().join("fitness.html").exists());
}

#[test]
fn validate_reports_short_fitness_plan() {
    let dir = tempfile::tempdir().unwrap();
    let response = dir.path().join("response.txt");
    fs::write(&response, r#"{"meta": {"title": "Too short"}, "weeks": []}"#).unwrap();

    let output = wellplan(
        &["validate", "--category", "fitness", response.to_str().unwrap()],
        dir.path(),
    );
    assert!(!output.status.success());

    let issues: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let paths: Vec<&str> = issues
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|issue| issue["path"].as_str())
        .collect();
    assert!(paths.contains(&"/weeks"));
}

#[test]
fn prompt_is_stable_across_invocations() {
    let dir = tempfile::tempdir().unwrap();
    let first = wellplan(&["prompt", "--category", "diet"], dir.path());
    let second = wellplan(&["prompt", "--category", "diet"], dir.path());
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
}
