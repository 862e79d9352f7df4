use finsight_testing::TestWorld;
use finsight_testing::assertions::{assert_block_types, assert_insight_types, assert_tokens};
use finsight_testing::fixtures::{
    ANTHROPIC_MALFORMED, ANTHROPIC_STREAM, ANTHROPIC_THINKING, GOOGLE_STREAM, OPENAI_TOOL_CALLS,
};
use predicates::prelude::*;

#[test]
fn providers_lists_builtin_parsers() {
    let world = TestWorld::new();

    world
        .command()
        .arg("providers")
        .assert()
        .success()
        .stdout(predicate::str::contains("anthropic"))
        .stdout(predicate::str::contains("gpt, o1"))
        .stdout(predicate::str::contains("gemini, vertex"));
}

#[test]
fn process_infers_provider_from_model_field() {
    let world = TestWorld::new().with_sample(ANTHROPIC_THINKING);

    let result = world.run(&["process", ANTHROPIC_THINKING]).unwrap();
    assert!(result.success(), "{}", result.stderr);

    let summary = result.json().unwrap();
    assert_eq!(summary["model"], "claude-3-7-sonnet-20250219");
    assert_eq!(summary["reasoning_available"], true);
    assert_insight_types(&summary, &["valuation", "performance", "valuation", "risk"]).unwrap();
    assert_tokens(&summary, 512, 256).unwrap();
}

#[test]
fn process_reports_invalid_tools() {
    let world = TestWorld::new().with_sample(OPENAI_TOOL_CALLS);

    let result = world
        .run(&["process", OPENAI_TOOL_CALLS, "--provider", "openai"])
        .unwrap();
    assert!(result.success(), "{}", result.stderr);

    let summary = result.json().unwrap();
    assert_eq!(summary["tools_valid"], false);
    assert_insight_types(&summary, &[]).unwrap();
}

#[test]
fn process_text_format() {
    let world = TestWorld::new().with_sample(OPENAI_TOOL_CALLS);

    world
        .command()
        .args(["process", OPENAI_TOOL_CALLS, "--format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("model: gpt-4o-2024-08-06 (openai)"))
        .stdout(predicate::str::contains("error: Unknown tool: delete_everything"))
        .stdout(predicate::str::contains("error: Missing required parameter: query"));
}

#[test]
fn process_full_output() {
    let world = TestWorld::new().with_sample(OPENAI_TOOL_CALLS);

    let result = world
        .run(&["process", OPENAI_TOOL_CALLS, "--full", "--budget", "0.0025"])
        .unwrap();
    assert!(result.success(), "{}", result.stderr);

    let processed = result.json().unwrap();
    assert_eq!(processed["parsed"]["tool_calls"].as_array().unwrap().len(), 3);
    let warnings: Vec<usize> = processed["tool_validations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["warnings"].as_array().unwrap().len())
        .collect();
    assert_eq!(warnings, vec![0, 1, 1]);
}

#[test]
fn budget_from_config_file() {
    let world = TestWorld::new()
        .with_sample(OPENAI_TOOL_CALLS)
        .with_config("max_budget_usd = 0.0025\n");

    let result = world.run(&["process", OPENAI_TOOL_CALLS, "--full"]).unwrap();
    assert!(result.success(), "{}", result.stderr);

    let processed = result.json().unwrap();
    assert_eq!(
        processed["tool_validations"][2]["warnings"]
            .as_array()
            .unwrap()
            .len(),
        1
    );
}

#[test]
fn parse_keeps_malformed_blocks() {
    let world = TestWorld::new().with_sample(ANTHROPIC_MALFORMED);

    let result = world.run(&["parse", ANTHROPIC_MALFORMED]).unwrap();
    assert!(result.success(), "{}", result.stderr);

    let parsed = result.json().unwrap();
    assert_block_types(&parsed, &["unknown", "unknown", "text"]).unwrap();
    assert_eq!(parsed["parse_errors"].as_array().unwrap().len(), 1);
    assert_eq!(parsed["final_text"], "Valuation inputs were incomplete.");
}

#[test]
fn stream_detects_model_from_chunks() {
    let world = TestWorld::new()
        .with_sample(GOOGLE_STREAM)
        .with_sample(ANTHROPIC_STREAM);

    let result = world.run(&["stream", GOOGLE_STREAM]).unwrap();
    assert!(result.success(), "{}", result.stderr);
    let summary = result.json().unwrap();
    assert_eq!(summary["model"], "gemini-1.5-pro-002");
    assert_insight_types(&summary, &["forecast"]).unwrap();

    let result = world.run(&["stream", ANTHROPIC_STREAM]).unwrap();
    assert!(result.success(), "{}", result.stderr);
    let summary = result.json().unwrap();
    assert_eq!(summary["model"], "claude-3-5-sonnet-20241022");
    assert_insight_types(&summary, &["performance"]).unwrap();
}

#[test]
fn stdin_input() {
    let world = TestWorld::new();

    world
        .command()
        .args(["process", "-", "--provider", "google"])
        .write_stdin(r#"{"candidates": [{"content": {"parts": [{"text": "Leverage is a concern."}]}}]}"#)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"risk\""));
}

#[test]
fn unparseable_response_still_succeeds() {
    let world = TestWorld::new().with_file("junk.json", "[1, 2, 3]");

    let result = world
        .run(&["process", "junk.json", "--provider", "openai"])
        .unwrap();
    assert!(result.success(), "{}", result.stderr);
    assert_eq!(result.json().unwrap()["model"], "gpt-unknown");
}

#[test]
fn strict_inference_rejects_unknown_model() {
    let world = TestWorld::new().with_sample(ANTHROPIC_THINKING);

    world
        .command()
        .args(["process", ANTHROPIC_THINKING, "--model", "mystery", "--strict"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "cannot infer provider from model name: mystery",
        ));
}

#[test]
fn unknown_provider_is_an_error() {
    let world = TestWorld::new().with_sample(ANTHROPIC_THINKING);

    world
        .command()
        .args(["parse", ANTHROPIC_THINKING, "--provider", "mistral"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "no parser registered for provider: mistral",
        ));
}

#[test]
fn missing_selection_is_an_error() {
    let world = TestWorld::new().with_file("bare.json", r#"{"content": []}"#);

    world
        .command()
        .args(["process", "bare.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("pass --provider or --model"));
}

#[test]
fn missing_file_is_an_error() {
    let world = TestWorld::new();

    world
        .command()
        .args(["process", "nope.json", "--provider", "anthropic"])
        .assert()
        .failure()
        .stderr(predicate::str::starts_with("Error: Failed to read"));
}

#[test]
fn log_level_flag_controls_stderr() {
    let world = TestWorld::new().with_sample(ANTHROPIC_THINKING);

    world
        .command()
        .args(["process", ANTHROPIC_THINKING, "--log-level", "debug"])
        .assert()
        .success()
        .stderr(predicate::str::contains("processed response"));

    world
        .command()
        .args(["process", ANTHROPIC_THINKING, "--model", "mystery", "--log-level", "off"])
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}
