//! Integration tests for use-context, current-context and get-contexts

use crate::integration::test_utils::{write_file, Harness};

const STORED: &str = r#"
current_context = "prod"

[contexts.prod]
bootstrap_servers = ["p1:9092", "p2:9092"]
kafka_version = "2.8.0"
schema_registry = "http://registry:8081"
tls = true

[contexts.prod.sasl]
enabled = true
algorithm = "SCRAM-SHA-256"
username = "svc"
password = "s3cret"

[contexts.dev]
bootstrap_servers = ["localhost:9092"]
tls = false
"#;

fn seeded() -> Harness {
    let harness = Harness::new();
    write_file(&harness.store_path(), STORED);
    harness
}

#[test]
fn current_context_prints_name() {
    let harness = seeded();
    assert_eq!(harness.run(&["config", "current-context"]).unwrap(), "prod");
}

#[test]
fn current_context_without_selection_is_not_found() {
    let harness = Harness::new();
    let err = harness.run(&["config", "current-context"]).unwrap_err();
    assert_eq!(err.kind(), "not_found");
    assert_eq!(err.to_string(), "no current context is set");
}

#[test]
fn use_context_switches_and_persists() {
    let harness = seeded();
    let output = harness.run(&["config", "use-context", "dev"]).unwrap();
    assert_eq!(output, "Switched to context \"dev\".");
    assert_eq!(harness.load().current_context(), Some("dev"));
    assert_eq!(harness.run(&["config", "current-context"]).unwrap(), "dev");
}

#[test]
fn use_unknown_context_fails_without_writing() {
    let harness = seeded();
    let before = harness.store_bytes();
    let err = harness.run(&["config", "use-context", "staging"]).unwrap_err();
    assert_eq!(err.kind(), "not_found");
    assert!(err.to_string().contains("staging"));
    assert_eq!(harness.store_bytes(), before);
}

#[test]
fn get_contexts_text_lists_every_context() {
    let harness = seeded();
    let text = harness.run(&["config", "get-contexts"]).unwrap();
    assert!(text.contains("p1:9092,p2:9092"));
    assert!(text.contains("localhost:9092"));
    assert!(text.contains("2.8.0"));
    assert!(!text.contains("s3cret"));
}

#[test]
fn get_contexts_text_on_empty_store() {
    let harness = Harness::new();
    let text = harness.run(&["config", "get-contexts"]).unwrap();
    assert!(text.starts_with("No contexts found."));
}

#[test]
fn get_contexts_json_is_sorted_and_marks_current() {
    let harness = seeded();
    let json = harness
        .run(&["config", "get-contexts", "--format", "json"])
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["current_context"], "prod");
    let contexts = value["contexts"].as_array().unwrap();
    assert_eq!(contexts.len(), 2);
    assert_eq!(contexts[0]["name"], "dev");
    assert_eq!(contexts[0]["current"], false);
    assert_eq!(contexts[0]["tls"], false);
    assert_eq!(contexts[1]["name"], "prod");
    assert_eq!(contexts[1]["current"], true);
    assert_eq!(contexts[1]["sasl"], true);
    assert_eq!(contexts[1]["schema_registry"], "http://registry:8081");
    assert!(!json.contains("s3cret"));
}

#[test]
fn get_contexts_unknown_format_is_usage_error() {
    let harness = seeded();
    let err = harness
        .run(&["config", "get-contexts", "--format", "yaml"])
        .unwrap_err();
    assert!(err.is_usage());
}

#[test]
fn stored_file_round_trips_through_set_context() {
    let harness = seeded();
    harness
        .run(&["-q", "config", "set-context", "dev", "--ksql=ksql:8088", "--tls=false"])
        .unwrap();

    let stored = harness.load();
    let prod = stored.get("prod").unwrap();
    assert_eq!(prod.sasl_password(), Some("s3cret"));
    assert_eq!(prod.sasl_algorithm(), Some("SCRAM-SHA-256"));
    let dev = stored.get("dev").unwrap();
    assert_eq!(dev.ksql.as_deref(), Some("ksql:8088"));
    assert_eq!(dev.bootstrap_servers, vec!["localhost:9092"]);
    assert_eq!(stored.current_context(), Some("prod"));

    let raw = String::from_utf8(harness.store_bytes().unwrap()).unwrap();
    assert!(raw.contains("[contexts.dev]"));
    assert!(raw.contains("current_context = \"prod\""));
}

#[test]
fn dangling_current_context_is_rejected_on_load() {
    let harness = Harness::new();
    write_file(
        &harness.store_path(),
        "current_context = \"ghost\"\n\n[contexts.dev]\nbootstrap_servers = [\"a:1\"]\n",
    );
    let err = harness.run(&["config", "current-context"]).unwrap_err();
    assert_eq!(err.kind(), "persistence");
}

#[test]
fn malformed_store_is_persistence_error() {
    let harness = Harness::new();
    write_file(&harness.store_path(), "contexts = [[[");
    let err = harness.run(&["config", "get-contexts"]).unwrap_err();
    assert_eq!(err.kind(), "persistence");
}
