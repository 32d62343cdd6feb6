//! Integration tests for `broker get-configs`

use crate::integration::test_utils::{FakeConnector, Harness};

fn with_current_context() -> Harness {
    let harness = Harness::new();
    harness
        .run(&["-q", "config", "set-context", "prod", "--server=a:9092"])
        .unwrap();
    harness.run(&["config", "use-context", "prod"]).unwrap();
    harness
}

#[test]
fn get_configs_defaults_to_controller() {
    let harness = with_current_context();
    let text = harness.run(&["broker", "get-configs"]).unwrap();

    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "NAME\tVALUE\tDEFAULT");
    assert_eq!(lines[1], "log.retention.hours\t168\ttrue");
    assert_eq!(lines[2], "auto.create.topics.enable\tfalse\tfalse");
    // set-context plus get-configs.
    assert_eq!(harness.connector.call_count(), 2);
}

#[test]
fn get_configs_uses_current_context_servers() {
    let harness = with_current_context();
    harness.run(&["broker", "get-configs", "3"]).unwrap();
    let calls = harness.connector.calls.lock().unwrap();
    assert_eq!(calls.last().unwrap().bootstrap_servers, vec!["a:9092"]);
}

#[test]
fn get_configs_for_unknown_broker_is_cluster_error() {
    let harness = with_current_context();
    let err = harness.run(&["broker", "get-configs", "42"]).unwrap_err();
    assert_eq!(err.kind(), "cluster");
    assert!(err.to_string().contains("42"));
}

#[test]
fn non_numeric_broker_id_is_usage_error() {
    let harness = with_current_context();
    let calls_before = harness.connector.call_count();
    let err = harness.run(&["broker", "get-configs", "leader"]).unwrap_err();
    assert!(err.is_usage());
    assert_eq!(harness.connector.call_count(), calls_before);
}

#[test]
fn get_configs_without_current_context_is_not_found() {
    let harness = Harness::new();
    let err = harness.run(&["broker", "get-configs"]).unwrap_err();
    assert_eq!(err.kind(), "not_found");
    assert_eq!(harness.connector.call_count(), 0);
}

#[test]
fn get_configs_against_unreachable_cluster_is_connectivity_error() {
    let mut harness = with_current_context();
    harness.connector = FakeConnector::unreachable();
    let err = harness.run(&["broker", "get-configs"]).unwrap_err();
    assert_eq!(err.kind(), "connectivity");
    assert!(err.to_string().contains("a:9092"));
}

#[test]
fn get_configs_without_controller_fails() {
    let mut harness = with_current_context();
    let mut connector = FakeConnector::reachable();
    for broker in &mut connector.brokers {
        broker.is_controller = false;
    }
    harness.connector = connector;
    let err = harness.run(&["broker", "get-configs"]).unwrap_err();
    assert_eq!(err.to_string(), "could not find the controller broker");
}
