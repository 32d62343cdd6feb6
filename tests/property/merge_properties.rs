//! Property-based tests for the field merge engine

use kafkactx::context::{merge, Context, ContextOverrides, KafkaVersion, Override, SaslConfig};
use proptest::prelude::*;

fn version() -> impl Strategy<Value = KafkaVersion> {
    prop::sample::select(KafkaVersion::known().collect::<Vec<_>>())
}

fn endpoint() -> impl Strategy<Value = String> {
    "[a-z]{1,10}:[0-9]{2,5}"
}

fn servers() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(endpoint(), 0..4)
}

fn sasl() -> impl Strategy<Value = Option<SaslConfig>> {
    prop::option::of(
        (
            any::<bool>(),
            prop::option::of(prop::sample::select(vec![
                "PLAIN".to_string(),
                "SCRAM-SHA-256".to_string(),
                "SCRAM-SHA-512".to_string(),
            ])),
            prop::option::of("[a-z]{1,8}"),
            prop::option::of("[ -~]{1,12}"),
        )
            .prop_map(|(enabled, algorithm, username, password)| SaslConfig {
                enabled,
                algorithm,
                username,
                password,
            }),
    )
}

fn context() -> impl Strategy<Value = Context> {
    (
        servers(),
        prop::option::of(version()),
        prop::option::of(endpoint()),
        prop::option::of(endpoint()),
        any::<bool>(),
        sasl(),
    )
        .prop_map(
            |(bootstrap_servers, kafka_version, schema_registry, ksql, tls, sasl)| Context {
                bootstrap_servers,
                kafka_version,
                schema_registry,
                ksql,
                tls,
                sasl,
            },
        )
}

fn tri_state<T: std::fmt::Debug + Clone + 'static>(
    value: impl Strategy<Value = T> + 'static,
) -> impl Strategy<Value = Override<T>> {
    prop::option::of(value).prop_map(Override::from)
}

/// Endpoint overrides may be given empty, which clears the stored value.
fn endpoint_override() -> impl Strategy<Value = Override<String>> {
    tri_state(prop_oneof![Just(String::new()), endpoint()])
}

fn overrides() -> impl Strategy<Value = ContextOverrides> {
    (
        tri_state(prop::collection::vec(endpoint(), 1..4)),
        tri_state(version()),
        endpoint_override(),
        endpoint_override(),
        tri_state(Just(true)),
        tri_state(Just("SCRAM-SHA-256".to_string())),
        tri_state("[a-z]{1,8}"),
        tri_state("[ -~]{1,12}"),
        any::<bool>(),
    )
        .prop_map(
            |(bootstrap_servers, kafka_version, schema_registry, ksql, sasl, algorithm, username, password, tls)| {
                ContextOverrides {
                    bootstrap_servers,
                    kafka_version,
                    schema_registry,
                    ksql,
                    sasl,
                    algorithm,
                    username,
                    password,
                    tls,
                }
            },
        )
}

/// Applying the same overrides twice changes nothing further
#[test]
fn test_merge_is_idempotent() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&(context(), overrides()), |(base, overrides)| {
            let once = merge(&base, &overrides);
            let twice = merge(&once, &overrides);
            prop_assert_eq!(once, twice);
            Ok(())
        })
        .unwrap();
}

/// Fields without an override keep the base value; the base itself is never mutated
#[test]
fn test_merge_preserves_unset_fields() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&(context(), overrides()), |(base, overrides)| {
            let snapshot = base.clone();
            let merged = merge(&base, &overrides);
            prop_assert_eq!(&base, &snapshot);

            if !overrides.bootstrap_servers.provided() {
                prop_assert_eq!(&merged.bootstrap_servers, &base.bootstrap_servers);
            }
            if !overrides.kafka_version.provided() {
                prop_assert_eq!(merged.kafka_version, base.kafka_version);
            }
            if !overrides.schema_registry.provided() {
                prop_assert_eq!(&merged.schema_registry, &base.schema_registry);
            }
            if !overrides.ksql.provided() {
                prop_assert_eq!(&merged.ksql, &base.ksql);
            }
            if !overrides.touches_sasl() {
                prop_assert_eq!(&merged.sasl, &base.sasl);
            }
            if !overrides.username.provided() {
                prop_assert_eq!(merged.sasl_username(), base.sasl_username());
            }
            if !overrides.password.provided() {
                prop_assert_eq!(merged.sasl_password(), base.sasl_password());
            }
            Ok(())
        })
        .unwrap();
}

/// Provided values win; provided-empty endpoints clear; tls and the SASL latch always apply
#[test]
fn test_merge_applies_provided_fields() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&(context(), overrides()), |(base, overrides)| {
            let merged = merge(&base, &overrides);

            if let Some(servers) = overrides.bootstrap_servers.value() {
                prop_assert_eq!(&merged.bootstrap_servers, servers);
            }
            if let Some(version) = overrides.kafka_version.value() {
                prop_assert_eq!(merged.kafka_version, Some(*version));
            }
            match overrides.schema_registry.value() {
                Some(v) if v.is_empty() => prop_assert!(merged.schema_registry.is_none()),
                Some(v) => prop_assert_eq!(merged.schema_registry.as_deref(), Some(v.as_str())),
                None => {}
            }
            match overrides.ksql.value() {
                Some(v) if v.is_empty() => prop_assert!(merged.ksql.is_none()),
                Some(v) => prop_assert_eq!(merged.ksql.as_deref(), Some(v.as_str())),
                None => {}
            }
            if let Some(username) = overrides.username.value() {
                prop_assert_eq!(merged.sasl_username(), Some(username.as_str()));
            }
            if overrides.touches_sasl() {
                prop_assert!(merged.sasl_enabled());
            }
            prop_assert_eq!(merged.tls, overrides.tls);
            Ok(())
        })
        .unwrap();
}

/// Empty overrides leave everything but tls as it was
#[test]
fn test_empty_overrides_only_set_tls() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&(context(), any::<bool>()), |(base, tls)| {
            let overrides = ContextOverrides {
                tls,
                ..ContextOverrides::default()
            };
            let merged = merge(&base, &overrides);
            let expected = Context { tls, ..base };
            prop_assert_eq!(merged, expected);
            Ok(())
        })
        .unwrap();
}
