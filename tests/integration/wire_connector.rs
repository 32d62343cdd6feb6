//! End to end tests: CLI commands driving the wire connector against a loopback broker

use kafkactx::cluster::wire::{self, Decoder, Encoder};
use kafkactx::cluster::WireConnector;
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::integration::test_utils::{parse, Harness};

/// Two-node cluster served from one port. Node 2 is the controller; SASL PLAIN accepts `svc`/`pw`.
struct LoopbackCluster {
    port: u16,
    connections: Arc<AtomicUsize>,
}

impl LoopbackCluster {
    fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        let connections = Arc::new(AtomicUsize::new(0));
        let counter = connections.clone();
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { return };
                counter.fetch_add(1, Ordering::SeqCst);
                thread::spawn(move || serve(stream, port));
            }
        });
        Self { port, connections }
    }

    fn server_flag(&self) -> String {
        format!("--server=127.0.0.1:{}", self.port)
    }

    fn connection_count(&self) -> usize {
        self.connections.load(Ordering::SeqCst)
    }
}

fn serve(mut stream: TcpStream, port: u16) {
    while let Ok(frame) = wire::read_frame(&mut stream) {
        let mut dec = Decoder::new(&frame);
        let api_key = dec.i16().unwrap();
        let _version = dec.i16().unwrap();
        let correlation_id = dec.i32().unwrap();
        let _client_id = dec.nullable_string().unwrap();

        let mut enc = Encoder::new();
        enc.put_i32(correlation_id);
        match api_key {
            wire::API_API_VERSIONS => {
                enc.put_i16(0);
                enc.put_array_len(Some(0));
            }
            wire::API_SASL_HANDSHAKE => {
                let mechanism = dec.string().unwrap();
                enc.put_i16(if mechanism == "PLAIN" { 0 } else { 33 });
                enc.put_array_len(Some(1));
                enc.put_string("PLAIN");
            }
            wire::API_SASL_AUTHENTICATE => {
                let ok = dec.bytes().unwrap() == b"\0svc\0pw".to_vec();
                enc.put_i16(if ok { 0 } else { 58 });
                enc.put_nullable_string(if ok { None } else { Some("Authentication failed") });
                enc.put_bytes(&[]);
            }
            wire::API_METADATA => {
                enc.put_array_len(Some(2));
                for node_id in [2, 1] {
                    enc.put_i32(node_id);
                    enc.put_string("127.0.0.1");
                    enc.put_i32(port as i32);
                    enc.put_nullable_string(None);
                }
                enc.put_i32(2);
                enc.put_array_len(Some(0));
            }
            wire::API_DESCRIBE_CONFIGS => {
                let _resources = dec.array_len().unwrap();
                let _resource_type = dec.i8().unwrap();
                let resource_name = dec.string().unwrap();
                let long_value = "x".repeat(120);
                enc.put_i32(0);
                enc.put_array_len(Some(1));
                enc.put_i16(0);
                enc.put_nullable_string(None);
                enc.put_i8(wire::RESOURCE_BROKER);
                enc.put_string(&resource_name);
                enc.put_array_len(Some(3));
                config_entry(&mut enc, "broker.id", Some(&resource_name), false, false);
                config_entry(&mut enc, "listeners", Some(&long_value), false, false);
                config_entry(&mut enc, "ssl.keystore.password", None, true, true);
            }
            _ => return,
        }
        let body = enc.into_inner();
        let mut out = (body.len() as i32).to_be_bytes().to_vec();
        out.extend_from_slice(&body);
        if wire::write_frame(&mut stream, &out).is_err() {
            return;
        }
    }
}

fn config_entry(enc: &mut Encoder, name: &str, value: Option<&str>, is_default: bool, sensitive: bool) {
    enc.put_string(name);
    enc.put_nullable_string(value);
    enc.put_i8(0);
    enc.put_i8(is_default as i8);
    enc.put_i8(sensitive as i8);
}

fn connector() -> Arc<WireConnector> {
    Arc::new(WireConnector::new(Duration::from_secs(2), "kafkactx-test"))
}

fn run(harness: &Harness, argv: &[&str]) -> Result<String, kafkactx::error::CommandError> {
    let cli = parse(argv);
    harness.run_context_with(connector(), cli.quiet).execute(&cli.command)
}

#[test]
fn set_context_then_get_controller_configs() {
    let cluster = LoopbackCluster::start();
    let harness = Harness::new();
    let server = cluster.server_flag();

    let created = run(
        &harness,
        &["-q", "config", "set-context", "local", &server, "--tls=false"],
    )
    .unwrap();
    assert_eq!(created, "Context \"local\" created.");
    run(&harness, &["config", "use-context", "local"]).unwrap();

    let text = run(&harness, &["broker", "get-configs"]).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "NAME\tVALUE\tDEFAULT");
    assert_eq!(lines[1], "broker.id\t2\tfalse");
    assert_eq!(lines[2], format!("listeners\t{}\tfalse", "x".repeat(100)));
    assert_eq!(lines[3], format!("\t{}", "x".repeat(20)));
    assert_eq!(lines[4], "ssl.keystore.password\t(sensitive)\ttrue");
}

#[test]
fn get_configs_for_explicit_broker() {
    let cluster = LoopbackCluster::start();
    let harness = Harness::new();
    let server = cluster.server_flag();
    run(
        &harness,
        &["-q", "config", "set-context", "local", &server, "--tls=false"],
    )
    .unwrap();
    run(&harness, &["config", "use-context", "local"]).unwrap();

    let text = run(&harness, &["broker", "get-configs", "1"]).unwrap();
    assert!(text.lines().any(|l| l == "broker.id\t1\tfalse"));
    // set-context, then bootstrap plus broker connection for get-configs.
    assert_eq!(cluster.connection_count(), 3);
}

#[test]
fn sasl_plain_credentials_are_checked_by_set_context() {
    let cluster = LoopbackCluster::start();
    let harness = Harness::new();
    let server = cluster.server_flag();

    let err = run(
        &harness,
        &[
            "-q", "config", "set-context", "secure", &server, "--tls=false", "--sasl", "-a", "PLAIN",
            "-u", "svc", "-p", "wrong",
        ],
    )
    .unwrap_err();
    assert_eq!(err.kind(), "connectivity");
    assert!(err.to_string().contains("Authentication failed"));
    assert!(harness.store_bytes().is_none());

    run(
        &harness,
        &[
            "-q", "config", "set-context", "secure", &server, "--tls=false", "--sasl", "-a", "PLAIN",
            "-u", "svc", "-p", "pw",
        ],
    )
    .unwrap();
    assert!(harness.load().get("secure").unwrap().sasl_enabled());
}

#[test]
fn unsupported_mechanism_is_rejected_by_broker() {
    let cluster = LoopbackCluster::start();
    let harness = Harness::new();
    let server = cluster.server_flag();

    let err = run(
        &harness,
        &[
            "-q", "config", "set-context", "secure", &server, "--tls=false", "--sasl", "-a",
            "SCRAM-SHA-512", "-u", "svc", "-p", "pw",
        ],
    )
    .unwrap_err();
    assert_eq!(err.kind(), "connectivity");
    assert!(err.to_string().contains("SCRAM-SHA-512"));
}
