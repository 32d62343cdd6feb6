//! Integration tests for settings loading and contexts file resolution

use kafkactx::cli::RunContext;
use kafkactx::config::{xdg, ConfigLoader};
use std::path::PathBuf;
use tempfile::TempDir;

use crate::integration::test_utils::{parse, with_xdg_env, write_file};

#[test]
fn defaults_without_any_settings_file() {
    let dir = TempDir::new().unwrap();
    with_xdg_env(&dir, || {
        let settings = ConfigLoader::load().unwrap();
        assert_eq!(settings.network.probe_timeout_secs, 3);
        assert_eq!(settings.network.connect_timeout_secs, 10);
        assert_eq!(settings.network.client_id, "kafkactx");
        assert_eq!(settings.logging.level, "warn");
        assert!(settings.store.path.is_none());
    });
}

#[test]
fn global_settings_file_is_read_from_xdg() {
    let dir = TempDir::new().unwrap();
    with_xdg_env(&dir, || {
        let path = xdg::global_config_path().unwrap();
        assert_eq!(path, dir.path().join("kafkactx").join("config.toml"));
        write_file(
            &path,
            "[network]\nprobe_timeout_secs = 7\nclient_id = \"ops-laptop\"\n\n[logging]\nlevel = \"debug\"\n",
        );

        let settings = ConfigLoader::load().unwrap();
        assert_eq!(settings.network.probe_timeout_secs, 7);
        assert_eq!(settings.network.client_id, "ops-laptop");
        assert_eq!(settings.network.connect_timeout_secs, 10);
        assert_eq!(settings.logging.level, "debug");
    });
}

#[test]
fn environment_overrides_settings_file() {
    let dir = TempDir::new().unwrap();
    with_xdg_env(&dir, || {
        write_file(
            &xdg::global_config_path().unwrap(),
            "[network]\nprobe_timeout_secs = 7\n",
        );
        std::env::set_var("KAFKACTX__NETWORK__PROBE_TIMEOUT_SECS", "1");
        std::env::set_var("KAFKACTX__NETWORK__CLIENT_ID", "from-env");

        let settings = ConfigLoader::load().unwrap();
        assert_eq!(settings.network.probe_timeout_secs, 1);
        assert_eq!(settings.network.client_id, "from-env");
    });
}

#[test]
fn explicit_settings_file_must_exist() {
    let dir = TempDir::new().unwrap();
    with_xdg_env(&dir, || {
        let missing = dir.path().join("nope.toml");
        assert!(ConfigLoader::load_from_file(&missing).is_err());
        assert!(RunContext::new(Some(missing), None, true).is_err());
    });
}

#[test]
fn explicit_settings_file_replaces_global_file() {
    let dir = TempDir::new().unwrap();
    with_xdg_env(&dir, || {
        write_file(
            &xdg::global_config_path().unwrap(),
            "[network]\nprobe_timeout_secs = 7\n",
        );
        let explicit = dir.path().join("custom.toml");
        write_file(&explicit, "[network]\nconnect_timeout_secs = 4\n");

        let settings = ConfigLoader::load_optional(Some(&explicit)).unwrap();
        assert_eq!(settings.network.probe_timeout_secs, 3);
        assert_eq!(settings.network.connect_timeout_secs, 4);
    });
}

#[test]
fn zero_timeout_is_rejected() {
    let dir = TempDir::new().unwrap();
    with_xdg_env(&dir, || {
        write_file(
            &xdg::global_config_path().unwrap(),
            "[network]\nconnect_timeout_secs = 0\n",
        );
        let err = RunContext::new(None, None, true).err().unwrap();
        assert_eq!(err.kind(), "config");
    });
}

#[test]
fn store_defaults_to_xdg_contexts_file() {
    let dir = TempDir::new().unwrap();
    with_xdg_env(&dir, || {
        let run = RunContext::new(None, None, true).unwrap();
        assert_eq!(
            run.store_location(),
            dir.path().join("kafkactx").join("contexts.toml")
        );
    });
}

#[test]
fn store_path_resolution_order() {
    let dir = TempDir::new().unwrap();
    with_xdg_env(&dir, || {
        let from_settings = dir.path().join("settings-store.toml");
        write_file(
            &xdg::global_config_path().unwrap(),
            &format!("[store]\npath = {:?}\n", from_settings.to_str().unwrap()),
        );
        let run = RunContext::new(None, None, true).unwrap();
        assert_eq!(run.store_location(), from_settings);

        let from_env = dir.path().join("env-store.toml");
        std::env::set_var("KAFKACTX_STORE", &from_env);
        let run = RunContext::new(None, None, true).unwrap();
        assert_eq!(run.store_location(), from_env);

        let from_flag: PathBuf = dir.path().join("flag-store.toml");
        let run = RunContext::new(None, Some(from_flag.clone()), true).unwrap();
        assert_eq!(run.store_location(), from_flag);
    });
}

#[test]
fn set_context_writes_to_resolved_store() {
    let dir = TempDir::new().unwrap();
    with_xdg_env(&dir, || {
        let run = RunContext::new(None, None, true).unwrap();
        let cli = parse(&["-q", "config", "set-context", "local", "--ksql=localhost:8088"]);
        run.execute(&cli.command).unwrap();

        let written = std::fs::read_to_string(dir.path().join("kafkactx").join("contexts.toml"))
            .unwrap();
        assert!(written.contains("[contexts.local]"));
        assert!(written.contains("localhost:8088"));
    });
}
