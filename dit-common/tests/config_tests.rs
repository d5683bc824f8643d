//! Unit tests for configuration resolution and graceful degradation
//!
//! Tests cover:
//! - Missing TOML files do not cause failure
//! - Priority order: CLI > environment > TOML > compiled defaults
//! - Invalid environment values and malformed TOML are reported
//!
//! Note: Uses serial_test crate to prevent ENV variable race conditions.
//! Tests that touch DIT_* variables are marked with #[serial].

use dit_common::config::{
    load_toml_config, CompiledDefaults, ConfigOverrides, ConfigSource, Settings, TomlConfig,
    ENV_API_PORT, ENV_DATA_DIR, ENV_OUTPUT_DIR, ENV_SEED,
};
use serial_test::serial;
use std::env;
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

fn clear_env() {
    env::remove_var(ENV_DATA_DIR);
    env::remove_var(ENV_OUTPUT_DIR);
    env::remove_var(ENV_SEED);
    env::remove_var(ENV_API_PORT);
}

#[test]
#[serial]
fn test_defaults_when_nothing_configured() {
    clear_env();

    let settings = Settings::resolve(&ConfigOverrides::default(), &TomlConfig::default()).unwrap();
    let defaults = CompiledDefaults::default();

    assert_eq!(settings.data_dir, defaults.data_dir);
    assert_eq!(settings.output_dir, defaults.output_dir);
    assert_eq!(settings.years, vec![2023, 2022, 2021]);
    assert_eq!(settings.max_records, 10_000);
    assert_eq!(settings.max_organizations, 1_000);
    assert_eq!(settings.request_delay_ms, 1_000);
    assert_eq!(settings.api_port, 7071);
    assert_eq!(settings.log_level, "info");
    assert!(settings.seed.is_none());
    assert!(settings.combined_data_path().ends_with("nccs-combined-data.json"));
}

#[test]
#[serial]
fn test_toml_values_override_defaults() {
    clear_env();

    let config: TomlConfig = toml::from_str(
        r#"
        data_dir = "/srv/nccs"
        years = [2022]
        max_records = 50
        seed = 7
        base_url = "https://example.org/data/"

        [api]
        port = 9000

        [logging]
        level = "debug"
        "#,
    )
    .unwrap();

    let settings = Settings::resolve(&ConfigOverrides::default(), &config).unwrap();

    assert_eq!(settings.data_dir, PathBuf::from("/srv/nccs"));
    assert_eq!(settings.years, vec![2022]);
    assert_eq!(settings.max_records, 50);
    assert_eq!(settings.seed, Some(7));
    assert_eq!(settings.base_url, "https://example.org/data");
    assert_eq!(settings.api_port, 9000);
    assert_eq!(settings.log_level, "debug");
}

#[test]
#[serial]
fn test_env_overrides_toml() {
    clear_env();
    env::set_var(ENV_DATA_DIR, "/tmp/dit-env-data");
    env::set_var(ENV_SEED, "42");

    let config = TomlConfig {
        data_dir: Some(PathBuf::from("/srv/nccs")),
        seed: Some(7),
        ..Default::default()
    };
    let settings = Settings::resolve(&ConfigOverrides::default(), &config).unwrap();

    assert_eq!(settings.data_dir, PathBuf::from("/tmp/dit-env-data"));
    assert_eq!(settings.seed, Some(42));

    clear_env();
}

#[test]
#[serial]
fn test_cli_overrides_env() {
    clear_env();
    env::set_var(ENV_OUTPUT_DIR, "/tmp/dit-env-out");
    env::set_var(ENV_API_PORT, "8000");

    let overrides = ConfigOverrides {
        output_dir: Some(PathBuf::from("/tmp/dit-cli-out")),
        api_port: Some(8100),
        ..Default::default()
    };
    let settings = Settings::resolve(&overrides, &TomlConfig::default()).unwrap();

    assert_eq!(settings.output_dir, PathBuf::from("/tmp/dit-cli-out"));
    assert_eq!(settings.api_port, 8100);

    clear_env();
}

#[test]
#[serial]
fn test_invalid_env_value_is_config_error() {
    clear_env();
    env::set_var(ENV_SEED, "not-a-number");

    let result = Settings::resolve(&ConfigOverrides::default(), &TomlConfig::default());
    assert!(result.is_err());

    clear_env();
}

#[test]
#[serial]
fn test_empty_years_rejected() {
    clear_env();
    let config = TomlConfig {
        years: Some(vec![]),
        ..Default::default()
    };
    assert!(Settings::resolve(&ConfigOverrides::default(), &config).is_err());
}

#[test]
fn test_missing_explicit_config_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let absent = dir.path().join("absent.toml");
    let (config, source) = load_toml_config(Some(&absent)).unwrap();
    assert!(config.data_dir.is_none());
    assert_eq!(config.logging.level, "info");
    assert_eq!(source, ConfigSource::Missing(absent));
}

/// Log sink shared between a scoped subscriber and the test
#[derive(Clone, Default)]
struct CapturedLog(Arc<Mutex<Vec<u8>>>);

impl io::Write for CapturedLog {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_missing_config_file_warning_is_logged() {
    let dir = tempfile::tempdir().unwrap();
    let (_, source) = load_toml_config(Some(&dir.path().join("absent.toml"))).unwrap();

    let captured = CapturedLog::default();
    let sink = captured.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || sink.clone())
        .with_ansi(false)
        .finish();
    tracing::subscriber::with_default(subscriber, || source.log());

    let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
    assert!(output.contains("WARN"));
    assert!(output.contains("Config file not found, using defaults"));
    assert!(output.contains("absent.toml"));
}

#[test]
fn test_config_file_loaded_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "output_dir = \"/tmp/out\"\nmax_organizations = 25\n").unwrap();

    let (config, source) = load_toml_config(Some(&path)).unwrap();
    assert_eq!(config.output_dir, Some(PathBuf::from("/tmp/out")));
    assert_eq!(config.max_organizations, Some(25));
    assert_eq!(source, ConfigSource::File(path));
}

#[test]
fn test_malformed_config_file_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "years = [2023,\n").unwrap();

    assert!(load_toml_config(Some(&path)).is_err());
}
