use nova_config::{ConfigError, HierarchyConfig, JdkConfig, LoggingConfig, NovaConfig};
use pretty_assertions::assert_eq;
use tempfile::{tempdir, NamedTempFile};

#[test]
fn empty_file_yields_defaults() {
    let file = NamedTempFile::new().expect("tempfile");
    let config = NovaConfig::load_from_path(file.path()).expect("config should load");

    assert_eq!(config, NovaConfig::default());
    assert_eq!(
        config.hierarchy,
        HierarchyConfig {
            platform_fallback: true,
            synthesize_arrays: true,
        }
    );
    assert_eq!(config.jdk, JdkConfig { builtin: true });
    assert_eq!(config.logging.level, "info");
    assert!(config.logging.stderr);
}

#[test]
fn loads_every_section() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("nova.toml");
    std::fs::write(
        &path,
        r#"
[logging]
level = "debug"
json = true
stderr = false
file = "/tmp/nova.log"

[hierarchy]
platform_fallback = false

[jdk]
builtin = false
"#,
    )
    .expect("write config");

    let config = NovaConfig::load_from_path(&path).expect("config should load");
    assert_eq!(
        config.logging,
        LoggingConfig {
            level: "debug".to_string(),
            json: true,
            stderr: false,
            file: Some("/tmp/nova.log".into()),
        }
    );
    assert!(!config.hierarchy.platform_fallback);
    assert!(config.hierarchy.synthesize_arrays);
    assert!(!config.jdk.builtin);
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("absent.toml");

    let err = NovaConfig::load_from_path(&path).expect_err("missing file");
    match err {
        ConfigError::Io { path: reported, .. } => {
            assert_eq!(reported, path.display().to_string())
        }
        other => panic!("expected io error, got {other:?}"),
    }
}

#[test]
fn type_errors_are_reported_without_echoing_values() {
    let text = r#"
[hierarchy]
synthesize_arrays = "sometimes"
"#;

    let err = NovaConfig::load_from_str_with_diagnostics(text).expect_err("bad type");
    let message = err.to_string();
    assert!(message.starts_with("failed to parse toml config"), "{message}");
    assert!(!message.contains("synthesize_arrays = "), "{message}");
}

#[test]
fn round_trips_through_toml() {
    let config = NovaConfig {
        hierarchy: HierarchyConfig {
            platform_fallback: false,
            synthesize_arrays: true,
        },
        ..NovaConfig::default()
    };

    let text = toml::to_string(&config).expect("serialize");
    let (parsed, diagnostics) =
        NovaConfig::load_from_str_with_diagnostics(&text).expect("config should parse");
    assert_eq!(parsed, config);
    assert!(diagnostics.unknown_keys.is_empty());
}
