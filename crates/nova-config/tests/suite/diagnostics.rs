use nova_config::{ConfigWarning, NovaConfig};
use pretty_assertions::assert_eq;
use tempfile::tempdir;

#[test]
fn reports_unknown_keys_with_full_paths() {
    let text = r#"
typo = 1

[hierarchy]
platform_fallbak = true

[logging]
levle = "debug"
"#;

    let (_config, diagnostics) =
        NovaConfig::load_from_str_with_diagnostics(text).expect("config should parse");

    assert_eq!(
        diagnostics.unknown_keys,
        vec!["hierarchy.platform_fallbak", "logging.levle", "typo"]
    );
}

#[test]
fn unknown_keys_are_deduplicated() {
    let text = r#"
[jdk]
builtin = true
extra = 1
"#;

    let (config, diagnostics) =
        NovaConfig::load_from_str_with_diagnostics(text).expect("config should parse");

    assert_eq!(diagnostics.unknown_keys, vec!["jdk.extra"]);
    assert!(config.jdk.builtin);
}

#[test]
fn clean_config_has_no_diagnostics() {
    let text = r#"
[logging]
level = "warn,nova.hierarchy=debug"

[hierarchy]
synthesize_arrays = false
"#;

    let (config, diagnostics) =
        NovaConfig::load_from_str_with_diagnostics(text).expect("config should parse");

    assert!(diagnostics.is_empty(), "{diagnostics:?}");
    assert!(!config.hierarchy.synthesize_arrays);
    assert!(config.hierarchy.platform_fallback);
}

#[test]
fn warns_about_invalid_logging_level() {
    let text = r#"
[logging]
level = "warn,nova=loud"
"#;

    let (_config, diagnostics) =
        NovaConfig::load_from_str_with_diagnostics(text).expect("config should parse");

    assert_eq!(
        diagnostics.warnings,
        vec![ConfigWarning::LoggingLevelInvalid {
            value: "warn,nova=loud".to_string(),
            normalized: "warn,nova=loud".to_string(),
        }]
    );
}

#[test]
fn warns_when_platform_fallback_has_no_builtins() {
    let text = r#"
[jdk]
builtin = false
"#;

    let (_config, diagnostics) =
        NovaConfig::load_from_str_with_diagnostics(text).expect("config should parse");

    assert_eq!(
        diagnostics.warnings,
        vec![ConfigWarning::PlatformFallbackWithoutBuiltins]
    );
}

#[test]
fn warns_about_missing_log_directory_relative_to_config_file() {
    let dir = tempdir().expect("tempdir");
    let config_path = dir.path().join("nova.toml");
    std::fs::write(
        &config_path,
        r#"
[logging]
file = "logs/nova.log"
"#,
    )
    .expect("write config");

    let (_config, diagnostics) =
        NovaConfig::load_from_path_with_diagnostics(&config_path).expect("config should load");
    assert_eq!(
        diagnostics.warnings,
        vec![ConfigWarning::LoggingFileDirectoryMissing {
            toml_path: "logging.file".to_string(),
            resolved: dir.path().join("logs"),
        }]
    );

    std::fs::create_dir(dir.path().join("logs")).expect("mkdir");
    let (_config, diagnostics) =
        NovaConfig::load_from_path_with_diagnostics(&config_path).expect("config should load");
    assert!(diagnostics.warnings.is_empty(), "{diagnostics:?}");
}
