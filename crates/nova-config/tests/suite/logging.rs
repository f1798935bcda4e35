use nova_config::{init_tracing, LoggingConfig};
use tempfile::tempdir;

// The only test in this binary that installs the global subscriber.
#[test]
fn init_tracing_installs_once_and_writes_json_to_file() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("nova.log");
    let config = LoggingConfig {
        level: "info".to_string(),
        json: true,
        stderr: false,
        file: Some(path.clone()),
    };

    assert!(init_tracing(&config));
    assert!(!init_tracing(&config));

    tracing::info!(target: "nova.hierarchy", class = "com.example.Foo", "resolved class");

    let text = std::fs::read_to_string(&path).expect("read log file");
    let line = text
        .lines()
        .find(|line| line.contains("resolved class"))
        .unwrap_or_else(|| panic!("log line missing: {text}"));
    assert!(line.starts_with('{'), "{line}");
    assert!(line.contains("\"target\":\"nova.hierarchy\""), "{line}");
    assert!(line.contains("com.example.Foo"), "{line}");
}
