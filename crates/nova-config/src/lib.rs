use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use thiserror::Error;
use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriterExt};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::prelude::*;

mod diagnostics;
mod validation;

pub use diagnostics::{ConfigDiagnostics, ConfigWarning, ValidationDiagnostics};
pub use validation::ConfigValidationContext;

const TRACE_TARGET: &str = "nova.config";

/// Top-level configuration for the Nova class hierarchy tooling.
///
/// Every section is optional; an empty file yields [`NovaConfig::default`].
///
/// ```toml
/// [logging]
/// level = "info,nova.hierarchy=debug"
/// json = false
///
/// [hierarchy]
/// platform_fallback = true
/// synthesize_arrays = true
///
/// [jdk]
/// builtin = true
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NovaConfig {
    /// Global logging settings for Nova crates.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// How class detail is resolved on demand.
    #[serde(default)]
    pub hierarchy: HierarchyConfig,

    /// Built-in platform type table.
    #[serde(default)]
    pub jdk: JdkConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HierarchyConfig {
    /// Consult the platform's built-in types when the program does not declare a class.
    #[serde(default = "default_true")]
    pub platform_fallback: bool,

    /// Give array classes a synthetic detail (`Object` super class, `Cloneable` and
    /// `Serializable` interfaces) instead of reporting them as missing.
    #[serde(default = "default_true")]
    pub synthesize_arrays: bool,
}

impl Default for HierarchyConfig {
    fn default() -> Self {
        Self {
            platform_fallback: true,
            synthesize_arrays: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JdkConfig {
    /// Seed the platform table with the built-in `java.lang`, `java.util` and `java.io` stubs.
    #[serde(default = "default_true")]
    pub builtin: bool,
}

impl Default for JdkConfig {
    fn default() -> Self {
        Self { builtin: true }
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Logging level for all Nova crates.
    #[serde(default = "LoggingConfig::default_level")]
    pub level: String,

    /// Emit logs in JSON format.
    #[serde(default)]
    pub json: bool,

    /// Mirror logs to stderr.
    #[serde(default = "LoggingConfig::default_stderr")]
    pub stderr: bool,

    /// Append logs to the given file path.
    ///
    /// If the file cannot be opened, file logging is disabled while other sinks
    /// remain active.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl LoggingConfig {
    fn default_level() -> String {
        "info".to_owned()
    }

    fn default_stderr() -> bool {
        true
    }

    pub(crate) fn normalize_level_directives(input: &str) -> String {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Self::default_level();
        }

        match trimmed.to_ascii_lowercase().as_str() {
            // Simple levels should be forgiving about casing and synonyms.
            "trace" => "trace".to_owned(),
            "debug" => "debug".to_owned(),
            "info" => "info".to_owned(),
            "warn" | "warning" => "warn".to_owned(),
            "error" => "error".to_owned(),
            // Anything else is treated as an `EnvFilter` directive string.
            _ => trimmed.to_owned(),
        }
    }

    fn config_env_filter(&self) -> tracing_subscriber::EnvFilter {
        let directives = Self::normalize_level_directives(&self.level);
        tracing_subscriber::EnvFilter::try_new(directives).unwrap_or_else(|_| {
            tracing_subscriber::EnvFilter::default()
                .add_directive(tracing_subscriber::filter::LevelFilter::INFO.into())
        })
    }

    /// Create the effective `EnvFilter` for Nova tracing.
    ///
    /// `LoggingConfig.level` may be either a simple level (`info`, `debug`, ...)
    /// or a full `tracing_subscriber::EnvFilter` directive string such as
    /// `warn,nova.hierarchy=debug`.
    ///
    /// If `RUST_LOG` is set, it is merged into the resulting filter.
    pub fn env_filter(&self) -> tracing_subscriber::EnvFilter {
        let env_directives = std::env::var("RUST_LOG")
            .ok()
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty());

        let config_directives = Self::normalize_level_directives(&self.level);

        match env_directives {
            Some(env_directives) => {
                let combined = format!("{config_directives},{env_directives}");
                tracing_subscriber::EnvFilter::try_new(combined)
                    .or_else(|_| tracing_subscriber::EnvFilter::try_new(env_directives))
                    .unwrap_or_else(|_| self.config_env_filter())
            }
            None => self.config_env_filter(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Self::default_level(),
            json: false,
            stderr: Self::default_stderr(),
            file: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse toml config: {0}")]
    Toml(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        // The default `Display` includes a snippet of the input; keep only the message.
        ConfigError::Toml(err.message().to_owned())
    }
}

impl NovaConfig {
    /// Load a config file from TOML.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = read_config(path.as_ref())?;
        Ok(toml::from_str(&text)?)
    }

    /// Load a config file from TOML and return diagnostics (unknown keys and semantic warnings).
    ///
    /// Relative paths in the config (such as `logging.file`) are checked against the directory
    /// containing the file.
    pub fn load_from_path_with_diagnostics(
        path: impl AsRef<Path>,
    ) -> Result<(Self, ConfigDiagnostics), ConfigError> {
        let path = path.as_ref();
        let text = read_config(path)?;
        let ctx = ConfigValidationContext {
            config_dir: path.parent(),
        };
        Self::load_from_str_with_diagnostics_inner(&text, ctx)
    }

    /// Load a config from a TOML string and return diagnostics.
    pub fn load_from_str_with_diagnostics(
        text: &str,
    ) -> Result<(Self, ConfigDiagnostics), ConfigError> {
        Self::load_from_str_with_diagnostics_inner(text, ConfigValidationContext::default())
    }

    fn load_from_str_with_diagnostics_inner(
        text: &str,
        ctx: ConfigValidationContext<'_>,
    ) -> Result<(Self, ConfigDiagnostics), ConfigError> {
        let (config, unknown_keys) =
            diagnostics::deserialize_toml_with_unknown_keys::<NovaConfig>(text)?;

        let mut diagnostics = ConfigDiagnostics {
            unknown_keys,
            ..ConfigDiagnostics::default()
        };
        diagnostics.extend_validation(config.validate_with_context(ctx));

        Ok((config, diagnostics))
    }
}

fn read_config(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })
}

struct MutexFileMakeWriter {
    file: Arc<Mutex<File>>,
}

impl<'a> MakeWriter<'a> for MutexFileMakeWriter {
    type Writer = MutexFileWriter<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        MutexFileWriter {
            guard: self.file.lock(),
        }
    }
}

struct MutexFileWriter<'a> {
    guard: parking_lot::MutexGuard<'a, File>,
}

impl Write for MutexFileWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.guard.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.guard.flush()
    }
}

/// Initializes structured `tracing` logging.
///
/// Installs a global subscriber with the filter from [`LoggingConfig::env_filter`] and a plain
/// or JSON `fmt` layer writing to the configured sinks. Returns `false` if a global subscriber
/// was already installed, in which case nothing changes.
pub fn init_tracing(config: &LoggingConfig) -> bool {
    let filter = config.env_filter();

    let mut file_error = None;
    let file = config.file.as_ref().and_then(|path| {
        match std::fs::OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => Some(Arc::new(Mutex::new(file))),
            Err(err) => {
                file_error = Some((path, err));
                None
            }
        }
    });

    let mut make_writer = BoxMakeWriter::new(io::sink);
    if config.stderr {
        // `cargo test` output capture only works for the stdlib's `print!/eprint!`
        // macros. Using `TestWriter` in debug builds keeps unit tests quiet
        // while still providing real-time logs for `cargo run` workflows.
        if cfg!(debug_assertions) {
            make_writer = BoxMakeWriter::new(tracing_subscriber::fmt::writer::TestWriter::with_stderr);
        } else {
            make_writer = BoxMakeWriter::new(io::stderr);
        }
    }
    if let Some(file) = file {
        make_writer = BoxMakeWriter::new(make_writer.and(MutexFileMakeWriter { file }));
    }

    let layer: Box<dyn tracing_subscriber::Layer<_> + Send + Sync> = if config.json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(make_writer)
            .with_ansi(false)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(make_writer)
            .with_ansi(false)
            .boxed()
    };

    let subscriber = tracing_subscriber::registry().with(filter).with(layer);
    let installed = tracing::subscriber::set_global_default(subscriber).is_ok();
    if installed {
        if let Some((path, err)) = file_error {
            tracing::warn!(
                target: TRACE_TARGET,
                path = %path.display(),
                error = %err,
                "failed to open log file; file logging disabled"
            );
        }
        tracing::debug!(
            target: TRACE_TARGET,
            level = %config.level,
            json = config.json,
            "tracing initialized"
        );
    }
    installed
}

#[cfg(test)]
mod toml_tests {
    use super::*;

    #[derive(Clone, Default)]
    struct CapturedLines(Arc<Mutex<Vec<u8>>>);

    impl CapturedLines {
        fn text(&self) -> String {
            String::from_utf8_lossy(&self.0.lock()).into_owned()
        }
    }

    impl Write for CapturedLines {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn capture(logging: &LoggingConfig, f: impl FnOnce()) -> String {
        let captured = CapturedLines::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::registry()
            .with(logging.config_env_filter())
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(move || writer.clone())
                    .with_ansi(false),
            );
        tracing::subscriber::with_default(subscriber, f);
        captured.text()
    }

    #[test]
    fn logging_level_parses_simple_levels() {
        let logging = LoggingConfig {
            level: "DEBUG".to_owned(),
            ..Default::default()
        };

        let text = capture(&logging, || {
            tracing::trace!("not visible");
            tracing::debug!("visible");
        });
        assert!(!text.contains("not visible"), "{text}");
        assert!(text.contains("visible"), "{text}");
    }

    #[test]
    fn logging_level_accepts_dotted_target_directives() {
        let logging = LoggingConfig {
            level: "warn,nova.hierarchy=debug".to_owned(),
            ..Default::default()
        };

        let text = capture(&logging, || {
            tracing::info!(target: "other_target", "not visible");
            tracing::warn!(target: "other_target", "visible warn");
            tracing::debug!(target: "nova.hierarchy", "visible debug");
        });
        assert!(!text.contains("not visible"), "{text}");
        assert!(text.contains("visible warn"), "{text}");
        assert!(text.contains("visible debug"), "{text}");
    }

    #[test]
    fn warning_is_a_synonym_for_warn() {
        assert_eq!(LoggingConfig::normalize_level_directives(" Warning "), "warn");
        assert_eq!(LoggingConfig::normalize_level_directives(""), "info");
    }

    #[test]
    fn toml_errors_do_not_echo_input() {
        let err = toml::from_str::<NovaConfig>("[hierarchy]\nplatform_fallback = \"secret\"\n")
            .map_err(ConfigError::from)
            .unwrap_err();
        let ConfigError::Toml(message) = err else {
            panic!("expected toml error");
        };
        assert!(!message.contains("platform_fallback = "), "{message}");
    }
}
