use std::path::Path;

use crate::diagnostics::{ConfigWarning, ValidationDiagnostics};
use crate::{LoggingConfig, NovaConfig};

/// Context for semantic config validation.
///
/// Checking whether configured paths exist requires a base directory for relative paths; callers
/// that loaded the config from a file provide the directory containing it.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigValidationContext<'a> {
    /// Directory containing the loaded config file.
    pub config_dir: Option<&'a Path>,
}

impl NovaConfig {
    /// Validate semantic invariants for a configuration.
    ///
    /// Validation is best-effort: it attempts to report as many problems as possible in one pass.
    #[must_use]
    pub fn validate(&self) -> ValidationDiagnostics {
        self.validate_with_context(ConfigValidationContext::default())
    }

    /// Like [`NovaConfig::validate`] but resolves relative paths against `ctx.config_dir`.
    #[must_use]
    pub fn validate_with_context(&self, ctx: ConfigValidationContext<'_>) -> ValidationDiagnostics {
        let mut out = ValidationDiagnostics::default();

        validate_logging(self, ctx, &mut out);
        validate_hierarchy(self, &mut out);

        out
    }
}

fn validate_logging(
    config: &NovaConfig,
    ctx: ConfigValidationContext<'_>,
    out: &mut ValidationDiagnostics,
) {
    let normalized = LoggingConfig::normalize_level_directives(&config.logging.level);
    if !config.logging.level.trim().is_empty()
        && tracing_subscriber::EnvFilter::try_new(normalized.clone()).is_err()
    {
        out.warnings.push(ConfigWarning::LoggingLevelInvalid {
            value: config.logging.level.clone(),
            normalized,
        });
    }

    let Some(file) = config.logging.file.as_deref() else {
        return;
    };
    let resolved = if file.is_absolute() {
        file.to_path_buf()
    } else if let Some(base_dir) = ctx.config_dir {
        base_dir.join(file)
    } else {
        return;
    };
    let Some(parent) = resolved.parent() else {
        return;
    };
    if !parent.as_os_str().is_empty() && !parent.is_dir() {
        out.warnings.push(ConfigWarning::LoggingFileDirectoryMissing {
            toml_path: "logging.file".to_string(),
            resolved: parent.to_path_buf(),
        });
    }
}

fn validate_hierarchy(config: &NovaConfig, out: &mut ValidationDiagnostics) {
    if config.hierarchy.platform_fallback && !config.jdk.builtin {
        out.warnings
            .push(ConfigWarning::PlatformFallbackWithoutBuiltins);
    }
}
