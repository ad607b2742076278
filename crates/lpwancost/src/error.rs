//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors with
//! actionable help text and a stable exit code.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

use lpwancost_config::ConfigError;
use lpwancost_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const MALFORMED: i32 = 6;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Invocation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(lpwancost::invocation), help("Run: lpwancost --help"))]
    Invocation { field: String, reason: String },

    // ── Models ───────────────────────────────────────────────────────

    #[error("Deployment model '{name}' not found")]
    #[diagnostic(
        code(lpwancost::unknown_model),
        help("Models in the settings document: {available}")
    )]
    UnknownModel { name: String, available: String },

    // ── Settings documents ───────────────────────────────────────────

    #[error("Settings file not found: {}", path.display())]
    #[diagnostic(
        code(lpwancost::settings_not_found),
        help("Pass the path of a JSON or YAML settings document.")
    )]
    SettingsNotFound { path: PathBuf },

    #[error("Malformed configuration: {message}")]
    #[diagnostic(
        code(lpwancost::malformed),
        help("Throughputs must be greater than zero; counts and prices must not be negative.")
    )]
    Malformed { message: String },

    // ── Preferences ──────────────────────────────────────────────────

    #[error("Preferences file already exists at {}", path.display())]
    #[diagnostic(
        code(lpwancost::config_exists),
        help("Use --force to overwrite it.")
    )]
    ConfigExists { path: PathBuf },

    #[error(transparent)]
    #[diagnostic(code(lpwancost::config))]
    Config(ConfigError),

    // ── IO / Serialization ────────────────────────────────────────────

    #[error("Failed to render output: {0}")]
    #[diagnostic(code(lpwancost::serialization))]
    Serialization(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Invocation { .. } => exit_code::USAGE,
            Self::UnknownModel { .. } | Self::SettingsNotFound { .. } => exit_code::NOT_FOUND,
            Self::Malformed { .. } => exit_code::MALFORMED,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError / ConfigError → CliError mapping ──────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::UnknownModel { name, available } => CliError::UnknownModel {
                name,
                available: available.join(", "),
            },
            err @ CoreError::MalformedConfiguration { .. } => CliError::Malformed {
                message: err.to_string(),
            },
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::SettingsNotFound { path } => CliError::SettingsNotFound { path },
            ConfigError::Invalid(core) => core.into(),
            err @ (ConfigError::Json { .. } | ConfigError::Yaml { .. }) => CliError::Malformed {
                message: err.to_string(),
            },
            ConfigError::UnsupportedFormat { path, extension } => CliError::Invocation {
                field: "SETTINGS".into(),
                reason: format!("unsupported extension '{extension}' on {}", path.display()),
            },
            other => CliError::Config(other),
        }
    }
}
