//! Configuration loading for lpwancost.
//!
//! Two documents are handled here:
//!
//! - the **settings document** (JSON or YAML) describing topology, traffic,
//!   compute catalog, and deployment models, parsed into
//!   `lpwancost_core::Settings` and validated;
//! - the tool's own **preferences** (TOML + `LPWANCOST_*` environment),
//!   holding report defaults the CLI falls back to.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use lpwancost_core::model::SettingsDocument;
use lpwancost_core::{CoreError, Settings};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("settings file not found: {path}")]
    SettingsNotFound { path: PathBuf },

    #[error("unsupported settings format '{extension}' for {path} (expected json, yaml, or yml)")]
    UnsupportedFormat { path: PathBuf, extension: String },

    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid YAML in {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error(transparent)]
    Invalid(#[from] CoreError),

    #[error("failed to serialize preferences: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("preferences loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── Settings documents ──────────────────────────────────────────────

/// Encoding of a settings document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// Pick the format from the file extension. Files without one are
    /// read as JSON.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            None => Ok(Self::Json),
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(Self::Json),
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Ok(Self::Yaml)
            }
            Some(ext) => Err(ConfigError::UnsupportedFormat {
                path: path.to_path_buf(),
                extension: ext.to_owned(),
            }),
        }
    }
}

/// Read, parse, and validate a settings document.
pub fn load_settings(path: &Path) -> Result<Settings, ConfigError> {
    let format = DocumentFormat::from_path(path)?;
    let contents = std::fs::read_to_string(path).map_err(|err| {
        if err.kind() == std::io::ErrorKind::NotFound {
            ConfigError::SettingsNotFound {
                path: path.to_path_buf(),
            }
        } else {
            ConfigError::Io(err)
        }
    })?;

    let settings = parse_settings(&contents, format, path)?;
    info!(
        path = %path.display(),
        models = settings.models.len(),
        "loaded settings"
    );
    Ok(settings)
}

/// Parse and validate a settings document already in memory. `origin` is
/// only used in error messages.
pub fn parse_settings(
    contents: &str,
    format: DocumentFormat,
    origin: &Path,
) -> Result<Settings, ConfigError> {
    let document: SettingsDocument = match format {
        DocumentFormat::Json => {
            serde_json::from_str(contents).map_err(|source| ConfigError::Json {
                path: origin.to_path_buf(),
                source,
            })?
        }
        DocumentFormat::Yaml => {
            serde_yaml::from_str(contents).map_err(|source| ConfigError::Yaml {
                path: origin.to_path_buf(),
                source,
            })?
        }
    };
    let settings = Settings::try_from(document)?;
    debug!(models = ?settings.model_names().collect::<Vec<_>>(), "validated settings");
    Ok(settings)
}

// ── Preferences ─────────────────────────────────────────────────────

/// Top-level preferences file.
#[derive(Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub defaults: Defaults,
}

#[derive(Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Defaults {
    /// Output format name (`tsv`, `table`, `json`, `yaml`).
    #[serde(default = "default_output")]
    pub output: String,

    /// Months covered by the cumulative report and the amortization.
    #[serde(default = "default_horizon_months")]
    pub horizon_months: u32,

    #[serde(default)]
    pub sweep: SweepDefaults,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            horizon_months: default_horizon_months(),
            sweep: SweepDefaults::default(),
        }
    }
}

/// Fleet sizes for the amortized report.
#[derive(Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct SweepDefaults {
    #[serde(default = "default_regions")]
    pub regions: u32,
    #[serde(default = "default_from")]
    pub from: u32,
    #[serde(default = "default_to")]
    pub to: u32,
    #[serde(default = "default_step")]
    pub step: u32,
}

impl Default for SweepDefaults {
    fn default() -> Self {
        Self {
            regions: default_regions(),
            from: default_from(),
            to: default_to(),
            step: default_step(),
        }
    }
}

fn default_output() -> String {
    "tsv".into()
}
fn default_horizon_months() -> u32 {
    lpwancost_core::DEFAULT_HORIZON_MONTHS
}
fn default_regions() -> u32 {
    10
}
fn default_from() -> u32 {
    100
}
fn default_to() -> u32 {
    2000
}
fn default_step() -> u32 {
    100
}

// ── Preferences file path ───────────────────────────────────────────

/// Resolve the preferences file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("org", "lpwancost", "lpwancost").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("lpwancost");
    p
}

// ── Preferences loading ─────────────────────────────────────────────

/// Load preferences from `path` layered over the built-in defaults and
/// under `LPWANCOST_*` environment variables (`__` separates nesting, e.g.
/// `LPWANCOST_DEFAULTS__HORIZON_MONTHS=24`).
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("LPWANCOST_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load preferences from the canonical path.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load preferences, returning the defaults if they cannot be read.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Preferences saving ──────────────────────────────────────────────

/// Serialize preferences to TOML and write them to `path`.
pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

/// Write preferences to the canonical path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}
