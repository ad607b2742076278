//! CLI configuration: a thin wrapper around `lpwancost_config`.
//!
//! Adds the resolution order the commands need: command-line flag, then
//! preferences file / environment, then built-in default.

use std::num::NonZeroU32;

use clap::ValueEnum;

use lpwancost_core::Sweep;

use crate::cli::{AmortizedArgs, GlobalOpts, OutputFormat};
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use lpwancost_config::{Config, config_path, load_config_or_default, save_config};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the output format from the flag, then the preferences file.
pub fn output_format(global: &GlobalOpts, config: &Config) -> Result<OutputFormat, CliError> {
    if let Some(format) = global.output {
        return Ok(format);
    }
    OutputFormat::from_str(&config.defaults.output, true).map_err(|_| CliError::Invocation {
        field: "defaults.output".into(),
        reason: format!(
            "expected tsv, table, json, or yaml in {}, got '{}'",
            config_path().display(),
            config.defaults.output
        ),
    })
}

/// Months for the cumulative report.
pub fn horizon_months(flag: Option<u32>, config: &Config) -> Result<NonZeroU32, CliError> {
    non_zero("months", flag.unwrap_or(config.defaults.horizon_months))
}

/// Translate amortized-report flags + preferences into a `Sweep`.
pub fn resolve_sweep(args: &AmortizedArgs, config: &Config) -> Result<Sweep, CliError> {
    let defaults = &config.defaults.sweep;
    let sweep = Sweep {
        regions: non_zero("regions", args.regions.unwrap_or(defaults.regions))?,
        horizon_months: horizon_months(args.months, config)?,
        from: args.from.unwrap_or(defaults.from),
        to: args.to.unwrap_or(defaults.to),
        step: non_zero("step", args.step.unwrap_or(defaults.step))?,
    };

    if sweep.from > sweep.to {
        return Err(CliError::Invocation {
            field: "from".into(),
            reason: format!("{} is larger than --to {}", sweep.from, sweep.to),
        });
    }
    Ok(sweep)
}

fn non_zero(field: &str, value: u32) -> Result<NonZeroU32, CliError> {
    NonZeroU32::new(value).ok_or_else(|| CliError::Invocation {
        field: field.into(),
        reason: "must be at least 1".into(),
    })
}
