//! Clap derive structures for the `lpwancost` CLI.
//!
//! Defines the command tree, global flags, and shared value types. Kept
//! free of crate-internal imports so `build.rs` can include it directly.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// lpwancost -- compare the cost of LPWAN IoT deployment models
#[derive(Debug, Parser)]
#[command(
    name = "lpwancost",
    version,
    about = "Estimate setup and monthly costs of LPWAN IoT deployment models",
    long_about = "Estimates the total cost of ownership of alternative ways to deploy an IoT\n\
        data-collection service over LoRaWAN, NB-IoT, and similar networks.\n\n\
        The settings document (JSON or YAML) describes the fleet topology, the\n\
        traffic profile, the compute catalog, and the deployment models to compare.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Output format (defaults to the preferences file, then tsv)
    #[arg(long, short = 'o', env = "LPWANCOST_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

// ── Output Enum ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Tab-separated values, costs truncated to integers (default)
    Tsv,
    /// Pretty table
    Table,
    /// Pretty-printed JSON with full-precision costs
    Json,
    /// YAML with full-precision costs
    Yaml,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Cumulative spend per model, month by month
    #[command(alias = "a")]
    Cumulative(CumulativeArgs),

    /// Amortized daily cost of the fleet as the device count grows
    #[command(alias = "d")]
    Amortized(AmortizedArgs),

    /// Setup and monthly cost breakdown per model
    #[command(alias = "est")]
    Estimate(EstimateArgs),

    /// Check a settings document without producing a report
    Validate(SettingsArgs),

    /// Manage lpwancost preferences
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Shared Args ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct SettingsArgs {
    /// Settings document (.json, .yaml, or .yml)
    #[arg(value_name = "SETTINGS")]
    pub settings: PathBuf,
}

// ── Reports ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CumulativeArgs {
    #[command(flatten)]
    pub source: SettingsArgs,

    /// Last month to report (month 0 is the setup cost)
    #[arg(long, short = 'm', value_parser = clap::value_parser!(u32).range(1..))]
    pub months: Option<u32>,
}

#[derive(Debug, Args)]
pub struct AmortizedArgs {
    #[command(flatten)]
    pub source: SettingsArgs,

    /// Regions the fleet is spread over
    #[arg(long, short = 'r', value_parser = clap::value_parser!(u32).range(1..))]
    pub regions: Option<u32>,

    /// Amortization horizon in months
    #[arg(long, short = 'm', value_parser = clap::value_parser!(u32).range(1..))]
    pub months: Option<u32>,

    /// Smallest fleet size
    #[arg(long)]
    pub from: Option<u32>,

    /// Largest fleet size
    #[arg(long)]
    pub to: Option<u32>,

    /// Fleet size increment
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub step: Option<u32>,
}

#[derive(Debug, Args)]
pub struct EstimateArgs {
    #[command(flatten)]
    pub source: SettingsArgs,

    /// Only these models, in the given order (repeatable)
    #[arg(long = "model", short = 'M', value_name = "NAME")]
    pub models: Vec<String>,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective preferences as TOML
    Show,

    /// Print the preferences file path
    Path,

    /// Write the default preferences file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
