//! Command dispatch: bridges CLI args -> core calculators -> output formatting.

pub mod config_cmd;
pub mod estimate;
pub mod report;
pub mod validate;

use std::path::Path;

use lpwancost_core::Settings;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a command to the appropriate handler.
pub fn dispatch(cmd: Command, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Cumulative(args) => report::cumulative(&args, global),
        Command::Amortized(args) => report::amortized(&args, global),
        Command::Estimate(args) => estimate::handle(&args, global),
        Command::Validate(args) => validate::handle(&args, global),
        Command::Config(args) => config_cmd::handle(args, global),
        // Completions are generated before dispatch
        Command::Completions(_) => unreachable!(),
    }
}

/// Read and validate a settings document.
fn load_settings(path: &Path) -> Result<Settings, CliError> {
    Ok(lpwancost_config::load_settings(path)?)
}
