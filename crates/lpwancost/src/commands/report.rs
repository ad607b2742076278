//! Cumulative and amortized report handlers.

use lpwancost_core::report;

use crate::cli::{AmortizedArgs, CumulativeArgs, GlobalOpts};
use crate::config;
use crate::error::CliError;
use crate::output;

pub fn cumulative(args: &CumulativeArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let prefs = config::load_config_or_default();
    let format = config::output_format(global, &prefs)?;
    let months = config::horizon_months(args.months, &prefs)?;

    let settings = super::load_settings(&args.source.settings)?;
    let table = report::cumulative(&settings, months.get())?;

    let out = output::render_cost_table(format, &table)?;
    output::print_output(&out, global.quiet);
    Ok(())
}

pub fn amortized(args: &AmortizedArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let prefs = config::load_config_or_default();
    let format = config::output_format(global, &prefs)?;
    let sweep = config::resolve_sweep(args, &prefs)?;
    tracing::debug!(?sweep, "resolved sweep");

    let settings = super::load_settings(&args.source.settings)?;
    let table = report::amortized(&settings, &sweep)?;

    let out = output::render_cost_table(format, &table)?;
    output::print_output(&out, global.quiet);
    Ok(())
}
