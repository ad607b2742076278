//! Per-model cost breakdown handler.

use tabled::Tabled;

use lpwancost_core::{CostBreakdown, Settings, report};

use crate::cli::{EstimateArgs, GlobalOpts};
use crate::config;
use crate::error::CliError;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct BreakdownRow {
    #[tabled(rename = "Model")]
    model: String,
    #[tabled(rename = "Install")]
    installation: String,
    #[tabled(rename = "Subscription")]
    subscription: String,
    #[tabled(rename = "Backhaul")]
    backhaul: String,
    #[tabled(rename = "Compute setup")]
    compute_setup: String,
    #[tabled(rename = "Compute/mo")]
    compute_monthly: String,
    #[tabled(rename = "Edge")]
    edge: u64,
    #[tabled(rename = "Cloud vCPU/VM")]
    cloud: String,
    #[tabled(rename = "MEC vCPU/VM")]
    mec: String,
    #[tabled(rename = "Setup")]
    setup: String,
    #[tabled(rename = "Monthly")]
    monthly: String,
}

fn row(b: &CostBreakdown) -> BreakdownRow {
    let r = &b.resources;
    BreakdownRow {
        model: b.model.clone(),
        installation: money(b.installation),
        subscription: money(b.subscription),
        backhaul: money(b.backhaul),
        compute_setup: money(b.compute_setup),
        compute_monthly: money(b.compute_monthly),
        edge: r.edge_devices,
        cloud: format!("{}/{}", r.cloud_vcpus, r.cloud_vms),
        mec: format!("{}/{}", r.mec_vcpus, r.mec_vms),
        setup: money(b.setup),
        monthly: money(b.monthly),
    }
}

fn money(value: f64) -> String {
    format!("{value:.2}")
}

const TSV_HEADER: &str = "model\tsetup\tmonthly\tinstallation\tsubscription\tbackhaul\t\
    compute_setup\tcompute_monthly\tedge_devices\tcloud_vcpus\tcloud_vms\tmec_vcpus\tmec_vms";

fn tsv_line(b: &CostBreakdown) -> String {
    let r = &b.resources;
    let cost = |v: f64| report::whole_units(v).to_string();
    [
        b.model.clone(),
        cost(b.setup),
        cost(b.monthly),
        cost(b.installation),
        cost(b.subscription),
        cost(b.backhaul),
        cost(b.compute_setup),
        cost(b.compute_monthly),
        r.edge_devices.to_string(),
        r.cloud_vcpus.to_string(),
        r.cloud_vms.to_string(),
        r.mec_vcpus.to_string(),
        r.mec_vms.to_string(),
    ]
    .join("\t")
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: &EstimateArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let prefs = config::load_config_or_default();
    let format = config::output_format(global, &prefs)?;
    let settings = super::load_settings(&args.source.settings)?;

    let breakdowns = select(&settings, &args.models)?;

    let out = output::render_list(format, &breakdowns, row, TSV_HEADER, tsv_line)?;
    output::print_output(&out, global.quiet);
    Ok(())
}

/// Every model in document order, or only the requested ones in the
/// requested order.
fn select(settings: &Settings, names: &[String]) -> Result<Vec<CostBreakdown>, CliError> {
    if names.is_empty() {
        return Ok(report::estimates(settings)?);
    }

    names
        .iter()
        .map(|name| lpwancost_core::estimate(settings, name).map_err(CliError::from))
        .collect()
}
