// ── Report views ──
//
// Both reports are computed into a complete `CostTable` before anything
// is rendered, so a failing model never leaves a half-printed table.

use std::fmt::Write as _;
use std::num::NonZeroU32;

use serde::Serialize;
use tracing::{debug, info};

use crate::error::CoreError;
use crate::estimate::{CostBreakdown, estimate};
use crate::model::{Money, Settings};

/// Horizon used when no other is requested.
pub const DEFAULT_HORIZON_MONTHS: u32 = 36;

/// Days in a billing month.
pub const DAYS_PER_MONTH: f64 = 30.0;

/// A model-by-point cost matrix.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostTable {
    /// Name of the first column (`month` or `devices`).
    pub index_label: &'static str,
    pub models: Vec<String>,
    pub rows: Vec<CostRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostRow {
    pub index: u32,
    /// One cost per model, in `CostTable::models` order.
    pub costs: Vec<Money>,
}

impl CostTable {
    fn new(index_label: &'static str, settings: &Settings) -> Self {
        Self {
            index_label,
            models: settings.model_names().map(str::to_owned).collect(),
            rows: Vec::new(),
        }
    }

    /// Tab-separated rendering with every cost truncated to an integer.
    pub fn to_tsv(&self) -> String {
        let mut out = String::new();
        out.push_str(self.index_label);
        for model in &self.models {
            out.push('\t');
            out.push_str(model);
        }
        out.push('\n');

        for row in &self.rows {
            let _ = write!(out, "{}", row.index);
            for cost in &row.costs {
                let _ = write!(out, "\t{}", whole_units(*cost));
            }
            out.push('\n');
        }
        out
    }
}

/// Truncate toward zero for display.
#[allow(clippy::cast_possible_truncation)]
pub fn whole_units(cost: Money) -> i64 {
    cost.trunc() as i64
}

/// Cumulative spend per model for months `0..=horizon_months`.
///
/// Month 0 is the setup cost alone; each later month adds one monthly cost.
pub fn cumulative(settings: &Settings, horizon_months: u32) -> Result<CostTable, CoreError> {
    let estimates = estimates(settings)?;
    let mut table = CostTable::new("month", settings);
    let mut running: Vec<Money> = estimates.iter().map(|e| e.setup).collect();

    for month in 0..=horizon_months {
        table.rows.push(CostRow {
            index: month,
            costs: running.clone(),
        });
        for (total, estimate) in running.iter_mut().zip(&estimates) {
            *total += estimate.monthly;
        }
    }

    info!(models = table.models.len(), months = horizon_months, "built cumulative report");
    Ok(table)
}

/// Device counts and horizon for the amortized report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sweep {
    /// Regions the fleet is spread over at every point.
    pub regions: NonZeroU32,
    pub horizon_months: NonZeroU32,
    pub from: u32,
    pub to: u32,
    pub step: NonZeroU32,
}

impl Default for Sweep {
    fn default() -> Self {
        Self {
            regions: NonZeroU32::new(10).unwrap_or(NonZeroU32::MIN),
            horizon_months: NonZeroU32::new(DEFAULT_HORIZON_MONTHS).unwrap_or(NonZeroU32::MIN),
            from: 100,
            to: 2000,
            step: NonZeroU32::new(100).unwrap_or(NonZeroU32::MIN),
        }
    }
}

impl Sweep {
    /// Fleet sizes evaluated, inclusive of `to` when it falls on a step.
    pub fn points(&self) -> impl Iterator<Item = u32> {
        (self.from..=self.to).step_by(self.step.get() as usize)
    }
}

/// Daily cost of the whole fleet, amortized over the sweep horizon, for
/// each fleet size in the sweep.
///
/// Despite the per-device framing the value is for the entire fleet:
/// `(setup + months * monthly) / (months * 30)`.
pub fn amortized(settings: &Settings, sweep: &Sweep) -> Result<CostTable, CoreError> {
    let months = f64::from(sweep.horizon_months.get());
    let mut table = CostTable::new("devices", settings);

    for devices in sweep.points() {
        let point = settings.with_fleet(devices, sweep.regions);
        let costs = point
            .model_names()
            .map(|name| {
                let breakdown = estimate(&point, name)?;
                Ok((breakdown.setup + months * breakdown.monthly) / (months * DAYS_PER_MONTH))
            })
            .collect::<Result<Vec<Money>, CoreError>>()?;
        debug!(devices, ?costs, "amortized sweep point");
        table.rows.push(CostRow {
            index: devices,
            costs,
        });
    }

    info!(models = table.models.len(), points = table.rows.len(), "built amortized report");
    Ok(table)
}

/// Breakdown of every model, in document order.
pub fn estimates(settings: &Settings) -> Result<Vec<CostBreakdown>, CoreError> {
    settings
        .model_names()
        .map(|name| estimate(settings, name))
        .collect()
}
