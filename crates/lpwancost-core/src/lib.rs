//! Cost model for deploying an IoT data-collection service over LPWAN.
//!
//! Given a fleet topology, an application traffic profile, and a catalog of
//! deployment models, this crate estimates what each model costs:
//!
//! - **Installation** ([`installation`]): gateways and end devices, one-off.
//! - **Network** ([`network`]): device subscriptions under flat-rate,
//!   managed-stack, or metered pricing, plus metered gateway backhaul.
//! - **Compute** ([`compute`]): edge boards, cloud vCPUs/VMs, and MEC
//!   vCPUs/VMs sized from the workload and node throughputs.
//! - **Aggregation** ([`estimate`], [`report`]): setup and monthly totals
//!   per model, cumulative spend over time, and amortized daily cost as the
//!   fleet grows.
//!
//! Everything here is synchronous and pure: the calculators read a
//! [`Settings`] snapshot and never modify it.

pub mod compute;
pub mod error;
pub mod estimate;
pub mod installation;
pub mod model;
pub mod network;
pub mod report;

// ── Primary re-exports ──────────────────────────────────────────────
pub use compute::{ComputeCost, ResourceCounts, compute_cost, size_resources};
pub use error::CoreError;
pub use estimate::{CostBreakdown, estimate, monthly_cost, setup_cost};
pub use installation::installation_cost;
pub use model::{DeploymentModel, Money, Settings};
pub use network::{NetworkCost, monthly_network_cost, network_cost};
pub use report::{CostRow, CostTable, DEFAULT_HORIZON_MONTHS, Sweep, amortized, cumulative};

#[cfg(test)]
pub(crate) fn fixture() -> Settings {
    serde_json::from_str(include_str!("../tests/fixtures/fleet.json"))
        .unwrap_or_else(|e| panic!("fixture does not parse: {e}"))
}
