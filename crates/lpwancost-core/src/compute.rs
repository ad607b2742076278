// ── Compute sizing and cost ──
//
// Turns the per-region workload into edge boards, cloud vCPUs/VMs, and MEC
// vCPUs/VMs, then into money. Every allocation is sized with one headroom
// rule, `floor(load / throughput) + 1`, which adds a full node even when the
// load divides evenly. The only exception is the gateway stack in the
// cloud: its vCPUs are pooled fractionally and rounded once at the end.

use serde::Serialize;
use tracing::debug;

use crate::error::CoreError;
use crate::model::{
    Colocation, ComputeCatalog, DeploymentModel, Money, Placement, Role, Settings,
};

/// Whole-node resource counts for one model over the whole fleet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ResourceCounts {
    /// Boards on top of the gateways themselves.
    pub edge_devices: u64,
    pub cloud_vcpus: u64,
    pub cloud_vms: u64,
    pub mec_vcpus: u64,
    pub mec_vms: u64,
}

/// One-off and monthly compute cost.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ComputeCost {
    pub setup: Money,
    pub monthly: Money,
}

/// Running totals while placing functions. Kept fractional until
/// [`ResourcePools::finish`].
#[derive(Debug, Default)]
struct ResourcePools {
    edge_devices: f64,
    cloud_gateway_vcpus: f64,
    cloud_gateway_vms: f64,
    cloud_monitor_vcpus: f64,
    cloud_monitor_vms: f64,
    mec_vcpus: f64,
    mec_vms: f64,
}

/// Nodes needed for `load` with a full node of headroom.
fn headroom_nodes(load: f64, throughput: f64) -> f64 {
    (load / throughput).floor() + 1.0
}

impl ResourcePools {
    /// Place one function handling `load` messages per second on `tier`.
    ///
    /// Monitors always get their own VM and vCPUs. Gateway stacks in the
    /// cloud share one pool of fractional vCPUs.
    fn place(&mut self, catalog: &ComputeCatalog, tier: Placement, role: Role, load: f64) {
        debug!(%tier, %role, load, "placing function");
        match tier {
            Placement::None => {}
            Placement::Edge => {
                self.edge_devices += headroom_nodes(load, catalog.rpi.throughput_for(role));
            }
            Placement::Cloud => {
                let throughput = catalog.vcpu.throughput_for(role);
                match role {
                    Role::GatewayStack => {
                        self.cloud_gateway_vcpus += load / throughput;
                        self.cloud_gateway_vms += 1.0;
                    }
                    Role::Monitor => {
                        self.cloud_monitor_vcpus += headroom_nodes(load, throughput);
                        self.cloud_monitor_vms += 1.0;
                    }
                }
            }
            Placement::Mec => {
                self.mec_vcpus += headroom_nodes(load, catalog.vcpu.throughput_for(role));
                self.mec_vms += 1.0;
            }
        }
    }

    /// Boards needed beyond the region's own gateways, which can host the
    /// stack (and possibly the monitor) themselves.
    fn extend_gateways(&mut self, load: f64, throughput: f64, gateways: f64) {
        let missing = headroom_nodes(load, throughput) - gateways;
        if missing > 0.0 {
            self.edge_devices += missing;
        }
    }

    /// Replicate the per-region allocations over every region. Cloud
    /// gateway-stack vCPUs stay a single shared pool.
    fn scale_to_regions(&mut self, regions: f64) {
        self.edge_devices *= regions;
        self.cloud_monitor_vcpus *= regions;
        self.cloud_monitor_vms *= regions;
        self.mec_vcpus *= regions;
        self.mec_vms *= regions;
    }

    // Pools are non-negative sums of whole or fractional nodes.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn finish(self) -> ResourceCounts {
        let whole = |pool: f64| if pool > 0.0 { pool.trunc() as u64 } else { 0 };

        let cloud = self.cloud_monitor_vcpus + self.cloud_gateway_vcpus;
        let cloud_vcpus = if cloud > 0.0 {
            cloud.floor() as u64 + 1
        } else {
            0
        };

        ResourceCounts {
            edge_devices: whole(self.edge_devices),
            cloud_vcpus,
            cloud_vms: whole(self.cloud_gateway_vms + self.cloud_monitor_vms),
            mec_vcpus: whole(self.mec_vcpus),
            mec_vms: whole(self.mec_vms),
        }
    }
}

/// Size every resource pool a model needs.
///
/// Fails with `MalformedConfiguration` when a throughput is not strictly
/// positive, even if the settings were modified after loading.
pub fn size_resources(settings: &Settings, model_name: &str) -> Result<ResourceCounts, CoreError> {
    let model = settings.model(model_name)?;
    settings.compute.validate()?;
    let resources = size_model(settings, model);
    debug!(model = model_name, ?resources, "sized compute resources");
    Ok(resources)
}

fn size_model(settings: &Settings, model: &DeploymentModel) -> ResourceCounts {
    let catalog = &settings.compute;
    let topology = &settings.topology;
    let deployment = &model.deployment;
    let workload = settings
        .application
        .workload(topology.devices_per_region);

    let mut pools = ResourcePools::default();

    if deployment.has_gateway() {
        match deployment.gateway_stack {
            Some(Colocation::Dedicated) => {
                if let Some(tier) = deployment.stack_device {
                    pools.place(catalog, tier, Role::GatewayStack, workload);
                }
            }
            Some(Colocation::Shared) => {
                let throughput = if deployment.has_dedicated_monitor() {
                    catalog.rpi.gateway_throughput
                } else {
                    catalog.rpi.all_in_one_throughput
                };
                pools.extend_gateways(workload, throughput, topology.gateways_per_region());
            }
            // managed stack, nothing to host
            None => {}
        }
    }

    if deployment.has_dedicated_monitor() {
        if let Some(tier) = deployment.monitor_device {
            pools.place(catalog, tier, Role::Monitor, workload);
        }
    }

    pools.scale_to_regions(topology.regions());

    if let Some(tier) = deployment.aggregator_monitor {
        let full_workload = workload * topology.regions();
        pools.place(catalog, tier, Role::Monitor, full_workload);
    }

    pools.finish()
}

/// Setup and monthly cost of the compute a model needs.
///
/// Setup buys the extra boards; monthly pays for running every board
/// (gateways included when the model has them) and every vCPU.
pub fn compute_cost(settings: &Settings, model_name: &str) -> Result<ComputeCost, CoreError> {
    let model = settings.model(model_name)?;
    let resources = size_resources(settings, model_name)?;
    Ok(price_resources(settings, model, &resources))
}

pub(crate) fn price_resources(
    settings: &Settings,
    model: &DeploymentModel,
    resources: &ResourceCounts,
) -> ComputeCost {
    let costs = &settings.compute_costs;
    let board_opex = settings.compute.rpi.monthly_opex;

    let edge_devices = resources.edge_devices as f64;
    let setup = edge_devices * costs.sbc.cost_per_unit;

    let gateway_opex = if model.deployment.has_gateway() {
        settings.topology.total_gateways() * board_opex
    } else {
        0.0
    };
    let monthly = gateway_opex
        + edge_devices * board_opex
        + costs.cloud.cost_per_unit * resources.cloud_vcpus as f64
        + costs.mec.cost_per_unit * resources.mec_vcpus as f64;

    ComputeCost { setup, monthly }
}
