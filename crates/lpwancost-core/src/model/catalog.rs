// ── Compute node catalog and unit prices ──
//
// Throughputs are in messages per second and are used as divisors by the
// sizing code, which checks them with `ComputeCatalog::validate` first.

use serde::{Deserialize, Serialize};
use strum::Display;

use super::Money;
use super::settings::{non_negative, positive};
use crate::error::CoreError;

/// Which function a node is being sized for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum Role {
    /// LPWAN network server / gateway control stack.
    GatewayStack,
    /// Per-region edge monitor or the central aggregator monitor.
    Monitor,
}

/// Per node-class throughput limits, keyed `rpi` and `vcpu` in the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComputeCatalog {
    pub rpi: EdgeNodeClass,
    pub vcpu: VcpuNodeClass,
}

/// A single-board computer deployed on premises.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeNodeClass {
    /// Monitor throughput.
    pub throughput: f64,
    #[serde(rename = "gatewaythroughput")]
    pub gateway_throughput: f64,
    /// Throughput of a box running gateway, stack, and monitor together.
    #[serde(rename = "allinonethroughput")]
    pub all_in_one_throughput: f64,
    /// Running cost of one board per month (power, replacements).
    #[serde(rename = "monthlyextraopex")]
    pub monthly_opex: Money,
}

/// One virtual CPU in the cloud or on a MEC host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VcpuNodeClass {
    pub throughput: f64,
    #[serde(rename = "gatewaythroughput")]
    pub gateway_throughput: f64,
}

impl ComputeCatalog {
    /// Every throughput must be strictly positive.
    pub fn validate(&self) -> Result<(), CoreError> {
        let rpi = &self.rpi;
        positive("compute.rpi.throughput", rpi.throughput)?;
        positive("compute.rpi.gatewaythroughput", rpi.gateway_throughput)?;
        positive("compute.rpi.allinonethroughput", rpi.all_in_one_throughput)?;
        non_negative("compute.rpi.monthlyextraopex", rpi.monthly_opex)?;
        positive("compute.vcpu.throughput", self.vcpu.throughput)?;
        positive("compute.vcpu.gatewaythroughput", self.vcpu.gateway_throughput)
    }
}

impl EdgeNodeClass {
    pub fn throughput_for(&self, role: Role) -> f64 {
        match role {
            Role::GatewayStack => self.gateway_throughput,
            Role::Monitor => self.throughput,
        }
    }
}

impl VcpuNodeClass {
    pub fn throughput_for(&self, role: Role) -> f64 {
        match role {
            Role::GatewayStack => self.gateway_throughput,
            Role::Monitor => self.throughput,
        }
    }
}

/// Unit prices keyed `sbc`, `cloud`, and `mec`.
///
/// For `sbc` this is the one-off price of a board; for `cloud` and `mec`
/// it is the monthly price of one vCPU.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComputeCosts {
    pub sbc: UnitCost,
    pub cloud: UnitCost,
    pub mec: UnitCost,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnitCost {
    #[serde(rename = "costperunit")]
    pub cost_per_unit: Money,
}
