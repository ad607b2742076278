// ── Deployment models: placement of the gateway stack and monitors ──

use serde::{Deserialize, Serialize};
use strum::Display;

use super::Money;
use super::pricing::NetworkPricing;

/// Where a function runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Placement {
    /// Explicitly nowhere. Still counts as "set" for `gatewaydevice`.
    None,
    /// A single-board computer on premises.
    Edge,
    /// A public-cloud VM.
    Cloud,
    /// A VM on a multi-access edge compute host.
    Mec,
}

/// Whether a function shares a machine or gets its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Colocation {
    Shared,
    Dedicated,
}

/// Placement fields of a model. `None` means the key was absent or `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deployment {
    /// Set when the access technology needs a physical gateway (LoRaWAN),
    /// `null` when it does not (NB-IoT).
    #[serde(default, rename = "gatewaydevice")]
    pub gateway_device: Option<Placement>,
    /// `null` for a managed stack with no footprint of its own.
    #[serde(default, rename = "gatewaystack")]
    pub gateway_stack: Option<Colocation>,
    /// Only read when the stack is dedicated.
    #[serde(default, rename = "stackdevice")]
    pub stack_device: Option<Placement>,
    #[serde(default, rename = "edgemonitor")]
    pub edge_monitor: Option<Colocation>,
    /// Only read when the edge monitor is dedicated.
    #[serde(default, rename = "monitordevice")]
    pub monitor_device: Option<Placement>,
    /// Central monitor over the traffic of every region.
    #[serde(default, rename = "aggregatormonitor")]
    pub aggregator_monitor: Option<Placement>,
}

impl Deployment {
    pub fn has_gateway(&self) -> bool {
        self.gateway_device.is_some()
    }

    pub fn has_dedicated_monitor(&self) -> bool {
        self.edge_monitor == Some(Colocation::Dedicated)
    }
}

/// One-off per-unit procurement costs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Infrastructure {
    #[serde(rename = "gatewaycost")]
    pub gateway_cost: Money,
    /// Includes one-off activation fees such as SIM provisioning.
    #[serde(rename = "devicecost")]
    pub device_cost: Money,
}

/// A named way of deploying the service.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DeploymentModel {
    pub infrastructure: Infrastructure,
    pub network: NetworkPricing,
    pub deployment: Deployment,
}
