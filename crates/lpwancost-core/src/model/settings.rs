// ── Settings root and validation ──

use std::num::NonZeroU32;

use indexmap::IndexMap;
use serde::Deserialize;

use super::catalog::{ComputeCatalog, ComputeCosts};
use super::deployment::DeploymentModel;
use super::pricing::SubscriptionPolicy;
use super::topology::{ApplicationProfile, Topology};
use crate::error::CoreError;

/// Everything one evaluation needs. Read-only once loaded.
///
/// Deserializing goes through [`SettingsDocument`] and [`Settings::validate`],
/// so a `Settings` read from a document is always valid.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "SettingsDocument")]
pub struct Settings {
    pub topology: Topology,
    pub application: ApplicationProfile,
    pub compute: ComputeCatalog,
    #[serde(rename = "computecosts")]
    pub compute_costs: ComputeCosts,
    /// Deployment models in document order; the order is the report column order.
    pub models: IndexMap<String, DeploymentModel>,
}

/// The settings document as written, before validation.
#[derive(Debug, Clone, Deserialize)]
pub struct SettingsDocument {
    pub topology: Topology,
    pub application: ApplicationProfile,
    pub compute: ComputeCatalog,
    #[serde(rename = "computecosts")]
    pub compute_costs: ComputeCosts,
    pub models: IndexMap<String, DeploymentModel>,
}

impl TryFrom<SettingsDocument> for Settings {
    type Error = CoreError;

    fn try_from(document: SettingsDocument) -> Result<Self, Self::Error> {
        let settings = Self {
            topology: document.topology,
            application: document.application,
            compute: document.compute,
            compute_costs: document.compute_costs,
            models: document.models,
        };
        settings.validate()?;
        Ok(settings)
    }
}

impl Settings {
    /// Look up a model by name.
    pub fn model(&self, name: &str) -> Result<&DeploymentModel, CoreError> {
        self.models
            .get(name)
            .ok_or_else(|| CoreError::unknown_model(name, self.model_names()))
    }

    pub fn model_names(&self) -> impl Iterator<Item = &str> {
        self.models.keys().map(String::as_str)
    }

    /// A copy of these settings for a fleet of `devices` spread evenly over
    /// `regions`. The original is left untouched.
    pub fn with_fleet(&self, devices: u32, regions: NonZeroU32) -> Self {
        let mut derived = self.clone();
        derived.topology.regions = regions.get();
        derived.topology.devices_per_region = f64::from(devices) / f64::from(regions.get());
        derived
    }

    /// Reject values the calculators would divide by or that make no sense
    /// as counts and prices.
    pub fn validate(&self) -> Result<(), CoreError> {
        non_negative("topology.devicesperregion", self.topology.devices_per_region)?;
        non_negative(
            "application.messagefrequency",
            self.application.message_frequency,
        )?;
        non_negative("application.payloadsize", self.application.payload_size)?;

        self.compute.validate()?;

        let costs = &self.compute_costs;
        non_negative("computecosts.sbc.costperunit", costs.sbc.cost_per_unit)?;
        non_negative("computecosts.cloud.costperunit", costs.cloud.cost_per_unit)?;
        non_negative("computecosts.mec.costperunit", costs.mec.cost_per_unit)?;

        for (name, model) in &self.models {
            let path = |key: &str| format!("models.{name}.{key}");
            non_negative(&path("infrastructure.gatewaycost"), model.infrastructure.gateway_cost)?;
            non_negative(&path("infrastructure.devicecost"), model.infrastructure.device_cost)?;

            let backhaul = &model.network.backhaul;
            non_negative(&path("network.backhaulbasecost"), backhaul.base_cost)?;
            non_negative(&path("network.backhauldatacap"), backhaul.data_cap)?;
            non_negative(&path("network.backhaulcostperbyte"), backhaul.cost_per_byte)?;

            match &model.network.subscription {
                SubscriptionPolicy::FlatRate => {}
                SubscriptionPolicy::ManagedStack(plans) => {
                    for tier in plans.tiers() {
                        non_negative(&path("network.managedstack.monthlyfee"), tier.monthly_fee)?;
                    }
                }
                SubscriptionPolicy::Metered(plan) => {
                    non_negative(&path("network.basecost"), plan.base_cost)?;
                    non_negative(&path("network.datacap"), plan.data_cap)?;
                    non_negative(&path("network.extracostperbyte"), plan.extra_cost_per_byte)?;
                }
            }
        }
        Ok(())
    }
}

pub(super) fn positive(field: &str, value: f64) -> Result<(), CoreError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(CoreError::malformed(
            field,
            format!("must be greater than zero, got {value}"),
        ))
    }
}

pub(super) fn non_negative(field: &str, value: f64) -> Result<(), CoreError> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(CoreError::malformed(
            field,
            format!("must be zero or greater, got {value}"),
        ))
    }
}
