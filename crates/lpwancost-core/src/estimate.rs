// ── Per-model cost aggregation ──

use serde::Serialize;

use crate::compute::{self, ResourceCounts};
use crate::error::CoreError;
use crate::installation::installation_cost;
use crate::model::{Money, Settings};
use crate::network::network_cost;

/// Every term behind a model's setup and monthly cost.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostBreakdown {
    pub model: String,
    pub installation: Money,
    pub subscription: Money,
    pub backhaul: Money,
    pub compute_setup: Money,
    pub compute_monthly: Money,
    pub resources: ResourceCounts,
    /// Installation plus extra compute boards.
    pub setup: Money,
    /// Network plus compute operation.
    pub monthly: Money,
}

/// Evaluate all three calculators for one model.
pub fn estimate(settings: &Settings, model_name: &str) -> Result<CostBreakdown, CoreError> {
    let model = settings.model(model_name)?;

    let installation = installation_cost(settings, model_name)?;
    let network = network_cost(settings, model_name)?;
    let resources = compute::size_resources(settings, model_name)?;
    let compute = compute::price_resources(settings, model, &resources);

    Ok(CostBreakdown {
        model: model_name.to_owned(),
        installation,
        subscription: network.subscription,
        backhaul: network.backhaul,
        compute_setup: compute.setup,
        compute_monthly: compute.monthly,
        resources,
        setup: installation + compute.setup,
        monthly: network.total() + compute.monthly,
    })
}

/// One-off cost of deploying a model.
pub fn setup_cost(settings: &Settings, model_name: &str) -> Result<Money, CoreError> {
    estimate(settings, model_name).map(|breakdown| breakdown.setup)
}

/// Recurring cost of running a model for one month.
pub fn monthly_cost(settings: &Settings, model_name: &str) -> Result<Money, CoreError> {
    estimate(settings, model_name).map(|breakdown| breakdown.monthly)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::fixture;

    #[test]
    fn totals_combine_all_calculators() {
        let settings = fixture();

        assert_eq!(setup_cost(&settings, "lora-edge").unwrap(), 2380.0);
        assert_eq!(monthly_cost(&settings, "lora-edge").unwrap(), 83.095_214_843_75);

        assert_eq!(setup_cost(&settings, "lora-managed").unwrap(), 2300.0);
        assert_eq!(monthly_cost(&settings, "lora-managed").unwrap(), 169.095_214_843_75);

        assert_eq!(setup_cost(&settings, "nbiot-mec").unwrap(), 3000.0);
        assert_eq!(monthly_cost(&settings, "nbiot-mec").unwrap(), 786.932_373_046_875);
    }

    #[test]
    fn breakdown_adds_up() {
        let breakdown = estimate(&fixture(), "lora-managed").unwrap();
        assert_eq!(
            breakdown.setup,
            breakdown.installation + breakdown.compute_setup
        );
        assert_eq!(
            breakdown.monthly,
            breakdown.subscription + breakdown.backhaul + breakdown.compute_monthly
        );
    }

    #[test]
    fn repeated_evaluation_is_identical() {
        let settings = fixture();
        let snapshot = settings.clone();
        for name in settings.model_names() {
            assert_eq!(
                estimate(&settings, name).unwrap(),
                estimate(&settings, name).unwrap()
            );
        }
        assert_eq!(settings, snapshot);
    }

    #[test]
    fn unknown_model_fails_instead_of_pricing_zero() {
        let settings = fixture();
        let expected = Err(CoreError::UnknownModel {
            name: "ghost".into(),
            available: settings.model_names().map(str::to_owned).collect(),
        });
        assert_eq!(setup_cost(&settings, "ghost"), expected);
        assert_eq!(monthly_cost(&settings, "ghost"), expected);
    }
}
