// ── Monthly network cost ──
//
// Device subscriptions under the model's pricing policy plus metered
// backhaul for every gateway.

use serde::Serialize;
use tracing::debug;

use crate::error::CoreError;
use crate::model::{ManagedStackPlans, MeteredPlan, Money, Settings, SubscriptionPolicy};

/// Data caps are expressed in thousands of bytes.
const BYTES_PER_CAP_UNIT: f64 = 1000.0;

/// Monthly network cost split into its two terms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NetworkCost {
    pub subscription: Money,
    pub backhaul: Money,
}

impl NetworkCost {
    pub fn total(&self) -> Money {
        self.subscription + self.backhaul
    }
}

/// Subscription and backhaul cost for one month.
pub fn network_cost(settings: &Settings, model_name: &str) -> Result<NetworkCost, CoreError> {
    let model = settings.model(model_name)?;
    let topology = &settings.topology;

    let device_traffic = settings.application.monthly_device_traffic();
    let devices = topology.total_devices();
    let total_traffic = device_traffic * devices;

    let subscription = subscription_cost(&model.network.subscription, devices, total_traffic);

    // Worst case: every gateway in a region forwards all of the region's traffic.
    let backhaul = &model.network.backhaul;
    let gateway_traffic = device_traffic * topology.devices_per_region;
    let excess_per_gateway = excess_cost(gateway_traffic, backhaul.data_cap, backhaul.cost_per_byte);
    let backhaul = (backhaul.base_cost + excess_per_gateway) * topology.total_gateways();

    debug!(
        model = model_name,
        devices, total_traffic, subscription, backhaul, "priced network"
    );
    Ok(NetworkCost {
        subscription,
        backhaul,
    })
}

/// Total monthly network cost.
pub fn monthly_network_cost(settings: &Settings, model_name: &str) -> Result<Money, CoreError> {
    network_cost(settings, model_name).map(|cost| cost.total())
}

/// Fleet-wide subscription cost for `devices` devices sending `total_traffic`
/// bytes in a month.
pub fn subscription_cost(policy: &SubscriptionPolicy, devices: f64, total_traffic: f64) -> Money {
    match policy {
        SubscriptionPolicy::FlatRate => 0.0,
        SubscriptionPolicy::ManagedStack(plans) => managed_stack_fee(plans, devices),
        SubscriptionPolicy::Metered(plan) => metered_fee(plan, devices, total_traffic),
    }
}

/// Cost of covering `devices` devices with managed-stack plans.
///
/// Unless the top plan is open-ended, as many top plans as fit are bought
/// and the remainder goes to the first plan whose ceiling it stays strictly
/// below. When nothing fits (open-ended only) the top plan covers everyone.
pub fn managed_stack_fee(plans: &ManagedStackPlans, devices: f64) -> Money {
    let top = plans.top();
    let (full_plans, remaining) = if plans.is_open_ended() {
        (0.0, devices)
    } else {
        ((devices / top.ceiling).trunc(), devices % top.ceiling)
    };

    let extra = plans
        .tiers()
        .iter()
        .find(|tier| (remaining / tier.ceiling).trunc() == 0.0)
        .map_or(top.monthly_fee, |tier| tier.monthly_fee);

    full_plans * top.monthly_fee + extra
}

fn metered_fee(plan: &MeteredPlan, devices: f64, total_traffic: f64) -> Money {
    plan.base_cost * devices + excess_cost(total_traffic, plan.data_cap, plan.extra_cost_per_byte)
}

/// Charge for the bytes of `traffic` above `cap`.
fn excess_cost(traffic: f64, cap: f64, cost_per_byte: Money) -> Money {
    let cap_bytes = cap * BYTES_PER_CAP_UNIT;
    if traffic > cap_bytes {
        (traffic - cap_bytes) * cost_per_byte
    } else {
        0.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::fixture;
    use crate::model::Topology;

    fn plans(open_ended: bool) -> ManagedStackPlans {
        ManagedStackPlans::new(vec![100.0, 500.0], vec![10.0, 40.0], open_ended).unwrap()
    }

    #[test]
    fn managed_stack_buys_top_plans_then_fits_the_rest() {
        // one 500-device plan, 150 left over fit under the 500 ceiling
        assert_eq!(managed_stack_fee(&plans(false), 650.0), 80.0);
    }

    #[test]
    fn managed_stack_ceiling_is_exclusive() {
        // exactly 100 devices do not fit the 100-device plan
        assert_eq!(managed_stack_fee(&plans(false), 100.0), 40.0);
        assert_eq!(managed_stack_fee(&plans(false), 99.0), 10.0);
        // exactly 500: one top plan, nothing left, smallest plan for the remainder
        assert_eq!(managed_stack_fee(&plans(false), 500.0), 50.0);
    }

    #[test]
    fn open_ended_top_plan_covers_any_fleet() {
        assert_eq!(managed_stack_fee(&plans(true), 650.0), 40.0);
        assert_eq!(managed_stack_fee(&plans(true), 50.0), 10.0);
    }

    #[test]
    fn flat_rate_has_no_subscription_cost() {
        for devices in [0.0, 1.0, 100.0, 1e6] {
            assert_eq!(
                subscription_cost(&SubscriptionPolicy::FlatRate, devices, devices * 1e6),
                0.0
            );
        }
    }

    #[test]
    fn metered_cost_bends_at_the_data_cap() {
        let plan = SubscriptionPolicy::Metered(MeteredPlan {
            base_cost: 2.0,
            data_cap: 1000.0,
            extra_cost_per_byte: 0.5,
        });
        let per_device_traffic = 100_000.0;
        let cost = |devices: f64| subscription_cost(&plan, devices, devices * per_device_traffic);

        // the cap (1e6 bytes) is reached at 10 devices
        assert_eq!(cost(5.0), 10.0);
        assert_eq!(cost(10.0), 20.0);
        assert_eq!(cost(11.0), 22.0 + 50_000.0);

        let below = cost(9.0) - cost(8.0);
        let above = cost(13.0) - cost(12.0);
        assert_eq!(below, 2.0);
        assert_eq!(above, 2.0 + 50_000.0);

        let mut previous = 0.0;
        for devices in 0..40 {
            let current = cost(f64::from(devices));
            assert!(current >= previous);
            previous = current;
        }
    }

    #[test]
    fn flat_rate_fleet_pays_only_backhaul() {
        let mut settings = fixture();
        settings.topology = Topology {
            regions: 1,
            gateways_per_region: 1,
            devices_per_region: 1000.0,
        };
        let cost = network_cost(&settings, "lora-edge").unwrap();
        assert_eq!(cost.subscription, 0.0);
        assert_eq!(cost.total(), cost.backhaul);
        assert!(cost.backhaul >= 5.0);
    }

    #[test]
    fn fixture_models() {
        let settings = fixture();

        // backhaul: (5 + (518.4e6 - 500e6) / 2^20) x 2 gateways
        let edge = network_cost(&settings, "lora-edge").unwrap();
        assert_eq!(edge.subscription, 0.0);
        assert_eq!(edge.backhaul, 45.095_214_843_75);

        // 200 devices fall under the 500-device plan
        let managed = network_cost(&settings, "lora-managed").unwrap();
        assert_eq!(managed.subscription, 40.0);
        assert_eq!(managed.total(), 85.095_214_843_75);

        // 200 x 1 + (1036.8e6 - 500e6) / 2^20, free backhaul
        let nbiot = network_cost(&settings, "nbiot-mec").unwrap();
        assert_eq!(nbiot.subscription, 711.932_373_046_875);
        assert_eq!(nbiot.backhaul, 0.0);
    }

    #[test]
    fn unknown_model_is_an_error() {
        assert!(matches!(
            monthly_network_cost(&fixture(), "ghost"),
            Err(CoreError::UnknownModel { .. })
        ));
    }
}
