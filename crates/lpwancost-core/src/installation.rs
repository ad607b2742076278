// ── Installation cost ──
//
// One-off procurement of gateways and end devices. Extra compute boards
// required by the sizing rules are priced by the compute calculator.

use crate::error::CoreError;
use crate::model::{Money, Settings};

/// One-off cost of every gateway and end device in the fleet.
///
/// Redundancy and availability are ignored: each region gets exactly
/// `gatewaysperregion` gateways.
pub fn installation_cost(settings: &Settings, model_name: &str) -> Result<Money, CoreError> {
    let model = settings.model(model_name)?;
    let topology = &settings.topology;

    let gateways = topology.total_gateways() * model.infrastructure.gateway_cost;
    let devices = topology.total_devices() * model.infrastructure.device_cost;

    Ok(gateways + devices)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::fixture;
    use crate::model::Topology;

    #[test]
    fn gateways_and_devices_across_regions() {
        // 2 regions x 1 gateway x 150 + 2 regions x 100 devices x 10
        assert_eq!(installation_cost(&fixture(), "lora-edge").unwrap(), 2300.0);
        // no gateway cost, 200 devices x 15
        assert_eq!(installation_cost(&fixture(), "nbiot-mec").unwrap(), 3000.0);
    }

    #[test]
    fn single_region_flat_rate_fleet() {
        let mut settings = fixture();
        settings.topology = Topology {
            regions: 1,
            gateways_per_region: 1,
            devices_per_region: 1000.0,
        };
        let model = settings.models.get_mut("lora-edge").unwrap();
        model.infrastructure.gateway_cost = 50.0;
        model.infrastructure.device_cost = 5.0;
        model.deployment.gateway_device = None;

        assert_eq!(installation_cost(&settings, "lora-edge").unwrap(), 5050.0);
    }

    #[test]
    fn unknown_model_is_an_error() {
        assert!(matches!(
            installation_cost(&fixture(), "ghost"),
            Err(CoreError::UnknownModel { ref name, .. }) if name == "ghost"
        ));
    }
}
