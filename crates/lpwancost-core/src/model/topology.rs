// ── Fleet topology and application traffic profile ──

use serde::{Deserialize, Serialize};

/// Length of the billing month used for every traffic projection (30 days).
pub const SECONDS_PER_MONTH: f64 = 3600.0 * 24.0 * 30.0;

/// How the fleet is spread over independently-sized regions.
///
/// `devices_per_region` is fractional on purpose: the amortized sweep
/// divides a total device count evenly over the regions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Topology {
    pub regions: u32,
    #[serde(rename = "gatewaysperregion")]
    pub gateways_per_region: u32,
    #[serde(rename = "devicesperregion")]
    pub devices_per_region: f64,
}

impl Topology {
    pub fn regions(&self) -> f64 {
        f64::from(self.regions)
    }

    pub fn gateways_per_region(&self) -> f64 {
        f64::from(self.gateways_per_region)
    }

    /// Devices across all regions.
    pub fn total_devices(&self) -> f64 {
        self.devices_per_region * self.regions()
    }

    /// Gateways across all regions.
    pub fn total_gateways(&self) -> f64 {
        self.gateways_per_region() * self.regions()
    }
}

/// Uplink traffic generated by a single end device.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ApplicationProfile {
    /// Messages per second per device.
    #[serde(rename = "messagefrequency")]
    pub message_frequency: f64,
    /// Bytes per message.
    #[serde(rename = "payloadsize")]
    pub payload_size: f64,
}

impl ApplicationProfile {
    /// Bytes one device sends in a billing month.
    pub fn monthly_device_traffic(&self) -> f64 {
        self.message_frequency * self.payload_size * SECONDS_PER_MONTH
    }

    /// Messages per second produced by `devices` devices.
    pub fn workload(&self, devices: f64) -> f64 {
        self.message_frequency * devices
    }
}
