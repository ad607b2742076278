// ── Configuration model ──
//
// Typed mirror of the settings document. Field names on the wire are the
// flat lowercase keys existing configuration files use.

pub mod catalog;
pub mod deployment;
pub mod pricing;
pub mod settings;
pub mod topology;

/// Amounts of money, in the currency of the settings document.
pub type Money = f64;

pub use catalog::{ComputeCatalog, ComputeCosts, EdgeNodeClass, Role, UnitCost, VcpuNodeClass};
pub use deployment::{Colocation, Deployment, DeploymentModel, Infrastructure, Placement};
pub use pricing::{
    BackhaulMetering, ManagedStackPlans, MeteredPlan, NetworkPricing, PlanTier,
    SubscriptionPolicy,
};
pub use settings::{Settings, SettingsDocument};
pub use topology::{ApplicationProfile, SECONDS_PER_MONTH, Topology};
