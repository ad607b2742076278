// ── Network pricing policies ──
//
// The document encodes the subscription policy implicitly: `flatrate: true`
// wins, then a non-empty `managedstack` object, otherwise the metered fields
// apply.
// Backhaul metering is always present. Parsing goes through a raw mirror of
// the document and is converted into the typed policy once.

use serde::Deserialize;

use super::Money;

/// Monthly pricing of device connectivity and gateway backhaul.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawNetworkPricing")]
pub struct NetworkPricing {
    pub subscription: SubscriptionPolicy,
    pub backhaul: BackhaulMetering,
}

/// How end-device connectivity is billed.
#[derive(Debug, Clone, PartialEq)]
pub enum SubscriptionPolicy {
    /// No per-device fee (e.g. a self-operated LoRaWAN).
    FlatRate,
    /// Stepwise plans keyed by covered device count.
    ManagedStack(ManagedStackPlans),
    /// Per-device base fee plus a per-byte charge above a fleet-wide cap.
    Metered(MeteredPlan),
}

/// A single managed-stack plan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanTier {
    /// Device count the plan covers; a count equal to it no longer fits.
    pub ceiling: f64,
    pub monthly_fee: Money,
}

/// Managed-stack plans, ascending.
///
/// Ceilings and fees are sorted independently and paired by position, so
/// the cheapest fee always goes with the smallest ceiling.
#[derive(Debug, Clone, PartialEq)]
pub struct ManagedStackPlans {
    tiers: Vec<PlanTier>,
    top: PlanTier,
    open_ended: bool,
}

impl ManagedStackPlans {
    /// Build plans from parallel ceiling and fee lists.
    ///
    /// Fails when the lists are empty or of different lengths, or when a
    /// ceiling is not strictly positive.
    pub fn new(
        mut ceilings: Vec<f64>,
        mut fees: Vec<Money>,
        open_ended: bool,
    ) -> Result<Self, String> {
        if ceilings.len() != fees.len() {
            return Err(format!(
                "{} device ceilings but {} monthly fees",
                ceilings.len(),
                fees.len()
            ));
        }
        let invalid = |c: &&f64| c.is_nan() || **c <= 0.0 || c.is_infinite();
        if let Some(bad) = ceilings.iter().find(invalid) {
            return Err(format!("device ceilings must be greater than zero, got {bad}"));
        }
        ceilings.sort_by(f64::total_cmp);
        fees.sort_by(f64::total_cmp);

        let tiers: Vec<PlanTier> = ceilings
            .into_iter()
            .zip(fees)
            .map(|(ceiling, monthly_fee)| PlanTier {
                ceiling,
                monthly_fee,
            })
            .collect();
        let top = *tiers
            .last()
            .ok_or_else(|| "at least one plan is required".to_owned())?;

        Ok(Self {
            tiers,
            top,
            open_ended,
        })
    }

    pub fn tiers(&self) -> &[PlanTier] {
        &self.tiers
    }

    /// The most expensive plan.
    pub fn top(&self) -> PlanTier {
        self.top
    }

    /// Whether the top plan covers an unlimited number of devices.
    pub fn is_open_ended(&self) -> bool {
        self.open_ended
    }
}

/// Per-device subscription with a fleet-wide data cap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeteredPlan {
    pub base_cost: Money,
    /// In thousands of bytes.
    pub data_cap: f64,
    pub extra_cost_per_byte: Money,
}

/// Per-gateway uplink billing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackhaulMetering {
    pub base_cost: Money,
    /// In thousands of bytes.
    pub data_cap: f64,
    pub cost_per_byte: Money,
}

// ── Document mirror ─────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct RawNetworkPricing {
    #[serde(default)]
    flatrate: Option<bool>,
    #[serde(default)]
    managedstack: Option<RawManagedStack>,
    #[serde(default)]
    datacap: Option<f64>,
    #[serde(default)]
    basecost: Option<Money>,
    #[serde(default)]
    extracostperbyte: Option<Money>,
    backhaulbasecost: Money,
    backhauldatacap: f64,
    backhaulcostperbyte: Money,
}

/// All keys optional so that `{}` reads as "no managed stack".
#[derive(Debug, Deserialize)]
struct RawManagedStack {
    #[serde(default)]
    devices: Option<Vec<f64>>,
    #[serde(default)]
    monthlyfee: Option<Vec<Money>>,
    #[serde(default)]
    openended: Option<bool>,
}

impl RawManagedStack {
    fn is_empty(&self) -> bool {
        self.devices.is_none() && self.monthlyfee.is_none() && self.openended.is_none()
    }

    fn into_plans(self) -> Result<ManagedStackPlans, String> {
        let devices = self
            .devices
            .ok_or_else(|| "managedstack requires `devices`".to_owned())?;
        let fees = self
            .monthlyfee
            .ok_or_else(|| "managedstack requires `monthlyfee`".to_owned())?;
        ManagedStackPlans::new(devices, fees, self.openended.unwrap_or(false))
            .map_err(|reason| format!("invalid managedstack: {reason}"))
    }
}

impl TryFrom<RawNetworkPricing> for NetworkPricing {
    type Error = String;

    fn try_from(raw: RawNetworkPricing) -> Result<Self, Self::Error> {
        let subscription = if raw.flatrate.unwrap_or(false) {
            SubscriptionPolicy::FlatRate
        } else if let Some(stack) = raw.managedstack.filter(|stack| !stack.is_empty()) {
            SubscriptionPolicy::ManagedStack(stack.into_plans()?)
        } else {
            let required = |value: Option<f64>, key: &str| {
                value.ok_or_else(|| format!("metered pricing requires `{key}`"))
            };
            SubscriptionPolicy::Metered(MeteredPlan {
                base_cost: required(raw.basecost, "basecost")?,
                data_cap: required(raw.datacap, "datacap")?,
                extra_cost_per_byte: required(raw.extracostperbyte, "extracostperbyte")?,
            })
        };

        Ok(Self {
            subscription,
            backhaul: BackhaulMetering {
                base_cost: raw.backhaulbasecost,
                data_cap: raw.backhauldatacap,
                cost_per_byte: raw.backhaulcostperbyte,
            },
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const BACKHAUL: &str =
        r#""backhaulbasecost": 5, "backhauldatacap": 1000, "backhaulcostperbyte": 0.001"#;

    fn parse(body: &str) -> Result<NetworkPricing, serde_json::Error> {
        serde_json::from_str(&format!("{{{body}, {BACKHAUL}}}"))
    }

    #[test]
    fn flat_rate_wins_over_other_policies() {
        let pricing = parse(
            r#""flatrate": true, "managedstack": {"devices": [10], "monthlyfee": [1]}"#,
        )
        .unwrap();
        assert_eq!(pricing.subscription, SubscriptionPolicy::FlatRate);
        assert_eq!(pricing.backhaul.base_cost, 5.0);
    }

    #[test]
    fn flat_rate_false_falls_through_to_metered() {
        let pricing =
            parse(r#""flatrate": false, "datacap": 50, "basecost": 1, "extracostperbyte": 0.5"#)
                .unwrap();
        assert_eq!(
            pricing.subscription,
            SubscriptionPolicy::Metered(MeteredPlan {
                base_cost: 1.0,
                data_cap: 50.0,
                extra_cost_per_byte: 0.5,
            })
        );
    }

    #[test]
    fn managed_stack_lists_are_sorted_independently() {
        let pricing = parse(
            r#""managedstack": {"devices": [500, 100], "monthlyfee": [10, 40], "openended": true}"#,
        )
        .unwrap();
        let SubscriptionPolicy::ManagedStack(plans) = pricing.subscription else {
            panic!("expected managed stack pricing");
        };
        assert!(plans.is_open_ended());
        assert_eq!(
            plans.tiers(),
            &[
                PlanTier {
                    ceiling: 100.0,
                    monthly_fee: 10.0
                },
                PlanTier {
                    ceiling: 500.0,
                    monthly_fee: 40.0
                },
            ]
        );
        assert_eq!(plans.top().monthly_fee, 40.0);
    }

    #[test]
    fn metered_pricing_requires_its_fields() {
        let err = parse(r#""datacap": 50, "basecost": 1"#).unwrap_err();
        assert!(err.to_string().contains("extracostperbyte"), "{err}");
    }

    #[test]
    fn mismatched_plan_lists_are_rejected() {
        let err = parse(r#""managedstack": {"devices": [100, 500], "monthlyfee": [10]}"#)
            .unwrap_err();
        assert!(err.to_string().contains("2 device ceilings"), "{err}");
    }

    #[test]
    fn empty_plan_lists_are_rejected() {
        assert!(ManagedStackPlans::new(vec![], vec![], false).is_err());
    }

    #[test]
    fn zero_ceiling_is_rejected() {
        let err = ManagedStackPlans::new(vec![0.0, 500.0], vec![10.0, 40.0], false).unwrap_err();
        assert!(err.contains("greater than zero"), "{err}");
        assert!(ManagedStackPlans::new(vec![f64::NAN], vec![10.0], false).is_err());
    }

    #[test]
    fn empty_managed_stack_object_falls_through_to_metered() {
        let pricing = parse(
            r#""managedstack": {}, "datacap": 50, "basecost": 1, "extracostperbyte": 0.5"#,
        )
        .unwrap();
        assert!(matches!(pricing.subscription, SubscriptionPolicy::Metered(_)));

        let pricing =
            parse(r#""managedstack": null, "datacap": 50, "basecost": 1, "extracostperbyte": 0.5"#)
                .unwrap();
        assert!(matches!(pricing.subscription, SubscriptionPolicy::Metered(_)));
    }

    #[test]
    fn partial_managed_stack_object_is_rejected() {
        let err = parse(r#""managedstack": {"devices": [100]}"#).unwrap_err();
        assert!(err.to_string().contains("monthlyfee"), "{err}");
    }
}
