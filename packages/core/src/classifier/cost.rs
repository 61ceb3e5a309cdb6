//! Electricity cost estimate per load class

use crate::classifier::{
    precision::{round_to, COST_DP, KWH_DP, POWER_DP},
    statistics::{group_active, mean},
    types::{ClassCost, ClassifiedReading, CostEstimate},
};

/// Divisor turning the channel's accumulated energy figure into kWh.
///
/// The upstream meter reports energy on a scale where 3600 units make one
/// kWh, so this is not a general joule conversion.
pub const ENERGY_UNITS_PER_KWH: f64 = 3600.0;

/// Estimate cost at `rate_per_kwh`, broken down by active class.
/// `SensorOff` readings are excluded; the total is the sum of the
/// unrounded per-class costs.
pub fn cost_estimate(classified: &[ClassifiedReading], rate_per_kwh: f64) -> CostEstimate {
    let mut total_cost = 0.0;

    let breakdown = group_active(classified)
        .into_iter()
        .map(|(class, readings)| {
            let energy_kwh =
                readings.iter().map(|r| r.energy).sum::<f64>() / ENERGY_UNITS_PER_KWH;
            let cost = energy_kwh * rate_per_kwh;
            total_cost += cost;

            let entry = ClassCost {
                energy_kwh: round_to(energy_kwh, KWH_DP),
                cost_idr: round_to(cost, COST_DP),
                avg_power_w: round_to(mean(&readings, |r| r.power), POWER_DP),
                duration_records: readings.len(),
            };
            (class, entry)
        })
        .collect();

    CostEstimate {
        total_cost_idr: round_to(total_cost, COST_DP),
        kwh_price: rate_per_kwh,
        breakdown,
    }
}
