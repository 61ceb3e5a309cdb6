//! Fixed display precision for derived values.
//!
//! Consumers rely on these for stable output, so every rounded field in a
//! response goes through `round_to` with one of these constants.

pub const POWER_DP: u32 = 2;
pub const VOLTAGE_DP: u32 = 2;
pub const CURRENT_DP: u32 = 3;
pub const PF_DP: u32 = 2;
pub const ENERGY_DP: u32 = 2;
pub const FREQUENCY_DP: u32 = 1;
pub const PERCENT_DP: u32 = 1;
pub const KWH_DP: u32 = 4;
pub const COST_DP: u32 = 2;

/// Round half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10_f64.powi(decimals as i32);
    (value * factor).round() / factor
}
