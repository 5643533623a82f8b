pub const WATTS_PER_KILOWATT: u32 = 1_000;
pub const PERCENT_PER_UNIT: f64 = 100.;

/// Volumetric heat capacity of air used for ventilation losses, in Wh/(m³.K)
pub const VOLUMETRIC_HEAT_CAPACITY_AIR: f64 = 0.33;

pub fn watts_to_kilowatts(watts: f64) -> f64 {
    watts / WATTS_PER_KILOWATT as f64
}

/// Express `part` as a percentage of `whole`.
/// Returns None where `whole` is not strictly positive, as no meaningful share exists.
pub fn percentage_of(part: f64, whole: f64) -> Option<f64> {
    if whole > 0. {
        Some(part / whole * PERCENT_PER_UNIT)
    } else {
        None
    }
}
