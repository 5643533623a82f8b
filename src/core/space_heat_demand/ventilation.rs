// This module provides the ventilation heat loss of a room driven by a fixed air change rate.

use crate::core::units::VOLUMETRIC_HEAT_CAPACITY_AIR;

/// Heat transfer coefficient of ventilation, in W/K
///
/// Arguments:
/// * `air_change_rate` - air changes per hour
/// * `volume` - heated air volume of the room, in m3
pub fn ventilation_heat_transfer_coefficient(air_change_rate: f64, volume: f64) -> f64 {
    VOLUMETRIC_HEAT_CAPACITY_AIR * air_change_rate * volume
}

/// Ventilation heat loss at the design temperature difference, in W
///
/// Arguments:
/// * `air_change_rate` - air changes per hour
/// * `volume` - heated air volume of the room, in m3
/// * `temp_diff` - indoor minus outdoor design temperature, in K
pub fn ventilation_heat_loss(air_change_rate: f64, volume: f64, temp_diff: f64) -> f64 {
    ventilation_heat_transfer_coefficient(air_change_rate, volume) * temp_diff
}
