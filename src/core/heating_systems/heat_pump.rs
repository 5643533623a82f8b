use crate::compare_floats::clamp_between;
use crate::core::heating_systems::emitters::Suitability;
use crate::core::units::{percentage_of, watts_to_kilowatts};
use crate::input::{HeatPumpInput, HeatPumpType};
use serde::Serialize;
use strum_macros::Display;
use tracing::debug;

// This module provides a simple sizing check of a heat pump against the building design
// heat load, with rough estimates of its COP at the design point, its seasonal
// performance factor (JAZ) and its annual electricity demand.

/// Mean system temperature at which the reference COP of a heat pump type applies, in deg C
const COP_REFERENCE_TEMP: f64 = 35.;
/// COP reduction per `COP_TEMP_STEP` of mean system temperature above the reference
const COP_REDUCTION_PER_STEP: f64 = 0.15;
const COP_TEMP_STEP: f64 = 5.;
const COP_MIN: f64 = 2.0;
const COP_MAX_ABOVE_REFERENCE: f64 = 0.6;
/// Seasonal losses of the JAZ relative to the design point COP
const JAZ_REDUCTION: f64 = 0.3;
const JAZ_MIN: f64 = 1.0;

const COVERAGE_NOMINAL_MIN: f64 = 90.;
const COVERAGE_NOMINAL_MAX: f64 = 120.;

impl HeatPumpType {
    /// COP at the reference mean system temperature of 35 deg C
    pub fn reference_cop(&self) -> Option<f64> {
        match self {
            HeatPumpType::AirWater => Some(3.2),
            HeatPumpType::BrineWater => Some(4.0),
            HeatPumpType::None => None,
        }
    }
}

/// Estimate the COP at the design point from the mean system temperature (deg C).
///
/// The reference COP falls by 0.15 per 5 K above 35 deg C (and rises below it), and is
/// held within [2.0, reference COP + 0.6].
pub fn estimate_cop(
    heat_pump_type: HeatPumpType,
    mean_system_temperature: Option<f64>,
) -> Option<f64> {
    let cop_ref = heat_pump_type.reference_cop()?;
    let mean_system_temperature = mean_system_temperature?;

    let cop = cop_ref
        - COP_REDUCTION_PER_STEP * ((mean_system_temperature - COP_REFERENCE_TEMP) / COP_TEMP_STEP);

    Some(clamp_between(cop, COP_MIN, cop_ref + COP_MAX_ABOVE_REFERENCE))
}

/// Estimate the seasonal performance factor (JAZ) from the design point COP.
///
/// The estimate is floored at 1.0. Earlier versions of this estimate were not floored in
/// every code path; the floored form is the one in use. With the COP held at 2.0 or above
/// the floor does not bind in practice.
pub fn estimate_jaz(cop: Option<f64>) -> Option<f64> {
    cop.map(|cop| (cop - JAZ_REDUCTION).max(JAZ_MIN))
}

/// Heat pump nominal power as a percentage of the building design load.
/// Not available where the building load is not positive.
pub fn coverage_percentage(nominal_power_kw: f64, building_load_kw: f64) -> Option<f64> {
    percentage_of(nominal_power_kw, building_load_kw)
}

/// Annual electricity demand of the heat pump, in kWh.
/// Only available where both the heat demand and the JAZ are positive.
pub fn annual_electricity_demand(annual_heat_demand_kwh: f64, jaz: Option<f64>) -> Option<f64> {
    match jaz {
        Some(jaz) if jaz > 0. && annual_heat_demand_kwh > 0. => Some(annual_heat_demand_kwh / jaz),
        _ => None,
    }
}

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CoverageTier {
    /// below 90% of the building load
    #[strum(serialize = "under-sized")]
    UnderSized,
    /// 90% to 120% of the building load, inclusive
    #[strum(serialize = "nominal")]
    Nominal,
    /// above 120% of the building load
    #[strum(serialize = "over-sized")]
    OverSized,
}

impl CoverageTier {
    pub fn from_coverage(coverage_percentage: f64) -> Self {
        if coverage_percentage < COVERAGE_NOMINAL_MIN {
            CoverageTier::UnderSized
        } else if coverage_percentage <= COVERAGE_NOMINAL_MAX {
            CoverageTier::Nominal
        } else {
            CoverageTier::OverSized
        }
    }
}

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CriticalShareTier {
    #[strum(serialize = "none")]
    None,
    #[strum(serialize = "some")]
    Some,
}

impl CriticalShareTier {
    pub fn from_share(limited_or_critical_load_share: f64) -> Self {
        if limited_or_critical_load_share > 0. {
            CriticalShareTier::Some
        } else {
            CriticalShareTier::None
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HeatPumpAssessment {
    pub heat_pump_type: HeatPumpType,
    /// in kW
    pub nominal_power_kw: f64,
    /// nominal power as a percentage of the building design load
    pub coverage_percentage: f64,
    pub cop_estimate: Option<f64>,
    pub jaz_estimate: Option<f64>,
    /// in kWh
    pub annual_heat_demand_kwh: f64,
    /// in kWh
    pub annual_electricity_demand_kwh: Option<f64>,
    /// the mean system temperature the estimates were made against, in deg C
    pub weighted_mean_system_temperature: Option<f64>,
    pub coverage_tier: CoverageTier,
    pub temperature_tier: Suitability,
    pub critical_share_tier: CriticalShareTier,
}

/// Assess a heat pump against the building.
///
/// Returns None where no heat pump is selected or the building load is not positive.
///
/// Arguments:
/// * `heat_pump` - selected heat pump and annual heat demand of the building
/// * `building_load` - building design heat load, in W
/// * `weighted_mean_system_temperature` - load-weighted mean system temperature, in deg C
/// * `limited_or_critical_load_share` - percentage of building load in limited or critical rooms
pub fn assess_heat_pump(
    heat_pump: &HeatPumpInput,
    building_load: f64,
    weighted_mean_system_temperature: Option<f64>,
    limited_or_critical_load_share: f64,
) -> Option<HeatPumpAssessment> {
    if heat_pump.heat_pump_type == HeatPumpType::None {
        return None;
    }
    let coverage_percentage =
        coverage_percentage(heat_pump.nominal_power_kw, watts_to_kilowatts(building_load))?;

    let cop_estimate = estimate_cop(heat_pump.heat_pump_type, weighted_mean_system_temperature);
    let jaz_estimate = estimate_jaz(cop_estimate);
    let annual_electricity_demand_kwh =
        annual_electricity_demand(heat_pump.annual_heat_demand_kwh, jaz_estimate);

    debug!(
        coverage_percentage,
        ?cop_estimate,
        ?jaz_estimate,
        "Assessed heat pump against building load"
    );

    Some(HeatPumpAssessment {
        heat_pump_type: heat_pump.heat_pump_type,
        nominal_power_kw: heat_pump.nominal_power_kw,
        coverage_percentage,
        cop_estimate,
        jaz_estimate,
        annual_heat_demand_kwh: heat_pump.annual_heat_demand_kwh,
        annual_electricity_demand_kwh,
        weighted_mean_system_temperature,
        coverage_tier: CoverageTier::from_coverage(coverage_percentage),
        temperature_tier: Suitability::from_mean_system_temperature(
            weighted_mean_system_temperature,
        ),
        critical_share_tier: CriticalShareTier::from_share(limited_or_critical_load_share),
    })
}
