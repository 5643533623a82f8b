use crate::input::HeatingSurfaceType;
use serde::Serialize;
use strum_macros::Display;

// This module provides the design system temperatures of heating surfaces
// (radiators, underfloor and wall/ceiling heating) and the heat pump suitability
// of a system running at a given mean temperature.

/// Mean system temperature up to which a heating surface is very well suited to a heat pump
const MEAN_TEMP_VERY_GOOD: f64 = 35.;
const MEAN_TEMP_GOOD: f64 = 45.;
const MEAN_TEMP_LIMITED: f64 = 50.;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct DesignTemperatures {
    /// design supply (flow) temperature, in deg C
    pub supply: f64,
    /// design return temperature, in deg C
    pub return_temp: f64,
}

impl DesignTemperatures {
    const fn new(supply: f64, return_temp: f64) -> Self {
        Self { supply, return_temp }
    }
}

/// Look up the nominal design temperatures of a heating surface type.
/// Returns None for types that are not in the catalog.
pub fn design_temperatures(
    heating_surface_type: &HeatingSurfaceType,
) -> Option<DesignTemperatures> {
    match heating_surface_type {
        HeatingSurfaceType::FloorHeating => Some(DesignTemperatures::new(35.0, 28.0)),
        HeatingSurfaceType::WallCeilingHeating => Some(DesignTemperatures::new(38.0, 30.0)),
        HeatingSurfaceType::LowTemperatureRadiator => Some(DesignTemperatures::new(45.0, 38.0)),
        HeatingSurfaceType::StandardRadiator => Some(DesignTemperatures::new(60.0, 50.0)),
        HeatingSurfaceType::OldBuildingRadiator => Some(DesignTemperatures::new(70.0, 60.0)),
        HeatingSurfaceType::Other(_) => None,
    }
}

/// Resolve the supply and return temperatures of a room, filling whichever is absent
/// from the catalog entry for its heating surface type.
pub fn resolve_system_temperatures(
    heating_surface_type: &HeatingSurfaceType,
    supply_temperature: Option<f64>,
    return_temperature: Option<f64>,
) -> (Option<f64>, Option<f64>) {
    let catalog_entry = design_temperatures(heating_surface_type);

    (
        supply_temperature.or(catalog_entry.map(|temps| temps.supply)),
        return_temperature.or(catalog_entry.map(|temps| temps.return_temp)),
    )
}

/// Arithmetic mean of supply and return temperature, in deg C.
/// Not available unless both temperatures are.
pub fn mean_system_temperature(
    supply_temperature: Option<f64>,
    return_temperature: Option<f64>,
) -> Option<f64> {
    match (supply_temperature, return_temperature) {
        (Some(supply), Some(return_temp)) => Some((supply + return_temp) / 2.),
        _ => None,
    }
}

/// Heat pump suitability of a heating system, banded by its mean system temperature.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Suitability {
    #[strum(serialize = "very good")]
    VeryGood,
    #[strum(serialize = "good")]
    Good,
    #[strum(serialize = "limited")]
    Limited,
    #[strum(serialize = "critical")]
    Critical,
    #[strum(serialize = "unknown")]
    Unknown,
}

impl Suitability {
    /// Classify a mean system temperature (deg C). Each band includes its upper boundary.
    pub fn from_mean_system_temperature(mean_system_temperature: Option<f64>) -> Self {
        match mean_system_temperature {
            None => Suitability::Unknown,
            Some(temp) if temp <= MEAN_TEMP_VERY_GOOD => Suitability::VeryGood,
            Some(temp) if temp <= MEAN_TEMP_GOOD => Suitability::Good,
            Some(temp) if temp <= MEAN_TEMP_LIMITED => Suitability::Limited,
            Some(_) => Suitability::Critical,
        }
    }

    pub fn is_limited_or_critical(&self) -> bool {
        matches!(self, Suitability::Limited | Suitability::Critical)
    }
}
